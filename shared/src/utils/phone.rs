//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").expect("E.164 regex is valid")
});

/// Strip everything except ASCII digits
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a phone number as E.164, assuming `default_country_code` when the
/// digits do not already start with it
///
/// `default_country_code` is given without the leading `+` (e.g. `"91"`).
/// Returns an empty string when the input holds no digits.
pub fn format_phone_number(phone: &str, default_country_code: &str) -> String {
    let cleaned = normalize_phone_number(phone);
    if cleaned.is_empty() {
        return cleaned;
    }

    let country_code = default_country_code.trim_start_matches('+');
    if cleaned.starts_with(country_code) {
        format!("+{}", cleaned)
    } else {
        format!("+{}{}", country_code, cleaned)
    }
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    INTERNATIONAL_PHONE_REGEX.is_match(phone)
}

/// Mask a phone number for logs, keeping only the last 4 digits
pub fn mask_phone_number(phone: &str) -> String {
    if phone.len() <= 4 || !phone.is_ascii() {
        return "****".to_string();
    }

    let last_digits = &phone[phone.len() - 4..];
    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(phone.len() - 5), last_digits)
    } else {
        format!("{}{}", "*".repeat(phone.len() - 4), last_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("99999-99999"), "9999999999");
        assert_eq!(normalize_phone_number("+91 99999 99999"), "919999999999");
        assert_eq!(normalize_phone_number("(999) 999-9999"), "9999999999");
    }

    #[test]
    fn test_format_phone_number_adds_country_code() {
        assert_eq!(format_phone_number("9999999999", "91"), "+919999999999");
        assert_eq!(format_phone_number("99999 99999", "+91"), "+919999999999");
    }

    #[test]
    fn test_format_phone_number_keeps_existing_country_code() {
        assert_eq!(format_phone_number("+91 99999 99999", "91"), "+919999999999");
        assert_eq!(format_phone_number("919999999999", "91"), "+919999999999");
    }

    #[test]
    fn test_format_phone_number_empty() {
        assert_eq!(format_phone_number("", "91"), "");
        assert_eq!(format_phone_number("abc", "91"), "");
    }

    #[test]
    fn test_is_valid_international_phone() {
        assert!(is_valid_international_phone("+919999999999"));
        assert!(is_valid_international_phone("+14155552671"));
        assert!(!is_valid_international_phone("9999999999")); // Missing +
        assert!(!is_valid_international_phone("+0123456789")); // Invalid country code
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919999991234"), "+********1234");
        assert_eq!(mask_phone_number("9999991234"), "******1234");
        assert_eq!(mask_phone_number("1234"), "****");
    }
}
