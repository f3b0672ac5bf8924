//! One-time password entity bound to an identifier.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Smallest issued code (no leading zeros)
pub const CODE_MIN: u32 = 100_000;

/// Largest issued code
pub const CODE_MAX: u32 = 999_999;

/// Default validity window for a code (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Default display duration of the notification carrying the code
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 30_000;

/// A pending one-time password
///
/// Entries are never mutated after creation: re-issuing replaces the entry,
/// and verification either consumes it or leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEntry {
    /// Identity of this issuance, used for compare-and-delete
    pub id: Uuid,

    /// Key the code is bound to (a phone number)
    pub identifier: String,

    /// The 6-digit code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpEntry {
    /// Creates an entry with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `identifier` - The key the code is bound to
    /// * `issued_at` - Issuance time, usually taken from the service clock
    /// * `ttl` - Validity window
    pub fn issue(identifier: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self::with_code(identifier, Self::generate_code(), issued_at, ttl)
    }

    /// Creates an entry with a caller-supplied code
    ///
    /// A window reaching past the representable range ends at the latest
    /// representable instant.
    pub fn with_code(
        identifier: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            code: code.into(),
            issued_at,
            expires_at: issued_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Generates a 6-digit code uniformly in `[100000, 999999]` from the OS CSPRNG
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Whether the code is past its validity window at `now`
    ///
    /// A check at exactly `expires_at` is still within the window.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Compares a submitted code in constant time
    pub fn matches(&self, submitted_code: &str) -> bool {
        self.code.len() == submitted_code.len()
            && constant_time_eq(self.code.as_bytes(), submitted_code.as_bytes())
    }

    /// Time left before expiry at `now`, zero once expired
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttl() -> Duration {
        Duration::seconds(DEFAULT_TTL_SECONDS)
    }

    #[test]
    fn test_issue_sets_expiry() {
        let now = Utc::now();
        let entry = OtpEntry::issue("+919999999999", now, ttl());

        assert_eq!(entry.identifier, "+919999999999");
        assert_eq!(entry.issued_at, now);
        assert_eq!(entry.expires_at, now + Duration::minutes(5));
        assert_eq!(entry.code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..1000 {
            let code = OtpEntry::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let entry = OtpEntry::issue("+919999999999", now, ttl());

        assert!(!entry.is_expired_at(now));
        assert!(!entry.is_expired_at(entry.expires_at));
        assert!(entry.is_expired_at(entry.expires_at + Duration::milliseconds(1)));
    }

    #[test]
    fn test_matches() {
        let entry = OtpEntry::with_code("+919999999999", "123456", Utc::now(), ttl());

        assert!(entry.matches("123456"));
        assert!(!entry.matches("654321"));
        assert!(!entry.matches("12345"));
        assert!(!entry.matches(""));
    }

    #[test]
    fn test_remaining() {
        let now = Utc::now();
        let entry = OtpEntry::with_code("+919999999999", "123456", now, ttl());

        assert_eq!(entry.remaining(now), ttl());
        assert_eq!(entry.remaining(now + Duration::minutes(10)), Duration::zero());
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let now = Utc::now();
        let entry = OtpEntry::issue("+919999999999", now, Duration::days(365 * 1_000_000));

        assert_eq!(entry.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_fresh_issuances_have_distinct_ids() {
        let now = Utc::now();
        let first = OtpEntry::issue("+919999999999", now, ttl());
        let second = OtpEntry::issue("+919999999999", now, ttl());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_serialization() {
        let entry = OtpEntry::issue("+919999999999", Utc::now(), ttl());
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: OtpEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
