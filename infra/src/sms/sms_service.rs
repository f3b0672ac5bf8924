//! SMS Service Interface
//!
//! Defines the trait for SMS providers that text one-time codes to the
//! phone number they were issued for.

use async_trait::async_trait;

use crate::InfrastructureError;

pub use pv_shared::phone::{is_valid_international_phone as is_valid_phone_number, mask_phone_number};

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Text of the SMS carrying a one-time code
pub fn format_otp_message(app_name: &str, code: &str, ttl_minutes: u64) -> String {
    let unit = if ttl_minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your {} verification code is: {}. Valid for {} {}.",
        app_name, code, ttl_minutes, unit
    )
}
