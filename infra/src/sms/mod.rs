//! SMS Service Module
//!
//! SMS providers used by the SMS notification channel.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Logged, in-memory outbox for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Security**: Phone number masking in logs

pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::{format_otp_message, is_valid_phone_number, mask_phone_number, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use pv_shared::config::SmsConfig;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Unknown providers and Twilio setups with missing credentials fall back
/// to the mock implementation.
pub fn create_sms_service(config: &SmsConfig) -> Box<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioConfig::from_sms_config(config) {
            Ok(twilio_config) => Box::new(TwilioSmsService::new(twilio_config)),
            Err(e) => {
                tracing::error!("Failed to initialize Twilio SMS service: {}", e);
                tracing::warn!("Falling back to mock SMS service");
                Box::new(MockSmsService::new())
            }
        },
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Box::new(MockSmsService::new())
        }
    }
}
