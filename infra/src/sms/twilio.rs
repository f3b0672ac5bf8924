//! Twilio SMS Service Implementation
//!
//! Production SMS delivery through the Twilio API. Numbers are normalized to
//! E.164 before sending, failed requests are retried with exponential
//! backoff, and phone numbers are masked in every log line.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use pv_shared::config::SmsConfig;
use pv_shared::phone::format_phone_number;

use crate::sms::sms_service::{mask_phone_number, SmsService};
use crate::InfrastructureError;

/// Twilio rejects bodies longer than this
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Country calling code assumed for numbers without one
    pub default_country_code: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Build from the application SMS settings
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio requires sms.account_sid and sms.auth_token".to_string(),
            ));
        }

        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "sms.from_number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            default_country_code: config.default_country_code.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Self { client, config }
    }

    /// Validate and normalize a phone number to E.164
    ///
    /// Numbers without a leading `+` get the configured default country code.
    pub(crate) fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        let candidate = if phone.trim_start().starts_with('+') {
            phone.trim().to_string()
        } else {
            let formatted = format_phone_number(phone, &self.config.default_country_code);
            debug!(
                "Phone number missing '+', assuming country code {}: {}",
                self.config.default_country_code,
                mask_phone_number(&formatted)
            );
            formatted
        };

        match candidate.parse::<PhoneNumber>() {
            Ok(parsed) => Ok(parsed.format().mode(Mode::E164).to_string()),
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending SMS attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_phone_number(to)
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);

            match self.client.send_message(msg).await {
                Ok(response) => {
                    info!(
                        "SMS sent successfully to {} with SID: {}",
                        mask_phone_number(to),
                        response.sid
                    );
                    return Ok(response.sid);
                }
                Err(e) => {
                    error!(
                        "Failed to send SMS (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Sms(format!(
                            "Failed to send SMS after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    let error_msg = e.to_string();
                    if error_msg.contains("400") || error_msg.contains("invalid") {
                        // Client errors will not succeed on retry
                        return Err(InfrastructureError::Sms(format!("Invalid request: {}", e)));
                    }

                    warn!("Retrying SMS to {} after {:?}", mask_phone_number(to), delay);
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_secs(10));
                }
            }
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            "Sending SMS to {} via Twilio (message length: {} chars)",
            mask_phone_number(&normalized_phone),
            message.len()
        );

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
