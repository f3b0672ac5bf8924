//! Notification and SMS delivery configuration

use serde::{Deserialize, Serialize};

/// Channel that surfaces codes inside the application
pub const CHANNEL_IN_APP: &str = "in_app";

/// Channel that texts codes to the phone number
pub const CHANNEL_SMS: &str = "sms";

/// Notification channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Comma separated delivery channels (`in_app`, `sms`)
    #[serde(default = "default_channels")]
    pub channels: String,

    /// Display duration for non-OTP notifications in milliseconds
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    /// Display duration for OTP notifications in milliseconds
    #[serde(default = "default_otp_duration_ms")]
    pub otp_duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            default_duration_ms: default_duration_ms(),
            otp_duration_ms: default_otp_duration_ms(),
        }
    }
}

impl NotificationConfig {
    /// Parsed, lower-cased list of channels with blanks removed
    pub fn channel_list(&self) -> Vec<String> {
        self.channels
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Whether a channel is enabled
    pub fn has_channel(&self, channel: &str) -> bool {
        self.channel_list().iter().any(|c| c == channel)
    }
}

/// SMS provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Provider account identifier
    #[serde(default)]
    pub account_sid: String,

    /// Provider auth token
    #[serde(default)]
    pub auth_token: String,

    /// Sender phone number (E.164)
    #[serde(default)]
    pub from_number: String,

    /// Application name used in message text
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Country calling code assumed for numbers without one
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            app_name: default_app_name(),
            default_country_code: default_country_code(),
        }
    }
}

fn default_channels() -> String {
    String::from(CHANNEL_IN_APP)
}

fn default_duration_ms() -> u64 {
    5_000
}

fn default_otp_duration_ms() -> u64 {
    30_000
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_app_name() -> String {
    String::from("RelishApprovals")
}

fn default_country_code() -> String {
    String::from("91")
}
