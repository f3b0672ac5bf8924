//! Configuration for the OTP service

use chrono::Duration;
use pv_shared::config::otp::MAX_TTL_SECONDS;
use pv_shared::config::OtpConfig;

use crate::domain::entities::{DEFAULT_NOTIFICATION_DURATION_MS, DEFAULT_TTL_SECONDS};

/// What happens to a stored code when its delivery fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryFailurePolicy {
    /// The code stays live and can still be verified
    #[default]
    KeepEntry,
    /// The code is removed, so a failed send leaves no trace
    Rollback,
}

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Validity window of an issued code
    pub ttl: Duration,
    /// Display duration passed along with the notification
    pub notification_duration_ms: Option<u64>,
    /// Text shown next to the code
    pub notification_message: String,
    /// Handling of delivery failures
    pub delivery_failure_policy: DeliveryFailurePolicy,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_TTL_SECONDS),
            notification_duration_ms: Some(DEFAULT_NOTIFICATION_DURATION_MS),
            notification_message: "Your OTP for verification is:".to_string(),
            delivery_failure_policy: DeliveryFailurePolicy::KeepEntry,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl: Duration::seconds(
                i64::try_from(config.ttl_seconds.min(MAX_TTL_SECONDS)).unwrap_or(DEFAULT_TTL_SECONDS),
            ),
            notification_duration_ms: Some(config.notification_duration_ms),
            notification_message: config.notification_message.clone(),
            delivery_failure_policy: if config.rollback_on_delivery_failure {
                DeliveryFailurePolicy::Rollback
            } else {
                DeliveryFailurePolicy::KeepEntry
            },
        }
    }
}
