//! One-time password policy configuration

use serde::{Deserialize, Serialize};

/// Longest accepted validity window (one day)
pub const MAX_TTL_SECONDS: u64 = 86_400;

/// OTP issuance and verification policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Validity window of an issued code in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// How long the in-app notification carrying the code stays visible
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u64,

    /// Text shown next to the code in the notification
    #[serde(default = "default_notification_message")]
    pub notification_message: String,

    /// Remove the stored code when delivery fails instead of keeping it live
    #[serde(default)]
    pub rollback_on_delivery_failure: bool,

    /// Interval of the expired-entry sweep in seconds
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether the background sweep runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub cleanup_enabled: bool,

    /// Upper bound on pending entries held by the in-memory store
    #[serde(default = "default_max_entries")]
    pub max_entries: Option<usize>,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            notification_duration_ms: default_notification_duration_ms(),
            notification_message: default_notification_message(),
            rollback_on_delivery_failure: false,
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            cleanup_enabled: default_cleanup_enabled(),
            max_entries: default_max_entries(),
        }
    }
}

impl OtpConfig {
    /// Validity window in whole minutes, rounded up, for user-facing text
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_seconds.div_ceil(60)
    }
}

fn default_ttl_seconds() -> u64 {
    300 // 5 minutes
}

fn default_notification_duration_ms() -> u64 {
    30_000
}

fn default_notification_message() -> String {
    String::from("Your OTP for verification is:")
}

fn default_cleanup_interval_seconds() -> u64 {
    60
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_max_entries() -> Option<usize> {
    Some(10_000)
}
