//! Types for OTP service results and notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    Otp,
}

/// Notification carrying a freshly issued code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpNotification {
    pub message: String,
    pub kind: NotificationKind,
    pub code: String,
    /// How long the notification stays visible, sink default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl OtpNotification {
    pub fn new(message: impl Into<String>, code: impl Into<String>, duration_ms: Option<u64>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Otp,
            code: code.into(),
            duration_ms,
        }
    }
}

/// Result of issuing a code
///
/// The code itself is deliberately absent; it only travels through the
/// notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOtpResult {
    /// Identity of the stored entry
    pub entry_id: Uuid,
    /// Identifier the code is bound to
    pub identifier: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SendOtpResult {
    /// Seconds of validity at issuance
    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}
