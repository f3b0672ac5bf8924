//! In-app notification center
//!
//! Holds short-lived notifications (including issued codes) until their
//! display duration elapses. Expired notifications are dropped whenever the
//! feed is read or written.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use pv_core::domain::clock::Clock;
use pv_core::services::otp::{NotificationKind, NotificationSink, OtpNotification};
use pv_shared::phone::mask_phone_number;

/// Display duration for OTP notifications when none is given
pub const DEFAULT_OTP_DURATION_MS: u64 = 30_000;

/// Display duration for every other notification when none is given
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// Notification visible in the in-app feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Identifier the notification was raised for, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-memory notification feed
pub struct NotificationCenter {
    items: Mutex<Vec<Notification>>,
    clock: Arc<dyn Clock>,
    default_duration_ms: u64,
    otp_duration_ms: u64,
}

impl NotificationCenter {
    pub fn new(clock: Arc<dyn Clock>, default_duration_ms: u64, otp_duration_ms: u64) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            clock,
            default_duration_ms,
            otp_duration_ms,
        }
    }

    /// Center using the built-in display durations
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, DEFAULT_DURATION_MS, DEFAULT_OTP_DURATION_MS)
    }

    /// Add a notification, returning its id
    pub fn add(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        code: Option<String>,
        duration_ms: Option<u64>,
    ) -> Uuid {
        self.push(None, kind, message.into(), code, duration_ms)
    }

    /// Remove a notification before it expires
    pub fn remove(&self, id: Uuid) -> bool {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    /// Unexpired notifications, oldest first
    pub fn active(&self) -> Vec<Notification> {
        let now = self.clock.now();
        let mut items = self.lock();
        items.retain(|n| n.expires_at > now);
        items.clone()
    }

    /// Unexpired notifications raised for `identifier`
    pub fn active_for(&self, identifier: &str) -> Vec<Notification> {
        self.active()
            .into_iter()
            .filter(|n| n.identifier.as_deref() == Some(identifier))
            .collect()
    }

    fn push(
        &self,
        identifier: Option<&str>,
        kind: NotificationKind,
        message: String,
        code: Option<String>,
        duration_ms: Option<u64>,
    ) -> Uuid {
        let duration_ms = duration_ms.unwrap_or(match kind {
            NotificationKind::Otp => self.otp_duration_ms,
            _ => self.default_duration_ms,
        });
        let created_at = self.clock.now();
        let expires_at = created_at
            .checked_add_signed(Duration::milliseconds(
                i64::try_from(duration_ms).unwrap_or(i64::MAX),
            ))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            message,
            code,
            identifier: identifier.map(str::to_string),
            created_at,
            expires_at,
        };
        let id = notification.id;
        let mut items = self.lock();
        items.retain(|n| n.expires_at > created_at);
        items.push(notification);
        id
    }

    /// Number of notifications currently held, expired ones included
    pub fn held_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl NotificationSink for NotificationCenter {
    async fn dispatch(&self, identifier: &str, notification: &OtpNotification) -> Result<(), String> {
        let id = self.push(
            Some(identifier),
            notification.kind,
            notification.message.clone(),
            Some(notification.code.clone()),
            notification.duration_ms,
        );

        tracing::debug!(
            identifier = %mask_phone_number(identifier),
            notification_id = %id,
            "OTP notification added to in-app feed"
        );
        Ok(())
    }
}
