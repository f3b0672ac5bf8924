//! Traits for store and notification integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::OtpEntry;

use super::types::OtpNotification;

/// Keyed storage for pending OTP entries
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Fetch the entry for an identifier, expired or not
    async fn get(&self, identifier: &str) -> Result<Option<OtpEntry>, String>;
    /// Store an entry, replacing any entry for the same identifier
    async fn put(&self, entry: &OtpEntry) -> Result<(), String>;
    /// Unconditionally remove the entry for an identifier; `true` if one was removed
    ///
    /// Only revocation goes through here. Verification and rollback use
    /// [`OtpStore::consume`] so they never remove a newer issuance.
    async fn delete(&self, identifier: &str) -> Result<bool, String>;
    /// Remove the entry only if it is still the issuance `entry_id`
    async fn consume(&self, identifier: &str, entry_id: Uuid) -> Result<bool, String>;
    /// Drop every entry expired at `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String>;
}

/// Out-of-band channel that shows the code to its owner
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification for `identifier`
    async fn dispatch(&self, identifier: &str, notification: &OtpNotification) -> Result<(), String>;
}
