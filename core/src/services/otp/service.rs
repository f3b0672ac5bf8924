//! Main OTP service implementation

use std::sync::Arc;

use pv_shared::phone::mask_phone_number;

use crate::domain::clock::Clock;
use crate::domain::entities::OtpEntry;
use crate::errors::{SendError, SendResult};

use super::config::{DeliveryFailurePolicy, OtpServiceConfig};
use super::traits::{NotificationSink, OtpStore};
use super::types::{OtpNotification, SendOtpResult};

/// Issues one-time codes per identifier and verifies submissions against them
///
/// Store and sink may be concrete types or trait objects
/// (`OtpService<dyn OtpStore, dyn NotificationSink>`).
pub struct OtpService<S: OtpStore + ?Sized, N: NotificationSink + ?Sized> {
    /// Storage for pending entries
    store: Arc<S>,
    /// Channel that shows the code to its owner
    sink: Arc<N>,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: OtpStore + ?Sized, N: NotificationSink + ?Sized> OtpService<S, N> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Store for pending entries
    /// * `sink` - Notification channel used to surface codes
    /// * `clock` - Time source
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        sink: Arc<N>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            sink,
            clock,
            config,
        }
    }

    /// Issue a new code for `identifier` and deliver it through the sink
    ///
    /// Any previous code for the identifier is replaced. The entry is
    /// committed before delivery is attempted; on delivery failure it is kept
    /// or rolled back according to [`DeliveryFailurePolicy`].
    ///
    /// # Returns
    ///
    /// * `Ok(SendOtpResult)` - The stored entry's identity and validity window
    /// * `Err(SendError)` - Empty identifier, store failure or delivery failure
    pub async fn send_otp(&self, identifier: &str) -> SendResult<SendOtpResult> {
        if identifier.trim().is_empty() {
            return Err(SendError::EmptyIdentifier);
        }

        let masked = mask_phone_number(identifier);
        let entry = OtpEntry::issue(identifier, self.clock.now(), self.config.ttl);

        self.store.put(&entry).await.map_err(|e| {
            tracing::error!(
                identifier = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store one-time code"
            );
            SendError::Storage { message: e }
        })?;

        tracing::info!(
            identifier = %masked,
            session_id = %entry.id,
            expires_at = %entry.expires_at,
            event = "otp_generated",
            "Issued new one-time code"
        );

        let notification = OtpNotification::new(
            self.config.notification_message.clone(),
            entry.code.clone(),
            self.config.notification_duration_ms,
        );

        if let Err(e) = self.sink.dispatch(identifier, &notification).await {
            let entry_retained = match self.config.delivery_failure_policy {
                DeliveryFailurePolicy::KeepEntry => true,
                DeliveryFailurePolicy::Rollback => !self.roll_back(&entry).await,
            };

            tracing::warn!(
                identifier = %masked,
                error = %e,
                entry_retained = entry_retained,
                event = "otp_delivery_failed",
                "Failed to deliver one-time code"
            );

            return Err(SendError::Delivery {
                message: e,
                entry_retained,
            });
        }

        Ok(SendOtpResult {
            entry_id: entry.id,
            identifier: entry.identifier,
            issued_at: entry.issued_at,
            expires_at: entry.expires_at,
        })
    }

    /// Check a submitted code for `identifier`
    ///
    /// Returns `true` exactly once per issued code. Missing, expired and
    /// mismatched codes all return `false`; an expired entry is removed on the
    /// first check after expiry, a mismatch leaves the entry in place.
    pub async fn verify_otp(&self, identifier: &str, submitted_code: &str) -> bool {
        let masked = mask_phone_number(identifier);

        let entry = match self.store.get(identifier).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                tracing::debug!(identifier = %masked, event = "otp_not_found", "No pending code");
                return false;
            }
            Err(e) => {
                tracing::error!(
                    identifier = %masked,
                    error = %e,
                    event = "otp_lookup_failed",
                    "Failed to read pending code"
                );
                return false;
            }
        };

        if entry.is_expired_at(self.clock.now()) {
            if let Err(e) = self.store.consume(identifier, entry.id).await {
                tracing::error!(identifier = %masked, error = %e, "Failed to purge expired code");
            }
            tracing::info!(identifier = %masked, event = "otp_expired", "Code expired before verification");
            return false;
        }

        if !entry.matches(submitted_code) {
            tracing::warn!(
                identifier = %masked,
                event = "otp_verification_failed",
                "Submitted code does not match"
            );
            return false;
        }

        // Only the caller that actually removes the entry wins.
        match self.store.consume(identifier, entry.id).await {
            Ok(true) => {
                tracing::info!(
                    identifier = %masked,
                    session_id = %entry.id,
                    event = "otp_verified_success",
                    "One-time code verified"
                );
                true
            }
            Ok(false) => {
                tracing::warn!(
                    identifier = %masked,
                    event = "otp_already_consumed",
                    "Code was consumed or replaced concurrently"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    identifier = %masked,
                    error = %e,
                    event = "otp_consume_failed",
                    "Failed to consume verified code"
                );
                false
            }
        }
    }

    /// Withdraw whatever code is pending for `identifier`
    ///
    /// Used when the approval the code was requested for is cancelled.
    /// Returns `true` if a pending code was removed; store failures are
    /// logged and reported as `false`.
    pub async fn revoke_otp(&self, identifier: &str) -> bool {
        match self.store.delete(identifier).await {
            Ok(removed) => {
                tracing::info!(
                    identifier = %mask_phone_number(identifier),
                    removed,
                    event = "otp_revoked",
                    "Pending code revoked"
                );
                removed
            }
            Err(e) => {
                tracing::error!(
                    identifier = %mask_phone_number(identifier),
                    error = %e,
                    "Failed to revoke pending code"
                );
                false
            }
        }
    }

    /// Remove every entry that has expired by now
    ///
    /// Store failures are logged and reported as zero removals.
    pub async fn purge_expired(&self) -> usize {
        match self.store.purge_expired(self.clock.now()).await {
            Ok(count) => {
                if count > 0 {
                    tracing::debug!(removed = count, event = "otp_purged", "Purged expired codes");
                }
                count
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to purge expired codes");
                0
            }
        }
    }

    /// Generate a 6-digit code in `[100000, 999999]`
    pub fn generate_code() -> String {
        OtpEntry::generate_code()
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Remove an entry after failed delivery; `true` if it is gone
    async fn roll_back(&self, entry: &OtpEntry) -> bool {
        match self.store.consume(&entry.identifier, entry.id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    identifier = %mask_phone_number(&entry.identifier),
                    error = %e,
                    "Failed to roll back undelivered code"
                );
                false
            }
        }
    }
}
