//! Cleanup service for periodic removal of expired OTP entries
//!
//! Verification only purges an expired entry when its identifier is checked
//! again. Codes that are issued and never verified would otherwise stay in
//! the store forever, so this sweep runs on an interval.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::service::OtpService;
use super::traits::{NotificationSink, OtpStore};

/// Configuration for the OTP cleanup service
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60, // Run every minute
            enabled: true,
        }
    }
}

impl From<&pv_shared::config::OtpConfig> for OtpCleanupConfig {
    fn from(config: &pv_shared::config::OtpConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_enabled,
        }
    }
}

/// Service for sweeping expired OTP entries out of the store
pub struct OtpCleanupService<S, N>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    service: Arc<OtpService<S, N>>,
    config: OtpCleanupConfig,
}

impl<S, N> OtpCleanupService<S, N>
where
    S: OtpStore + ?Sized + 'static,
    N: NotificationSink + ?Sized + 'static,
{
    /// Create a new cleanup service
    pub fn new(service: Arc<OtpService<S, N>>, config: OtpCleanupConfig) -> Self {
        Self { service, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let removed = self.service.purge_expired().await;
        CleanupResult {
            expired_entries_deleted: removed,
        }
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals. Returns
    /// `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("OTP cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "OTP cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_cleanup().await;
                if result.expired_entries_deleted > 0 {
                    info!("Removed {} expired OTP entries", result.expired_entries_deleted);
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired entries removed
    pub expired_entries_deleted: usize,
}
