//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `pv_core`: where pending
//! one-time codes are stored and how they reach their owner.
//!
//! ## Architecture
//!
//! - **Cache**: in-memory and Redis implementations of `OtpStore`
//! - **Notification**: in-app notification center, SMS sink and fan-out
//! - **SMS**: SMS providers (Twilio, mock)
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis-backed store (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)

use std::sync::Arc;

use pv_core::domain::clock::{Clock, SystemClock};
use pv_core::services::otp::{
    NotificationSink, OtpCleanupConfig, OtpCleanupService, OtpService, OtpServiceConfig,
    OtpStore,
};
use pv_shared::config::notification::{CHANNEL_IN_APP, CHANNEL_SMS};
use pv_shared::config::{AppConfig, StoreBackend};

/// Cache module - OTP store implementations
pub mod cache;

/// Notification module - delivery channels for issued codes
pub mod notification;

/// SMS service module - External SMS providers
pub mod sms;

use cache::InMemoryOtpStore;
use notification::{FanoutSink, NotificationCenter, SmsNotificationSink};

/// OTP service wired to trait-object store and sink
pub type DynOtpService = OtpService<dyn OtpStore, dyn NotificationSink>;

/// Cleanup service matching [`DynOtpService`]
pub type DynOtpCleanupService = OtpCleanupService<dyn OtpStore, dyn NotificationSink>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// OTP issuance and verification
    pub otp_service: Arc<DynOtpService>,
    /// In-app notification feed
    pub notification_center: Arc<NotificationCenter>,
    /// Expired entry sweeper (not yet started)
    pub cleanup: Arc<DynOtpCleanupService>,
}

/// Initialize infrastructure services from configuration
///
/// This function sets up:
/// - The OTP store selected by `store.backend`
/// - The notification channels listed in `notification.channels`
/// - The OTP service and its cleanup task (not started)
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    initialize_with_clock(config, Arc::new(SystemClock)).await
}

/// Same as [`initialize`] with an explicit time source
pub async fn initialize_with_clock(
    config: &AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let store = create_store(config).await?;

    let notification_center = Arc::new(NotificationCenter::new(
        clock.clone(),
        config.notification.default_duration_ms,
        config.notification.otp_duration_ms,
    ));

    let mut sinks: Vec<Arc<dyn NotificationSink>> = Vec::new();
    for channel in config.notification.channel_list() {
        match channel.as_str() {
            CHANNEL_IN_APP => sinks.push(notification_center.clone()),
            CHANNEL_SMS => {
                let sms_service = sms::create_sms_service(&config.sms);
                sinks.push(Arc::new(SmsNotificationSink::new(
                    Arc::from(sms_service),
                    &config.sms,
                    config.otp.ttl_minutes(),
                )));
            }
            other => {
                return Err(InfrastructureError::Config(format!(
                    "Unknown notification channel: {}",
                    other
                )));
            }
        }
    }

    let sink: Arc<dyn NotificationSink> = match sinks.len() {
        0 => {
            return Err(InfrastructureError::Config(
                "No notification channel configured".to_string(),
            ))
        }
        1 => sinks.remove(0),
        _ => Arc::new(FanoutSink::new(sinks)),
    };

    let otp_service: Arc<DynOtpService> = Arc::new(OtpService::new(
        store,
        sink,
        clock,
        OtpServiceConfig::from(&config.otp),
    ));

    let cleanup = Arc::new(OtpCleanupService::new(
        otp_service.clone(),
        OtpCleanupConfig::from(&config.otp),
    ));

    tracing::info!(
        backend = ?config.store.backend,
        channels = %config.notification.channels,
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        otp_service,
        notification_center,
        cleanup,
    })
}

/// Create the OTP store selected by configuration
async fn create_store(config: &AppConfig) -> Result<Arc<dyn OtpStore>, InfrastructureError> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryOtpStore::new(config.otp.max_entries))),
        #[cfg(feature = "redis-cache")]
        StoreBackend::Redis => {
            let client = cache::RedisClient::new(config.store.redis.clone()).await?;
            Ok(Arc::new(cache::RedisOtpStore::new(client)))
        }
        #[cfg(not(feature = "redis-cache"))]
        StoreBackend::Redis => Err(InfrastructureError::Config(
            "Redis store requires the redis-cache feature".to_string(),
        )),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Notification delivery error
    #[error("Notification error: {0}")]
    Notification(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
