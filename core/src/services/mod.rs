//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CleanupResult, DeliveryFailurePolicy, NotificationKind, NotificationSink, OtpCleanupConfig,
    OtpCleanupService, OtpNotification, OtpService, OtpServiceConfig, OtpStore, SendOtpResult,
};
