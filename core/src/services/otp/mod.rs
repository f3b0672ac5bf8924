//! One-time password service module
//!
//! This module provides the OTP workflow:
//! - Code generation and issuance bound to an identifier
//! - Single-use verification with lazy expiry
//! - Delivery through a pluggable notification sink
//! - Background sweeping of expired entries

mod cleanup;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, OtpCleanupConfig, OtpCleanupService};
pub use config::{DeliveryFailurePolicy, OtpServiceConfig};
pub use service::OtpService;
pub use traits::{NotificationSink, OtpStore};
pub use types::{NotificationKind, OtpNotification, SendOtpResult};
