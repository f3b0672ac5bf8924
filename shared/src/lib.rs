//! Shared utilities and common types for the payment voucher server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - API response envelope
//! - Utility functions (phone formatting, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, ConfigError, Environment, LogFormat, LoggingConfig,
    NotificationConfig, OtpConfig, ServerConfig, SmsConfig, StoreBackend, StoreConfig,
};
pub use types::ApiResponse;
pub use utils::phone;
