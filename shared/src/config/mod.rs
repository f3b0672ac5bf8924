//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - OTP store backend and Redis configuration
//! - `environment` - Environment detection and logging configuration
//! - `notification` - In-app notification and SMS delivery configuration
//! - `otp` - One-time password policy
//! - `server` - HTTP server configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `config/<environment>.toml` file, then `APP__SECTION__KEY` environment
//! variables.

pub mod cache;
pub mod environment;
pub mod notification;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use cache::{CacheConfig, StoreBackend, StoreConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{NotificationConfig, SmsConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Prefix for environment variable overrides (`APP__OTP__TTL_SECONDS`)
pub const ENV_PREFIX: &str = "APP";

/// Separator between nested keys in environment variable overrides
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while assembling the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// One-time password policy
    #[serde(default)]
    pub otp: OtpConfig,

    /// OTP store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Notification channels
    #[serde(default)]
    pub notification: NotificationConfig,

    /// SMS provider settings
    #[serde(default)]
    pub sms: SmsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Create the built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            server: ServerConfig::default(),
            logging: LoggingConfig::for_environment(environment),
            otp: OtpConfig::default(),
            store: StoreConfig::default(),
            notification: NotificationConfig::default(),
            sms: SmsConfig::default(),
        }
    }

    /// Load configuration from defaults, the environment's config file and
    /// environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let path = format!("config/{}", environment.config_file());
        Self::load_from(environment, &path)
    }

    /// Load configuration using an explicit environment and config file path
    ///
    /// The file is optional; a missing file leaves the defaults in place.
    pub fn load_from(environment: Environment, path: &str) -> Result<Self, ConfigError> {
        let defaults = Self::for_environment(environment);

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the OTP service unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.otp.ttl_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "otp.ttl_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.otp.ttl_seconds > otp::MAX_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                field: "otp.ttl_seconds".to_string(),
                message: format!("must not exceed {} seconds", otp::MAX_TTL_SECONDS),
            });
        }
        if self.otp.cleanup_enabled && self.otp.cleanup_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "otp.cleanup_interval_seconds".to_string(),
                message: "must be greater than zero when cleanup is enabled".to_string(),
            });
        }
        if self.notification.channel_list().is_empty() {
            return Err(ConfigError::Invalid {
                field: "notification.channels".to_string(),
                message: "at least one channel is required".to_string(),
            });
        }
        Ok(())
    }
}
