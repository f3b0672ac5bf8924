//! Deployment environment and the logging defaults derived from it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variable naming the deployment environment
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Where the service is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Development relaxes CORS and logs verbosely
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Read [`ENVIRONMENT_VAR`], falling back to development when unset or unknown
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Per-environment overrides file under `config/`
    pub fn config_file(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Unknown environment: {}", other)),
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Annotate events with file and line
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Verbose pretty output in development, JSON elsewhere
    pub fn for_environment(environment: Environment) -> Self {
        let (level, format) = match environment {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };
        Self {
            level: level.to_string(),
            format,
            source_location: environment.is_development(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(" Prod ".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("stage".parse::<Environment>(), Ok(Environment::Staging));
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_config_file_follows_name() {
        assert_eq!(Environment::Staging.config_file(), "staging.toml");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn test_logging_defaults() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!((dev.level.as_str(), dev.format), ("debug", LogFormat::Pretty));
        assert!(dev.source_location);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!((prod.level.as_str(), prod.format), ("warn", LogFormat::Json));
        assert!(!prod.source_location);
    }
}
