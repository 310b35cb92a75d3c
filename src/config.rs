use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{DEFAULT_PROXY_URL, PREVIEW_USER_AGENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Link previews
    pub preview_enabled: bool,
    pub proxy_url: String,
    pub user_agent: String,
    /// `None` means an attempt only ends by completing or being cancelled.
    pub fetch_timeout: Option<Duration>,

    // Feed data
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = parse_env_u64("PREVIEW_FETCH_TIMEOUT_SECS", 0)?;

        Ok(Self {
            // Link previews
            preview_enabled: parse_env_bool("PREVIEW_ENABLED", true)?,
            proxy_url: env_or_default("PREVIEW_PROXY_URL", DEFAULT_PROXY_URL),
            user_agent: env_or_default("PREVIEW_USER_AGENT", PREVIEW_USER_AGENT),
            fetch_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),

            // Feed data
            snapshot_path: optional_env("SIDEBAR_SNAPSHOT_PATH").map(PathBuf::from),
        })
    }

    /// Configuration suitable for tests: defaults everywhere, bundled snapshot.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            preview_enabled: true,
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            user_agent: PREVIEW_USER_AGENT.to_string(),
            fetch_timeout: None,
            snapshot_path: None,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.proxy_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::InvalidValue {
                    name: "PREVIEW_PROXY_URL".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidValue {
                    name: "PREVIEW_PROXY_URL".to_string(),
                    message: e.to_string(),
                });
            }
        }
        if self.user_agent.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "PREVIEW_USER_AGENT".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}
