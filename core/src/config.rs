//! Gateway configuration.
//!
//! Values come from the environment when present, otherwise defaults:
//! - `CONTACTS_API_BASE_URL` (default `http://localhost:3000`)
//! - `CONTACTS_API_TIMEOUT_SECS` (unset means the transport default)

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const BASE_URL_VAR: &str = "CONTACTS_API_BASE_URL";
const TIMEOUT_VAR: &str = "CONTACTS_API_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR });
            }
            config.base_url = url.to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_set() {
        let config = GatewayConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn reads_base_url_and_timeout() {
        let config = GatewayConfig::from_lookup(|key| match key {
            "CONTACTS_API_BASE_URL" => Some("https://crm.example.com/api".to_string()),
            "CONTACTS_API_TIMEOUT_SECS" => Some(" 15 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "https://crm.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn builder_sets_timeout() {
        let config = GatewayConfig::new("http://crm.test").with_timeout(Duration::from_secs(3));
        assert_eq!(config.base_url, "http://crm.test");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = GatewayConfig::from_lookup(|key| {
            (key == "CONTACTS_API_TIMEOUT_SECS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn rejects_blank_base_url() {
        let err = GatewayConfig::from_lookup(|key| {
            (key == "CONTACTS_API_BASE_URL").then(|| "   ".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::EmptyBaseUrl { var: "CONTACTS_API_BASE_URL" });
    }
}
