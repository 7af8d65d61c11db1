//! Client configuration.
//!
//! The host override is an explicit value handed to the executor. Missing
//! fields fall back to `ClientConfig::default()` when deserialized.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ApiError, Result};

pub const DEFAULT_HOST: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable consulted by `ClientConfig::from_env`.
pub const HOST_ENV: &str = "DEVOPS_HOST";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to.
    pub host: String,

    /// Upper bound on a single request, connect through body read.
    #[serde(with = "secs")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Default configuration with an optional host override.
    pub fn with_host(host: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(host) = host {
            config.host = host.to_string();
        }
        config
    }

    /// Reads the host override from `DEVOPS_HOST`, if set and non-empty.
    pub fn from_env() -> Self {
        let host = std::env::var(HOST_ENV).ok().filter(|h| !h.trim().is_empty());
        Self::with_host(host.as_deref())
    }

    /// Host without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        let host = self.base_url();
        if host.trim().is_empty() {
            return Err(ApiError::Config("host must not be empty".to_string()));
        }
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "host must start with http:// or https://, got {host}"
            )));
        }
        if self.timeout.is_zero() {
            return Err(ApiError::Config("timeout must be > 0".to_string()));
        }
        Ok(())
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
