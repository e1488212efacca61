//! Service configuration, read once from the environment at startup.
//!
//! | Variable                | Default                        |
//! |-------------------------|--------------------------------|
//! | `EASYPOST_API_KEY`      | unset (label requests get 500) |
//! | `EASYPOST_BASE_URL`     | `https://api.easypost.com/v2`  |
//! | `EASYPOST_TIMEOUT_SECS` | `30`                           |
//! | `BIND_ADDR`             | `0.0.0.0:3000`                 |

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use reqwest::Url;
use thiserror::Error;
use crate::easypost::DEFAULT_BASE_URL;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{name}` is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("`{name}` must be a whole number of seconds: {value}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("`{name}` is not a socket address: {value}")]
    InvalidBindAddr { name: &'static str, value: String },
}

/// What the label handler needs at request time.
#[derive(Clone, Default)]
pub struct LabelConfig {
    api_key: Option<String>,
}

impl LabelConfig {
    /// An empty key counts as no key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl fmt::Debug for LabelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub label: LabelConfig,
    pub easypost_base_url: Url,
    pub easypost_timeout: Duration,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// build from any variable source, e.g. a map in tests
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get("EASYPOST_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let easypost_base_url = base_url.parse::<Url>()
            .map_err(|_| ConfigError::InvalidUrl { name: "EASYPOST_BASE_URL", value: base_url.clone() })?;

        let easypost_timeout = match get("EASYPOST_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout { name: "EASYPOST_TIMEOUT_SECS", value })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr { name: "BIND_ADDR", value: bind_addr.clone() })?;

        Ok(
            Self {
                label: LabelConfig::new(get("EASYPOST_API_KEY")),
                easypost_base_url,
                easypost_timeout,
                bind_addr,
            }
        )
    }
}
