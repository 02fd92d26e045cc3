//! Client configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::api::{ApiConfig, DEFAULT_BASE_URL};

/// Environment variable holding the planner API base URL.
pub const ENV_API_URL: &str = "PLANNER_API_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PLANNER_TIMEOUT_SECS";
/// Environment variable holding the default list page size.
pub const ENV_PAGE_SIZE: &str = "PLANNER_PAGE_SIZE";
/// Environment variable holding the web listen address.
pub const ENV_LISTEN_ADDR: &str = "PLANNER_LISTEN_ADDR";

/// A malformed configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Everything the client needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Planner API base URL, without trailing slash.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Rows per page when a list view mounts.
    pub page_size: u32,

    /// Quiet period after a typeahead keystroke before the lookup is sent.
    /// Zero disables debouncing.
    pub lookup_debounce: Duration,

    /// Maximum typeahead candidates per lookup.
    pub lookup_limit: u32,

    /// Address the web surface binds to.
    pub listen_addr: SocketAddr,
}

impl ClientConfig {
    /// Create a configuration for the given API base URL with defaults
    /// for everything else.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from `lookup`, which maps variable names to
    /// values. Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse(ENV_TIMEOUT_SECS, "number of seconds", &value)?;
        }
        if let Some(value) = lookup(ENV_PAGE_SIZE) {
            config.page_size = parse(ENV_PAGE_SIZE, "page size", &value)?;
            if config.page_size == 0 {
                return Err(ConfigError::Zero { var: ENV_PAGE_SIZE });
            }
        }
        if let Some(value) = lookup(ENV_LISTEN_ADDR) {
            config.listen_addr = parse(ENV_LISTEN_ADDR, "socket address", &value)?;
        }

        Ok(config)
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the page size list views mount with.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set typeahead debounce.
    pub fn with_lookup_debounce(mut self, debounce: Duration) -> Self {
        self.lookup_debounce = debounce;
        self
    }

    /// Set maximum typeahead candidates.
    pub fn with_lookup_limit(mut self, limit: u32) -> Self {
        self.lookup_limit = limit;
        self
    }

    /// Set the web listen address.
    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    /// The subset the HTTP client needs.
    pub fn api(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url).with_timeout(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            page_size: 10,
            lookup_debounce: Duration::from_millis(250),
            lookup_limit: 10,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    expected: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        expected,
        value: value.to_string(),
    })
}
