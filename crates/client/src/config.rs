use std::env;
use std::time::Duration;

/// Trading backend used when `NEXT_PUBLIC_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Market proxy used when `MEMEDEX_PROXY_URL` is unset.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3001";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Base URLs for the two services the front end talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub proxy_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_url: non_empty("NEXT_PUBLIC_API_URL").unwrap_or(defaults.api_url),
            proxy_url: non_empty("MEMEDEX_PROXY_URL").unwrap_or(defaults.proxy_url),
            timeout: defaults.timeout,
        }
    }
}
