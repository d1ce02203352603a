//! Client configuration parsed from environment variables. The binary loads
//! a `.env` file into the environment first, when one exists.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 5;

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: HttpTimeouts,
    pub notice_ttl_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            notice_ttl_secs: DEFAULT_NOTICE_TTL_SECS,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_BASE_URL`: backend origin, default `http://127.0.0.1:5001`
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 120
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHAT_NOTICE_TTL_SECS`: how long inline notices stay visible, default 5
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigParse`] if `CHAT_BASE_URL` is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigParse`] if the base URL is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(lookup("CHAT_BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeouts = HttpTimeouts {
            request_secs: parse_u64(lookup("CHAT_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("CHAT_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let notice_ttl_secs = parse_u64(lookup("CHAT_NOTICE_TTL_SECS"), DEFAULT_NOTICE_TTL_SECS);

        Ok(Self { base_url, timeouts, notice_ttl_secs })
    }

    /// Replace the backend origin, applying the same validation as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigParse`] if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::ConfigParse(format!("invalid CHAT_BASE_URL: {raw}")));
    }
    Ok(trimmed.to_owned())
}
