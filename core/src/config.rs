//! Configuration for an `HttpFs` root.
//!
//! The base URL is used verbatim: `http://host/base/` and `http://host/base`
//! resolve relative paths differently (the latter replaces `base`), exactly
//! like a browser resolving links.

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Environment variable read by `HttpFsConfig::from_env`.
pub const BASE_URL_ENV: &str = "HTTPFS_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpFsConfig {
    pub base_url: Url,
}

impl HttpFsConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::from_url(Url::parse(base_url)?)
    }

    pub fn from_url(base_url: Url) -> Result<Self, ConfigError> {
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(base_url));
        }
        Ok(Self { base_url })
    }

    /// Parse `{"base_url": "..."}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Self::from_url(config.base_url)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(BASE_URL_ENV).map_err(|_| ConfigError::MissingEnv(BASE_URL_ENV))?;
        Self::new(&raw)
    }
}
