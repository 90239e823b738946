//! Client configuration
//!
//! The base URL of the REST API is read once at startup from the
//! environment. Endpoints are derived from it by joining relative paths.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_ENV: &str = "PROFESSIONALS_API_URL";
pub const TIMEOUT_ENV: &str = "PROFESSIONALS_API_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the professionals API lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Always ends with `/` so relative joins append instead of replace
    base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}/professionals/`
    pub fn professionals_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join("professionals/")
    }

    /// `{base_url}/professionals/bulk`
    pub fn bulk_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join("professionals/bulk")
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::OpaqueBaseUrl(trimmed.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
