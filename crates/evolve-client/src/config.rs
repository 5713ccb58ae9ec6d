//! Client configuration
//!
//! The backend location is always passed in explicitly; nothing in the
//! client reads a global.

use evolve_core::{EvolveError, Result};
use reqwest::Url;

pub const API_URL_ENV: &str = "EVOLVE_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Validates and normalises a base URL (surrounding whitespace and
    /// trailing slashes are dropped).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| EvolveError::InvalidConfig {
            reason: format!("base URL '{trimmed}' is not a valid URL: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EvolveError::InvalidConfig {
                reason: format!("base URL '{trimmed}' must use http or https"),
            });
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads `EVOLVE_API_URL`, falling back to the local default.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalised() {
        let config = ClientConfig::new(" https://backend.example.com/ ").unwrap();
        assert_eq!(config.base_url(), "https://backend.example.com");
        assert_eq!(config.url("/agents"), "https://backend.example.com/agents");
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(EvolveError::InvalidConfig { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://backend.example.com"),
            Err(EvolveError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_API_URL);
    }
}
