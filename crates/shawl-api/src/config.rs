//! # Backend Configuration
//!
//! The backend address is an explicit value injected at construction.
//! There is deliberately no module-level default and no implicit
//! environment lookup: whoever builds the client decides where it
//! points, once, at process start.

use thiserror::Error;
use url::Url;

/// Configuration for the inventory backend client.
///
/// ## Recognized options
/// - `backend_url`: address of the inventory service, e.g.
///   `https://pos.example.com`. The client appends `/api/...` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
}

impl BackendConfig {
    /// Creates a config from the backend address.
    ///
    /// The address must parse as an absolute http(s) URL. A trailing
    /// slash is stripped so path joining stays predictable.
    pub fn new(backend_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = backend_url.into();
        let parsed = Url::parse(&raw).map_err(|e| ConfigError::InvalidBackendUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::InvalidBackendUrl {
                    url: raw,
                    reason: format!("unsupported scheme '{}'", other),
                })
            }
        }

        Ok(BackendConfig {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend address without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds a full `/api` endpoint URL.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_backend_url() {
        let cfg = BackendConfig::new("https://pos.example.com/").unwrap();
        assert_eq!(cfg.base_url(), "https://pos.example.com");
        assert_eq!(
            cfg.api_url("/products/SH-0001"),
            "https://pos.example.com/api/products/SH-0001"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(BackendConfig::new("not a url").is_err());
        assert!(BackendConfig::new("ftp://pos.example.com").is_err());
    }
}
