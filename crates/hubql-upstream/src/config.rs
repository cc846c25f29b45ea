//! Upstream client configuration.
//!
//! Specified in `hubql.toml` under the `[github]` section.
//!
//! # Example Configuration
//!
//! ```toml
//! [github]
//! api_base = "https://api.github.com"
//! user_agent = "hubql"
//! timeout_ms = 30000
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Settings for the outbound GitHub API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL used by the query root (`/users/{login}`, `/repos/{owner}/{name}`).
    /// Relational fields follow the URLs embedded in payloads instead.
    /// Default: `https://api.github.com`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// `User-Agent` header sent with every request. GitHub rejects requests without one.
    /// Default: `hubql/<version>`
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in milliseconds. `0` disables the timeout.
    /// Default: 30000
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("hubql/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    /// Returns the configured request timeout, `None` when disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Parses `api_base` into a URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_base` is not an absolute http(s) URL.
    pub fn api_base_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| format!("github.api_base is not a valid URL: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("github.api_base must use http or https".into());
        }
        Ok(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.api_base_url()?;
        if self.user_agent.trim().is_empty() {
            return Err("github.user_agent must not be empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UpstreamConfig::default();
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.user_agent.starts_with("hubql/"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = UpstreamConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_invalid_api_base() {
        let mut config = UpstreamConfig::default();
        config.api_base = "not a url".into();
        assert!(config.validate().is_err());

        config.api_base = "ftp://example.com".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = UpstreamConfig::default();
        config.user_agent = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            api_base = "http://localhost:9999"
            timeout_ms = 500
        "#;

        let config: UpstreamConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_base, "http://localhost:9999");
        assert_eq!(config.timeout_ms, 500);
        assert!(config.user_agent.starts_with("hubql/"));
    }
}
