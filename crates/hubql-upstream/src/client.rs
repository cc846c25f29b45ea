//! `reqwest`-backed upstream client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::traits::UpstreamClient;

/// Media type requesting the GitHub REST v3 representation.
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

/// Upstream client that issues plain GET requests with `reqwest`.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestUpstream {
    http_client: reqwest::Client,
}

impl ReqwestUpstream {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Client` if the user agent is not a valid
    /// header value or the TLS backend cannot be initialised.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| UpstreamError::client(format!("invalid user agent: {e}")))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_V3_ACCEPT));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| UpstreamError::client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl UpstreamClient for ReqwestUpstream {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(url = %url, "Fetching upstream resource");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Upstream request failed");
            UpstreamError::transport(url, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(url, e.to_string()))?;

        // 204 and friends carry no payload
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&body).map_err(|e| UpstreamError::decode(url, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_defaults() {
        assert!(ReqwestUpstream::new(&UpstreamConfig::default()).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_user_agent() {
        let config = UpstreamConfig {
            user_agent: "bad\nagent".into(),
            ..Default::default()
        };
        let err = ReqwestUpstream::new(&config).unwrap_err();
        assert!(matches!(err, UpstreamError::Client { .. }));
    }
}
