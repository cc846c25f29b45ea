//! GraphQL execution context.
//!
//! The context carries everything a resolver may use besides its parent
//! value and arguments: the injected upstream client, the API base URL for
//! root lookups and a request id for log correlation. It is constructed
//! per request and attached to the `async_graphql::Request` as data.
//!
//! # Example
//!
//! ```ignore
//! use hubql_graphql::GraphQLContextBuilder;
//!
//! let context = GraphQLContextBuilder::new()
//!     .with_upstream(upstream.clone())
//!     .with_api_base(api_base.clone())
//!     .with_request_id("req-123")
//!     .build()?;
//! ```

use hubql_upstream::DynUpstream;
use url::Url;

/// Per-request execution context.
///
/// Cheap to clone: the upstream handle is an `Arc`.
#[derive(Clone)]
pub struct GraphQLContext {
    /// Client used for every outbound fetch of this request.
    pub upstream: DynUpstream,

    /// Base URL for the query root lookups.
    pub api_base: Url,

    /// Request ID for tracing and correlation.
    pub request_id: String,
}

impl GraphQLContext {
    /// Creates a new builder for GraphQLContext.
    #[must_use]
    pub fn builder() -> GraphQLContextBuilder {
        GraphQLContextBuilder::default()
    }
}

impl std::fmt::Debug for GraphQLContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLContext")
            .field("api_base", &self.api_base.as_str())
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing GraphQLContext.
///
/// Validates that all required fields are provided before creating the
/// context.
#[derive(Default)]
pub struct GraphQLContextBuilder {
    upstream: Option<DynUpstream>,
    api_base: Option<Url>,
    request_id: Option<String>,
}

impl GraphQLContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upstream client.
    #[must_use]
    pub fn with_upstream(mut self, upstream: DynUpstream) -> Self {
        self.upstream = Some(upstream);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Builds the GraphQLContext.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<GraphQLContext, ContextBuilderError> {
        let upstream = self
            .upstream
            .ok_or(ContextBuilderError::MissingField("upstream"))?;

        let api_base = self
            .api_base
            .ok_or(ContextBuilderError::MissingField("api_base"))?;

        let request_id = self
            .request_id
            .ok_or(ContextBuilderError::MissingField("request_id"))?;

        Ok(GraphQLContext {
            upstream,
            api_base,
            request_id,
        })
    }
}

/// Errors that can occur when building a GraphQLContext.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use hubql_upstream::{UpstreamClient, UpstreamError};

    use super::*;

    struct NullUpstream;

    #[async_trait]
    impl UpstreamClient for NullUpstream {
        async fn get_json(&self, _url: &str) -> Result<serde_json::Value, UpstreamError> {
            Ok(serde_json::Value::Null)
        }
    }

    fn api_base() -> Url {
        Url::parse("https://api.github.com").unwrap()
    }

    #[test]
    fn test_builder_missing_upstream() {
        let result = GraphQLContextBuilder::new()
            .with_api_base(api_base())
            .with_request_id("req-123")
            .build();

        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("upstream"))
        ));
    }

    #[test]
    fn test_builder_missing_request_id() {
        let result = GraphQLContextBuilder::new()
            .with_upstream(Arc::new(NullUpstream))
            .with_api_base(api_base())
            .build();

        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("request_id"))
        ));
    }

    #[test]
    fn test_builder_complete() {
        let ctx = GraphQLContext::builder()
            .with_upstream(Arc::new(NullUpstream))
            .with_api_base(api_base())
            .with_request_id("req-123")
            .build()
            .unwrap();

        assert_eq!(ctx.request_id, "req-123");
        assert_eq!(ctx.api_base.as_str(), "https://api.github.com/");
    }
}
