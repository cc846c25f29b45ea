//! Error types for GraphQL operations.
//!
//! Two layers:
//!
//! - [`GraphQLError`] covers request-level failures that prevent a query from
//!   executing at all and are converted to HTTP responses.
//! - [`ResolveError`] covers field-level failures. They are attached to the
//!   GraphQL response next to the partial `data`, so sibling fields still
//!   resolve.

use std::fmt;

use async_graphql::ErrorExtensions;
use hubql_upstream::{ErrorCategory, UpstreamError};

/// Errors that can occur before or around query execution.
#[derive(Debug)]
pub enum GraphQLError {
    /// Schema is still being built - client should retry.
    SchemaInitializing,

    /// Schema build failed.
    SchemaBuildFailed(String),

    /// Invalid request (missing query, unparseable variables).
    InvalidQuery(String),

    /// Internal server error.
    Internal(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaInitializing => {
                write!(f, "GraphQL schema is initializing, please retry")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "Failed to build GraphQL schema: {msg}")
            }
            Self::InvalidQuery(msg) => {
                write!(f, "Invalid GraphQL request: {msg}")
            }
            Self::Internal(msg) => {
                write!(f, "Internal error: {msg}")
            }
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::SchemaInitializing => 503,
            Self::SchemaBuildFailed(_) => 500,
            Self::InvalidQuery(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaInitializing => "SCHEMA_INITIALIZING",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the Retry-After header value in seconds, if applicable.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::SchemaInitializing => Some(5),
            _ => None,
        }
    }

    /// Renders the error as a GraphQL-shaped JSON body.
    #[must_use]
    pub fn to_response_body(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": [{
                "message": self.to_string(),
                "extensions": {
                    "code": self.error_code()
                }
            }]
        })
    }
}

/// Errors raised while resolving a single field.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The outbound GET failed (network error or non-2xx status).
    #[error("Upstream fetch failed: {source}")]
    UpstreamFetch {
        /// The underlying client error.
        #[source]
        source: UpstreamError,
    },

    /// A templated URL on the parent object lacks the expected placeholder syntax.
    #[error("Malformed URL template in '{field}': {template}")]
    MalformedTemplate {
        /// The parent field holding the template.
        field: String,
        /// The offending template.
        template: String,
    },

    /// The upstream body was not valid JSON or had the wrong shape.
    #[error("Could not decode upstream response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// The parent object has no usable URL for a relational field.
    #[error("Parent object has no '{field}' URL")]
    MissingField {
        /// The missing parent field.
        field: String,
    },

    /// A URL could not be parsed or extended.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Description of the parse failure.
        message: String,
    },

    /// A field argument was out of range or of the wrong type.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// The argument name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The per-request context was not attached to the GraphQL request.
    #[error("GraphQL context not available")]
    Context,
}

impl ResolveError {
    /// Creates a new `MalformedTemplate` error.
    #[must_use]
    pub fn malformed_template(field: impl Into<String>, template: impl Into<String>) -> Self {
        Self::MalformedTemplate {
            field: field.into(),
            template: template.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a new `MissingField` error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a new `InvalidUrl` error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new `InvalidArgument` error.
    #[must_use]
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns the error code placed in `extensions.code`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UpstreamFetch { .. } => "UPSTREAM_FETCH_ERROR",
            Self::MalformedTemplate { .. } => "MALFORMED_TEMPLATE",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::Context => "INTERNAL_ERROR",
        }
    }
}

impl From<UpstreamError> for ResolveError {
    fn from(err: UpstreamError) -> Self {
        match err.category() {
            ErrorCategory::Decode => Self::decode(err.to_string()),
            ErrorCategory::Fetch | ErrorCategory::Configuration => {
                Self::UpstreamFetch { source: err }
            }
        }
    }
}

impl ErrorExtensions for ResolveError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            if let Self::UpstreamFetch { source } = self
                && let Some(status) = source.http_status()
            {
                ext.set("upstreamStatus", i32::from(status));
            }
        })
    }
}
