//! The client trait every resolver fetches through.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::UpstreamError;

/// An HTTP client able to GET a URL and decode its JSON body.
///
/// Implementations must be thread-safe (`Send + Sync`) because sibling
/// fields of one query are resolved concurrently and share the handle.
///
/// # Example
///
/// ```ignore
/// use hubql_upstream::{UpstreamClient, UpstreamError};
///
/// async fn login_of(client: &dyn UpstreamClient, url: &str) -> Result<String, UpstreamError> {
///     let user = client.get_json(url).await?;
///     Ok(user["login"].as_str().unwrap_or_default().to_string())
/// }
/// ```
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Performs a GET request and decodes the response body as JSON.
    ///
    /// A successful response with an empty body (e.g. `204 No Content`)
    /// decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Status` for non-2xx responses.
    /// Returns `UpstreamError::Transport` if the request could not be sent or
    /// the body could not be read.
    /// Returns `UpstreamError::Decode` if the body is not valid JSON.
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError>;
}
