//! Outbound fetches for relational fields.

use async_graphql::Value;
use tracing::debug;

use super::json_to_graphql_value;
use crate::context::GraphQLContext;
use crate::error::ResolveError;

/// Fetches a URL that must answer with a JSON array.
///
/// # Errors
///
/// Propagates upstream failures; returns `ResolveError::Decode` if the body
/// is not an array.
pub(crate) async fn fetch_list(gql_ctx: &GraphQLContext, url: &str) -> Result<Value, ResolveError> {
    debug!(request_id = %gql_ctx.request_id, url = %url, "Resolving list field");

    match gql_ctx.upstream.get_json(url).await? {
        json @ serde_json::Value::Array(_) => Ok(json_to_graphql_value(json)),
        other => Err(ResolveError::decode(format!(
            "expected a JSON array from {url}, got {}",
            json_kind(&other)
        ))),
    }
}

/// Fetches a URL that must answer with a JSON object or an empty body.
///
/// An empty body resolves to `None` (a `null` field).
///
/// # Errors
///
/// Propagates upstream failures; returns `ResolveError::Decode` for any
/// other JSON shape.
pub(crate) async fn fetch_object(
    gql_ctx: &GraphQLContext,
    url: &str,
) -> Result<Option<Value>, ResolveError> {
    debug!(request_id = %gql_ctx.request_id, url = %url, "Resolving object field");

    match gql_ctx.upstream.get_json(url).await? {
        serde_json::Value::Null => Ok(None),
        json @ serde_json::Value::Object(_) => Ok(Some(json_to_graphql_value(json))),
        other => Err(ResolveError::decode(format!(
            "expected a JSON object from {url}, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
