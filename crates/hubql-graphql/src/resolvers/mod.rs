//! Resolver glue shared by the object types.
//!
//! - `templates`: pure URL derivation from templated parent URLs
//! - `fetch`: outbound GET through the injected client, with shape checks
//! - `query`: root field resolvers (`user`, `repo`)

mod fetch;
mod query;
pub mod templates;

pub use query::QueryResolver;

pub(crate) use fetch::{fetch_list, fetch_object};

use async_graphql::dynamic::ResolverContext;
use async_graphql::indexmap::IndexMap;
use async_graphql::{ErrorExtensions, Name, Value};

use crate::context::GraphQLContext;
use crate::error::ResolveError;

/// Helper to extract GraphQL context from resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, ResolveError> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| ResolveError::Context)
}

/// Turns a failed resolution into a `null` field plus a path-tagged error.
///
/// Returning `Err` from a dynamic resolver drops the key from `data` and
/// loses the error path, so failures are recorded on the context instead.
pub(crate) fn null_on_error<T>(
    ctx: &ResolverContext<'_>,
    result: Result<Option<T>, ResolveError>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            let error = e.extend().into_server_error(ctx.ctx.item.pos);
            ctx.ctx.add_error(ctx.ctx.set_error_path(error));
            None
        }
    }
}

/// Returns the parent object, if the parent value is a JSON object.
pub(crate) fn parent_object<'a>(ctx: &'a ResolverContext<'_>) -> Option<&'a IndexMap<Name, Value>> {
    match ctx.parent_value.as_value() {
        Some(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// Reads a key from the parent object. Absent keys yield `None`.
pub(crate) fn parent_field<'a>(ctx: &'a ResolverContext<'_>, key: &str) -> Option<&'a Value> {
    parent_object(ctx).and_then(|obj| obj.get(key))
}

/// Reads a URL-valued key from the parent object.
///
/// # Errors
///
/// Returns `ResolveError::MissingField` if the key is absent, null, or not a string.
pub(crate) fn parent_url<'a>(ctx: &'a ResolverContext<'_>, key: &str) -> Result<&'a str, ResolveError> {
    match parent_field(ctx, key) {
        Some(Value::String(url)) => Ok(url.as_str()),
        _ => Err(ResolveError::missing_field(key)),
    }
}

/// Convert a serde_json::Value to async_graphql::Value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                Value::Number(
                    async_graphql::Number::from_f64(f).unwrap_or_else(|| async_graphql::Number::from(0)),
                )
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let map: IndexMap<Name, Value> = obj
                .into_iter()
                .map(|(k, v)| (Name::new(k), json_to_graphql_value(v)))
                .collect();
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::json_to_graphql_value;
    use async_graphql::{Name, Value};
    use serde_json::json;

    #[test]
    fn test_json_to_graphql_value_primitives() {
        assert!(matches!(json_to_graphql_value(json!(null)), Value::Null));
        assert!(matches!(json_to_graphql_value(json!(true)), Value::Boolean(true)));
        assert!(matches!(json_to_graphql_value(json!("hello")), Value::String(s) if s == "hello"));

        match json_to_graphql_value(json!(583231)) {
            Value::Number(n) => assert_eq!(n.as_i64(), Some(583231)),
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_json_to_graphql_value_complex() {
        let arr = json_to_graphql_value(json!([1, 2, 3]));
        assert!(matches!(arr, Value::List(ref items) if items.len() == 3));

        let obj = json_to_graphql_value(json!({"owner": {"login": "octocat"}}));
        let Value::Object(map) = obj else {
            panic!("expected object");
        };
        let Some(Value::Object(owner)) = map.get(&Name::new("owner")) else {
            panic!("expected nested owner object");
        };
        assert_eq!(
            owner.get(&Name::new("login")),
            Some(&Value::String("octocat".into()))
        );
    }
}
