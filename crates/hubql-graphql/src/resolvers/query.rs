//! Query root resolvers.
//!
//! Implements `Query.user(login:)` and `Query.repo(owner:, name:)`, the
//! entry points that fetch the first payload every other field walks from.

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::debug;

use super::templates::api_url;
use super::{fetch_object, get_graphql_context, null_on_error};
use crate::error::ResolveError;

/// Resolvers for the root `Query` fields.
pub struct QueryResolver;

impl QueryResolver {
    /// Creates the resolver for `user(login: String!)`.
    pub fn user() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let result = resolve_user(&ctx).await;
                Ok(null_on_error(&ctx, result))
            })
        }
    }

    /// Creates the resolver for `repo(owner: String!, name: String!)`.
    pub fn repo() -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        |ctx| {
            FieldFuture::new(async move {
                let result = resolve_repo(&ctx).await;
                Ok(null_on_error(&ctx, result))
            })
        }
    }
}

async fn resolve_user(ctx: &ResolverContext<'_>) -> Result<Option<Value>, ResolveError> {
    let login = required_string(ctx, "login")?;
    let gql_ctx = get_graphql_context(ctx)?;

    debug!(request_id = %gql_ctx.request_id, login = %login, "Resolving user");

    let url = api_url(&gql_ctx.api_base, &["users", login])?;
    fetch_object(gql_ctx, &url).await
}

async fn resolve_repo(ctx: &ResolverContext<'_>) -> Result<Option<Value>, ResolveError> {
    let owner = required_string(ctx, "owner")?;
    let name = required_string(ctx, "name")?;
    let gql_ctx = get_graphql_context(ctx)?;

    debug!(request_id = %gql_ctx.request_id, owner = %owner, name = %name, "Resolving repo");

    let url = api_url(&gql_ctx.api_base, &["repos", owner, name])?;
    fetch_object(gql_ctx, &url).await
}

fn required_string<'a>(ctx: &'a ResolverContext<'_>, name: &str) -> Result<&'a str, ResolveError> {
    let value = ctx
        .args
        .try_get(name)
        .and_then(|v| v.string())
        .map_err(|e| ResolveError::invalid_argument(name, e.message))?;

    if value.is_empty() {
        return Err(ResolveError::invalid_argument(name, "must not be empty"));
    }
    Ok(value)
}
