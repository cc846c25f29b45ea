//! Field descriptors shared by several object types.
//!
//! Each function returns a pure [`Field`] value at schema construction time;
//! the outbound GET happens only when a query selects the field, once per
//! selection.

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, InputValue, ResolverContext, TypeRef};
use tracing::trace;

use super::OWNER_REPO_INFO;
use crate::error::ResolveError;
use crate::resolvers::templates::{DEFAULT_PAGE, expand_following_url, strip_url_template, with_page};
use crate::resolvers::{fetch_list, fetch_object, get_graphql_context, null_on_error, parent_url};

/// Creates the `following_url` field.
///
/// The parent's `following_url` template is expanded with the optional
/// `user` argument and fetched. The field is typed as `target`, the type
/// declaring it (`UserInfo` or `OwnerRepoInfo`).
pub fn following_url(target: &'static str) -> Field {
    Field::new("following_url", TypeRef::named(target), |ctx| {
        FieldFuture::new(async move {
            let result = resolve_following_url(&ctx).await;
            Ok(null_on_error(&ctx, result))
        })
    })
    .description("Account looked up through the `following_url` template")
    .argument(
        InputValue::new("user", TypeRef::named(TypeRef::STRING))
            .description("Login substituted into the template placeholder; omitted means empty"),
    )
}

/// Creates the `users_following` field: one page of accounts the parent follows.
pub fn users_following() -> Field {
    paged_account_list(
        "users_following",
        "following_url",
        "Accounts this user follows",
    )
}

/// Creates the `user_followers` field: one page of accounts following the parent.
pub fn user_followers() -> Field {
    paged_account_list(
        "user_followers",
        "followers_url",
        "Accounts following this user",
    )
}

fn paged_account_list(name: &'static str, source: &'static str, description: &'static str) -> Field {
    Field::new(name, TypeRef::named_list(OWNER_REPO_INFO), move |ctx| {
        FieldFuture::new(async move {
            let result = resolve_paged_list(&ctx, source).await.map(Some);
            Ok(null_on_error(&ctx, result))
        })
    })
    .description(description)
    .argument(
        InputValue::new("page", TypeRef::named(TypeRef::INT))
            .description("Page of results to fetch, starting at 1")
            .default_value(Value::from(DEFAULT_PAGE)),
    )
}

async fn resolve_following_url(ctx: &ResolverContext<'_>) -> Result<Option<Value>, ResolveError> {
    let template = parent_url(ctx, "following_url")?;
    let user = ctx.args.get("user").and_then(|v| v.string().ok());
    let url = expand_following_url(template, user)?;

    trace!(template = %template, user = ?user, url = %url, "Expanded following_url");

    let gql_ctx = get_graphql_context(ctx)?;
    fetch_object(gql_ctx, &url).await
}

async fn resolve_paged_list(ctx: &ResolverContext<'_>, source: &str) -> Result<Value, ResolveError> {
    let page = page_argument(ctx)?;
    let base = strip_url_template(parent_url(ctx, source)?);
    let url = with_page(base, page)?;

    let gql_ctx = get_graphql_context(ctx)?;
    fetch_list(gql_ctx, &url).await
}

/// Reads `page`, falling back to the first page when omitted or null.
fn page_argument(ctx: &ResolverContext<'_>) -> Result<i64, ResolveError> {
    match ctx.args.get("page") {
        Some(value) if !value.is_null() => value
            .i64()
            .map_err(|e| ResolveError::invalid_argument("page", e.message)),
        _ => Ok(DEFAULT_PAGE),
    }
}
