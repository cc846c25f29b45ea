//! `UserInfo`: a full GitHub user profile.

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, Object, ResolverContext, TypeRef};
use tracing::debug;

use super::owner_repo_info::ACCOUNT_SCALARS;
use super::reference::{following_url, user_followers, users_following};
use super::{DETAILED_REPO_INFO, ScalarKind, USER_INFO, with_scalars};
use crate::error::ResolveError;
use crate::resolvers::templates::strip_url_template;
use crate::resolvers::{fetch_list, get_graphql_context, null_on_error, parent_url};

/// Profile fields present only on the full user payload.
const PROFILE_SCALARS: &[(&str, ScalarKind)] = &[
    ("name", ScalarKind::String),
    ("company", ScalarKind::String),
    ("blog", ScalarKind::String),
    ("location", ScalarKind::String),
    ("email", ScalarKind::String),
    ("hireable", ScalarKind::Boolean),
    ("bio", ScalarKind::String),
    ("public_repos", ScalarKind::Int),
    ("public_gists", ScalarKind::Int),
    ("followers", ScalarKind::Int),
    ("following", ScalarKind::Int),
    ("created_at", ScalarKind::String),
    ("updated_at", ScalarKind::String),
];

/// Creates the `UserInfo` object type.
pub fn object() -> Object {
    let obj = Object::new(USER_INFO).description("Basic information on a GitHub user");
    let obj = with_scalars(with_scalars(obj, ACCOUNT_SCALARS), PROFILE_SCALARS);

    obj.field(following_url(USER_INFO))
        .field(users_following())
        .field(user_followers())
        .field(repos())
        .field(starred_repos())
}

fn repos() -> Field {
    Field::new("repos", TypeRef::named_list(DETAILED_REPO_INFO), |ctx| {
        FieldFuture::new(async move {
            let result = resolve_repos(&ctx).await.map(Some);
            Ok(null_on_error(&ctx, result))
        })
    })
    .description("Fields about the user's repos")
}

fn starred_repos() -> Field {
    Field::new("starred_repos", TypeRef::named_list(DETAILED_REPO_INFO), |ctx| {
        FieldFuture::new(async move {
            let result = resolve_starred_repos(&ctx).await.map(Some);
            Ok(null_on_error(&ctx, result))
        })
    })
    .description("Fields about the repos the user starred")
}

async fn resolve_repos(ctx: &ResolverContext<'_>) -> Result<Value, ResolveError> {
    let url = parent_url(ctx, "repos_url")?;
    let gql_ctx = get_graphql_context(ctx)?;
    fetch_list(gql_ctx, url).await
}

async fn resolve_starred_repos(ctx: &ResolverContext<'_>) -> Result<Value, ResolveError> {
    let template = parent_url(ctx, "starred_url")?;
    let url = strip_url_template(template);
    if url.len() == template.len() {
        debug!(starred_url = %template, "starred_url carries no template, fetching as-is");
    }

    let gql_ctx = get_graphql_context(ctx)?;
    fetch_list(gql_ctx, url).await
}
