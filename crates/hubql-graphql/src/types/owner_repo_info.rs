//! `OwnerRepoInfo`: the account summary GitHub embeds in repo listings.

use async_graphql::dynamic::Object;

use super::reference::{following_url, user_followers, users_following};
use super::{OWNER_REPO_INFO, ScalarKind, with_scalars};

/// Identity and link fields shared by every account representation.
pub(crate) const ACCOUNT_SCALARS: &[(&str, ScalarKind)] = &[
    ("login", ScalarKind::String),
    ("id", ScalarKind::Int),
    ("avatar_url", ScalarKind::String),
    ("gravatar_id", ScalarKind::String),
    ("url", ScalarKind::String),
    ("html_url", ScalarKind::String),
    ("followers_url", ScalarKind::String),
    ("gists_url", ScalarKind::String),
    ("starred_url", ScalarKind::String),
    ("subscriptions_url", ScalarKind::String),
    ("organizations_url", ScalarKind::String),
    ("repos_url", ScalarKind::String),
    ("events_url", ScalarKind::String),
    ("received_events_url", ScalarKind::String),
    ("type", ScalarKind::String),
    ("site_admin", ScalarKind::Boolean),
];

/// Creates the `OwnerRepoInfo` object type.
pub fn object() -> Object {
    let obj = Object::new(OWNER_REPO_INFO).description("Basic information on the owner of a repo");

    with_scalars(obj, ACCOUNT_SCALARS)
        .field(following_url(OWNER_REPO_INFO))
        .field(users_following())
        .field(user_followers())
}
