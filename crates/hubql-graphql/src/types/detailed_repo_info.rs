//! `DetailedRepoInfo`: a GitHub repository.

use async_graphql::dynamic::{Object, TypeRef};

use super::{DETAILED_REPO_INFO, OWNER_REPO_INFO, ScalarKind, passthrough_field, with_scalars};

const REPO_SCALARS: &[(&str, ScalarKind)] = &[
    ("id", ScalarKind::Int),
    ("name", ScalarKind::String),
    ("full_name", ScalarKind::String),
    ("private", ScalarKind::Boolean),
    ("html_url", ScalarKind::String),
    ("description", ScalarKind::String),
    ("fork", ScalarKind::Boolean),
    ("url", ScalarKind::String),
    ("forks_url", ScalarKind::String),
    ("keys_url", ScalarKind::String),
    ("collaborators_url", ScalarKind::String),
    ("teams_url", ScalarKind::String),
    ("hooks_url", ScalarKind::String),
    ("issue_events_url", ScalarKind::String),
    ("events_url", ScalarKind::String),
    ("assignees_url", ScalarKind::String),
    ("branches_url", ScalarKind::String),
    ("tags_url", ScalarKind::String),
    ("blobs_url", ScalarKind::String),
    ("git_tags_url", ScalarKind::String),
    ("git_refs_url", ScalarKind::String),
    ("trees_url", ScalarKind::String),
    ("statuses_url", ScalarKind::String),
    ("languages_url", ScalarKind::String),
    ("stargazers_url", ScalarKind::String),
    ("contributors_url", ScalarKind::String),
    ("subscribers_url", ScalarKind::String),
    ("subscription_url", ScalarKind::String),
    ("commits_url", ScalarKind::String),
    ("git_commits_url", ScalarKind::String),
    ("comments_url", ScalarKind::String),
    ("issue_comment_url", ScalarKind::String),
    ("contents_url", ScalarKind::String),
    ("compare_url", ScalarKind::String),
    ("merges_url", ScalarKind::String),
    ("archive_url", ScalarKind::String),
    ("downloads_url", ScalarKind::String),
    ("issues_url", ScalarKind::String),
    ("pulls_url", ScalarKind::String),
    ("milestones_url", ScalarKind::String),
    ("notifications_url", ScalarKind::String),
    ("labels_url", ScalarKind::String),
    ("releases_url", ScalarKind::String),
    ("deployments_url", ScalarKind::String),
    ("created_at", ScalarKind::String),
    ("updated_at", ScalarKind::String),
    ("pushed_at", ScalarKind::String),
    ("git_url", ScalarKind::String),
    ("ssh_url", ScalarKind::String),
    ("clone_url", ScalarKind::String),
    ("svn_url", ScalarKind::String),
    ("homepage", ScalarKind::String),
    ("size", ScalarKind::Int),
    ("stargazers_count", ScalarKind::Int),
    ("watchers_count", ScalarKind::Int),
    ("language", ScalarKind::String),
    ("has_issues", ScalarKind::Boolean),
    ("has_downloads", ScalarKind::Boolean),
    ("has_wiki", ScalarKind::Boolean),
    ("has_pages", ScalarKind::Boolean),
    ("forks_count", ScalarKind::Int),
    ("mirror_url", ScalarKind::String),
    ("open_issues_count", ScalarKind::Int),
    ("forks", ScalarKind::Int),
    ("open_issues", ScalarKind::Int),
    ("watchers", ScalarKind::Int),
    ("default_branch", ScalarKind::String),
];

/// Creates the `DetailedRepoInfo` object type.
///
/// `owner` is embedded in the repo payload, so it resolves without a fetch.
pub fn object() -> Object {
    let obj = Object::new(DETAILED_REPO_INFO).description("Detailed information on a GitHub repo");

    with_scalars(obj, REPO_SCALARS).field(
        passthrough_field("owner", TypeRef::named(OWNER_REPO_INFO))
            .description("Account owning the repo"),
    )
}
