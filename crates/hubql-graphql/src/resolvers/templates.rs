//! URL derivation helpers.
//!
//! GitHub payloads embed hypermedia links, several of them as RFC 6570-style
//! templates (`https://api.github.com/users/octocat/following{/other_user}`).
//! These helpers turn such strings into concrete, fetchable URLs. They are
//! pure; nothing here performs I/O.

use url::Url;

use crate::error::ResolveError;

/// First page of a paginated listing.
pub const DEFAULT_PAGE: i64 = 1;

/// Resolves a `following_url` template against an optional target user.
///
/// Every `{/name}` path expression is replaced by `/user` (percent-encoded),
/// so `.../following{/other_user}` with `Some("bob")` becomes
/// `.../following/bob`. With `None` or an empty user the expression expands
/// to nothing and `.../following` is fetched.
///
/// # Errors
///
/// Returns `ResolveError::MalformedTemplate` if the template has no
/// expression at all, an unclosed or nested brace, or an expression that is
/// not of the `{/name}` form.
pub fn expand_following_url(template: &str, user: Option<&str>) -> Result<String, ResolveError> {
    let malformed = || ResolveError::malformed_template("following_url", template);
    let segment = user
        .filter(|u| !u.is_empty())
        .map(|u| format!("/{}", urlencoding::encode(u)));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut expanded = false;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(malformed)?;
        let name = after[..end].strip_prefix('/').ok_or_else(malformed)?;
        if name.is_empty() || name.contains('{') {
            return Err(malformed());
        }
        if let Some(segment) = &segment {
            out.push_str(segment);
        }
        expanded = true;
        rest = &after[end + 1..];
    }

    if !expanded || rest.contains('}') {
        return Err(malformed());
    }
    out.push_str(rest);
    Ok(out)
}

/// Drops everything from the first `{` onward.
///
/// A URL without a brace is already concrete and is returned whole.
#[must_use]
pub fn strip_url_template(template: &str) -> &str {
    template.find('{').map_or(template, |idx| &template[..idx])
}

/// Sets the `page` query parameter, keeping any other query pairs.
///
/// # Errors
///
/// Returns `ResolveError::InvalidArgument` if `page` is below 1, and
/// `ResolveError::InvalidUrl` if `url` cannot be parsed.
pub fn with_page(url: &str, page: i64) -> Result<String, ResolveError> {
    if page < DEFAULT_PAGE {
        return Err(ResolveError::invalid_argument(
            "page",
            format!("must be a positive integer, got {page}"),
        ));
    }

    let mut parsed = Url::parse(url).map_err(|e| ResolveError::invalid_url(url, e.to_string()))?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());

    Ok(parsed.into())
}

/// Appends percent-encoded path segments to the API base URL.
///
/// # Errors
///
/// Returns `ResolveError::InvalidUrl` if the base cannot carry a path.
pub fn api_url(base: &Url, segments: &[&str]) -> Result<String, ResolveError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ResolveError::invalid_url(base.as_str(), "cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}
