//! Turning raw `href` values into absolute candidate URLs.
//!
//! A reference is split into its generic URI components and only the missing
//! pieces are borrowed from the page: an empty authority takes the page's
//! authority, an empty scheme takes the page's scheme. Everything else is kept
//! exactly as written, so a CDN reference keeps its own host and a relative
//! path resolves against the host root of the page.
//!
//! ```rust
//! use grabicon::normalize::absolute_url;
//! use url::Url;
//!
//! let base = Url::parse("https://example.com/blog/post").unwrap();
//! assert_eq!(absolute_url("/favicon.ico", &base), "https://example.com/favicon.ico");
//! assert_eq!(absolute_url("static/icon.ico", &base), "https://example.com/static/icon.ico");
//! assert_eq!(absolute_url("//cdn.example.net/i.png", &base), "https://cdn.example.net/i.png");
//! ```

use url::{Position, Url};

/// Generic URI components, borrowed from the input without decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Parts<'a> {
    scheme: &'a str,
    netloc: &'a str,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

/// Resolve `raw` into an absolute URL string anchored to `base`.
///
/// Never fails: malformed or empty references still produce a string, which
/// simply fails later when fetched.
#[must_use]
pub fn absolute_url(raw: &str, base: &Url) -> String {
    let mut parts = split(raw.trim());

    if parts.netloc.is_empty() {
        parts.netloc = &base[Position::BeforeUsername..Position::AfterPort];
    }
    if parts.scheme.is_empty() {
        parts.scheme = base.scheme();
    }

    join(&parts)
}

fn split(reference: &str) -> Parts<'_> {
    let mut parts = Parts::default();
    let mut rest = reference;

    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        if is_scheme(candidate) {
            parts.scheme = candidate;
            rest = &rest[colon + 1..];
        }
    }

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let end = after_slashes
            .find(['/', '?', '#'])
            .unwrap_or(after_slashes.len());
        parts.netloc = &after_slashes[..end];
        rest = &after_slashes[end..];
    }

    if let Some(hash) = rest.find('#') {
        parts.fragment = &rest[hash + 1..];
        rest = &rest[..hash];
    }

    if let Some(question) = rest.find('?') {
        parts.query = &rest[question + 1..];
        rest = &rest[..question];
    }

    parts.path = rest;
    parts
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn join(parts: &Parts<'_>) -> String {
    let mut out = String::with_capacity(
        parts.scheme.len() + parts.netloc.len() + parts.path.len() + parts.query.len() + 8,
    );

    out.push_str(parts.scheme);
    out.push_str("://");
    out.push_str(parts.netloc);
    if !parts.path.is_empty() && !parts.path.starts_with('/') {
        out.push('/');
    }
    out.push_str(parts.path);
    if !parts.query.is_empty() {
        out.push('?');
        out.push_str(parts.query);
    }
    if !parts.fragment.is_empty() {
        out.push('#');
        out.push_str(parts.fragment);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:8080/some/page").unwrap()
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            absolute_url("/static/icon.ico", &base()),
            "http://127.0.0.1:8080/static/icon.ico"
        );
    }

    #[test]
    fn test_relative_resolves_against_host_root() {
        assert_eq!(
            absolute_url("static/icon.ico", &base()),
            "http://127.0.0.1:8080/static/icon.ico"
        );
    }

    #[test]
    fn test_protocol_relative_keeps_host() {
        assert_eq!(
            absolute_url("//cdn.example.com/icon.png", &base()),
            "http://cdn.example.com/icon.png"
        );
    }

    #[test]
    fn test_absolute_left_untouched() {
        assert_eq!(
            absolute_url("https://cdn.example.com/a/icon.png?v=2", &base()),
            "https://cdn.example.com/a/icon.png?v=2"
        );
    }

    #[test]
    fn test_query_and_fragment_preserved() {
        assert_eq!(
            absolute_url("/icon.png?v=3#frag", &base()),
            "http://127.0.0.1:8080/icon.png?v=3#frag"
        );
    }

    #[test]
    fn test_empty_reference_points_at_host() {
        assert_eq!(absolute_url("", &base()), "http://127.0.0.1:8080");
        assert_eq!(absolute_url("   ", &base()), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_userinfo_carried_over() {
        let base = Url::parse("https://user:pw@example.com:8443/").unwrap();
        assert_eq!(
            absolute_url("/favicon.ico", &base),
            "https://user:pw@example.com:8443/favicon.ico"
        );
    }

    #[test]
    fn test_non_http_scheme_gets_host_backfilled() {
        // Nonsensical, but must not panic; the fetch stage drops it.
        assert_eq!(
            absolute_url("data:image/png;base64,AAAA", &base()),
            "data://127.0.0.1:8080/image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            absolute_url("  /favicon.ico\n", &base()),
            "http://127.0.0.1:8080/favicon.ico"
        );
    }

    #[test]
    fn test_https_page_gives_https_candidates() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            absolute_url("/apple-touch-icon.png", &base),
            "https://example.com/apple-touch-icon.png"
        );
    }

    #[test]
    fn test_split_components() {
        let parts = split("https://host:1/p/a?q=1#f");
        assert_eq!(
            parts,
            Parts {
                scheme: "https",
                netloc: "host:1",
                path: "/p/a",
                query: "q=1",
                fragment: "f",
            }
        );
    }

    #[test]
    fn test_colon_in_path_is_not_a_scheme() {
        let parts = split("/a:b/icon.png");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.path, "/a:b/icon.png");
    }

    proptest! {
        #[test]
        fn prop_never_panics_and_is_anchored(raw in "\\PC*") {
            let resolved = absolute_url(&raw, &base());
            prop_assert!(resolved.contains("://"));
        }

        #[test]
        fn prop_rooted_paths_stay_on_page_host(path in "/[a-z0-9_.-]{1,10}(/[a-z0-9_.-]{1,10}){0,3}") {
            let resolved = absolute_url(&path, &base());
            prop_assert_eq!(resolved, format!("http://127.0.0.1:8080{path}"));
        }
    }
}
