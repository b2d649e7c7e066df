// src/crawl/urls.rs
// =============================================================================
// URL helpers used by the frontier to decide what is "the same page" and
// what is "the same site".
//
// - normalize: scheme + authority + path, query and fragment dropped
// - same_domain: exact authority comparison against the seed's authority
// - authority: the raw "host[:port]" text of a URL, exactly as written
// - resolve: turns an href found on a page into an absolute URL
//
// The authority is sliced out of the string instead of going through
// url::Url, which lowercases hosts and drops default ports. "Example.test",
// "example.test" and "example.test:443" are three different sites here.
// Url is only used to resolve relative paths.
//
// Everything here is best-effort: a string that doesn't look like a URL is
// never an error, it just won't match anything.
// =============================================================================

use url::{Position, Url};

// A URL split into its raw pieces, nothing re-encoded or re-cased
#[derive(Debug, PartialEq, Eq)]
struct RawUrl<'a> {
    /// Everything before the first '?' or '#'
    head: &'a str,
    scheme: Option<&'a str>,
    /// Text between "//" and the next '/', None when there is no "//"
    authority: Option<&'a str>,
    path: &'a str,
}

fn split(url: &str) -> RawUrl<'_> {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let head = &url[..end];

    let (scheme, rest) = match head.find(':') {
        Some(i) if is_scheme(&head[..i]) => (Some(&head[..i]), &head[i + 1..]),
        _ => (None, head),
    };

    let (authority, path) = match rest.strip_prefix("//") {
        Some(after) => {
            let stop = after.find('/').unwrap_or(after.len());
            (Some(&after[..stop]), &after[stop..])
        }
        None => (None, rest),
    };

    RawUrl {
        head,
        scheme,
        authority,
        path,
    }
}

// ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// Canonical form of a URL used for dedup decisions
//
// Keeps only scheme, authority and path. The scheme is lowercased; the
// authority and path are kept byte for byte. Trailing slashes are left alone,
// so "/page" and "/page/" stay two different pages.
//
// Examples:
//   "https://example.com/a?x=1#top"  -> "https://example.com/a"
//   "https://Example.com:443/Page"   -> "https://Example.com:443/Page"
//   "mailto:me@example.com?subject"  -> "mailto:me@example.com"
//   "not a url"                      -> "not a url"
pub fn normalize(url: &str) -> String {
    let raw = split(url);
    match (raw.scheme, raw.authority) {
        (Some(scheme), Some(authority)) => format!(
            "{}://{}{}",
            scheme.to_ascii_lowercase(),
            authority,
            raw.path
        ),
        // No authority (mailto:, relative, garbage): only strip query and fragment
        _ => raw.head.to_string(),
    }
}

// Raw authority of a URL (userinfo, host and port as written)
//
// None when the URL has no "//" part.
pub fn authority(url: &str) -> Option<&str> {
    split(url).authority
}

// True iff the URL's authority is exactly `domain`
//
// No subdomain matching and no case folding: "www.example.com" and
// "Example.com" are both different from "example.com".
pub fn same_domain(url: &str, domain: &str) -> bool {
    authority(url) == Some(domain)
}

// Resolves an href (relative or absolute) against the page it was found on
//
// Absolute hrefs are returned untouched. Relative ones keep the page's own
// scheme and authority text; only the path is computed by Url::join.
pub fn resolve(base: &str, href: &str) -> Option<String> {
    let href_parts = split(href);
    if href_parts.scheme.is_some() {
        return Some(href.to_string());
    }

    let base_parts = split(base);
    let (Some(scheme), Some(authority)) = (base_parts.scheme, base_parts.authority) else {
        tracing::trace!("Cannot resolve '{}' against non-absolute base {}", href, base);
        return None;
    };

    // Scheme-relative: "//cdn.example.com/x"
    if href_parts.authority.is_some() {
        return Some(format!("{}:{}", scheme, href));
    }

    let joined = match Url::parse(base).and_then(|url| url.join(href)) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Could not resolve '{}' against {}: {}", href, base, e);
            return None;
        }
    };

    Some(format!(
        "{}://{}{}",
        scheme,
        authority,
        &joined[Position::BeforePath..]
    ))
}
