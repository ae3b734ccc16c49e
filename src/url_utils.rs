//! URL Utility Functions
//!
//! Building provider request URLs and resolving the relative links found in
//! scraped pages.

use url::Url;

use crate::error::{Error, Result};

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Convert a relative or absolute URL to absolute form.
///
/// # Returns
/// * The absolute URL string, or the original if resolution fails
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    // Preserve special URLs unchanged
    if url_str.starts_with("javascript:") || url_str.starts_with("mailto:") {
        return url_str.to_string();
    }

    let (is_abs, _) = is_absolute_url(url_str);
    if is_abs {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Parse a provider base URL or a URL built from one.
pub fn parse_url(url_str: &str) -> Result<Url> {
    Url::parse(url_str.trim()).map_err(|e| Error::ParseError(format!("invalid URL {url_str:?}: {e}")))
}

/// Build `base + path` with URL-encoded query pairs.
pub fn build_url(base: &str, path: &str, query: &[(&str, &str)]) -> Result<String> {
    let mut url = parse_url(&format!("{base}{path}"))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}

/// Path segments of `link` below `root`, or `None` when `link` is on a
/// different host or outside `root`'s path.
///
/// `https://x/kjv/` and `https://x/kjv/old-testament/genesis` give
/// `["old-testament", "genesis"]`.
#[must_use]
pub fn segments_below(root: &Url, link: &Url) -> Option<Vec<String>> {
    if root.host_str() != link.host_str() {
        return None;
    }
    let root_segments: Vec<&str> = root
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();
    let link_segments: Vec<&str> = link
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();

    if link_segments.len() < root_segments.len()
        || link_segments[..root_segments.len()] != root_segments[..]
    {
        return None;
    }
    Some(
        link_segments[root_segments.len()..]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    )
}

/// Lowercase and hyphenate: `"King James Version"` -> `"king-james-version"`.
#[must_use]
pub fn hyphenate(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
