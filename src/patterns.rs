//! Compiled regex patterns and CSS selectors shared by the providers and
//! the sanitizer.
//!
//! All patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// First run of digits in a verse marker (`"16"`, `"[16]"`, `"v16"`).
pub static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("LEADING_NUMBER regex"));

/// Trailing parenthesized abbreviation: `New International Version (NIV)`.
pub static TRAILING_ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(([^()]+)\)\s*$").expect("TRAILING_ABBREVIATION regex")
});

/// Language header pseudo-option: `---English (EN)---`.
pub static LANGUAGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-\u{2014}\s]*(.*?)(?:\s*\([^()]*\))?[-\u{2014}\s]*$").expect("LANGUAGE_HEADER regex")
});

// =============================================================================
// Version Listing Link Patterns
// =============================================================================

/// BibleHub parallel page links: `/niv/genesis/1.htm`.
pub static HUB_VERSION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/]+)?/([a-z0-9_]+)/genesis/1\.htm$").expect("HUB_VERSION_LINK regex")
});

/// Bible.com version listing links: `/versions/111-niv-new-international-version`.
pub static COM_VERSION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/]+)?/versions/(\d+)-([A-Za-z0-9]+)(?:-[^/?#]*)?/?$")
        .expect("COM_VERSION_LINK regex")
});

/// BibleNow version entry links: `/king-james-version/old-testament/genesis`.
pub static NOW_VERSION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://[^/]+)?/([a-z0-9-]+)/old-testament/genesis(?:/1)?/?$")
        .expect("NOW_VERSION_LINK regex")
});

// =============================================================================
// Sanitizer Selectors
// =============================================================================

/// Administrative and navigational subtrees removed before anything else.
pub const ADMINISTRATIVE_SELECTOR: &str = ".footnotes, .crossrefs, sup.footnote, \
     sup.crossreference, .passage-other-trans, .full-chap-link, .dropdown-version-switcher, \
     .version-switcher, .translation-switcher, .other-translations, .chapternum, \
     .passage-display, .publisher-info-bottom, .copyright-table";

/// Empty spacer elements that mark extra top padding in poetry.
pub const POETRY_SPACER_SELECTOR: &str = ".top-05, .top-1, .top-2";

/// Poetry container wrappers.
pub const POETRY_CONTAINER_SELECTOR: &str = ".poetry";

/// Single poetry line wrappers.
pub const POETRY_LINE_SELECTOR: &str = ".line";

/// Indentation wrappers inside poetry lines.
pub const POETRY_INDENT_SELECTOR: &str =
    ".indent-1, .indent-2, .indent-3, .indent-1-breaks, .indent-2-breaks, .indent-3-breaks";

/// Small-caps styling (divine name rendering).
pub const SMALL_CAPS_SELECTOR: &str = "span.small-caps";
