//! Provider Abstraction
//!
//! A provider is one third-party site that publishes scripture as HTML.
//! Every provider offers the same capability set (verse lookup, word
//! search, version listing) but owns its own URL scheme, book naming and
//! document-structure knowledge.
//!
//! # Module Structure
//!
//! - `gateway`: Bible Gateway (encoded reference query, sanitized HTML output)
//! - `hub`: BibleHub (slug URLs, sibling walk between verse markers)
//! - `com`: Bible.com (USFM codes, `data-usfm` attribute lookup)
//! - `now`: BibleNow (two-stage lookup through the version's book index)
//!
//! Providers hold no per-request state and are safe to share between
//! threads.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::dom::{NodeRef, Selection};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::Options;
use crate::patterns::{LEADING_NUMBER, WHITESPACE_NORMALIZE};
use crate::result::{ProviderVersionEntry, SearchResult};

pub mod com;
pub mod gateway;
pub mod hub;
pub mod now;

pub use com::ComProvider;
pub use gateway::GatewayProvider;
pub use hub::HubProvider;
pub use now::NowProvider;

/// Default language for providers that publish none per version.
pub const DEFAULT_LANGUAGE: &str = "English";

/// The provider capability set.
pub trait Provider: Send + Sync {
    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Fetch the text (or sanitized markup, for Gateway) of a passage.
    ///
    /// `verses` absent means the whole chapter; `version` is the
    /// provider's own version code.
    fn get_verse(&self, book: &str, chapter: &str, verses: Option<&str>, version: &str) -> Result<String>;

    /// Search the provider for a word or phrase.
    fn search_words(&self, query: &str, version: &str) -> Result<Vec<SearchResult>>;

    /// List the versions the provider publishes.
    fn get_versions(&self) -> Result<Vec<ProviderVersionEntry>>;
}

/// The four supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    /// biblegateway.com
    Gateway,
    /// biblehub.com
    Hub,
    /// bible.com
    Com,
    /// biblenow.net
    Now,
}

/// Preference order used by `select_provider` when the caller gives none.
pub const DEFAULT_SELECTION_ORDER: [ProviderKind; 3] =
    [ProviderKind::Gateway, ProviderKind::Hub, ProviderKind::Now];

/// Preference order used by `get_prioritized_providers` when the caller gives none.
pub const DEFAULT_FALLBACK_ORDER: [ProviderKind; 4] = [
    ProviderKind::Gateway,
    ProviderKind::Hub,
    ProviderKind::Now,
    ProviderKind::Com,
];

impl ProviderKind {
    /// All providers.
    pub const ALL: [Self; 4] = [Self::Gateway, Self::Hub, Self::Com, Self::Now];

    /// Name used in the version table and in preference lists.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::Hub => "hub",
            Self::Com => "com",
            Self::Now => "now",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gateway" => Ok(Self::Gateway),
            "hub" => Ok(Self::Hub),
            "com" => Ok(Self::Com),
            "now" => Ok(Self::Now),
            _ => Err(Error::UnknownProvider(s.to_string())),
        }
    }
}

/// Build one provider of each kind against live HTTP.
pub fn build_all(options: &Options) -> Result<Vec<Box<dyn Provider>>> {
    let fetcher: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(options)?);
    Ok(ProviderKind::ALL
        .iter()
        .map(|&kind| build(kind, options.base_url(kind), Arc::clone(&fetcher)))
        .collect())
}

/// Build a provider of `kind` with an explicit base URL and fetcher.
#[must_use]
pub fn build(kind: ProviderKind, base_url: String, fetcher: Arc<dyn Fetch>) -> Box<dyn Provider> {
    match kind {
        ProviderKind::Gateway => Box::new(GatewayProvider::with_fetcher(base_url, fetcher)),
        ProviderKind::Hub => Box::new(HubProvider::with_fetcher(base_url, fetcher)),
        ProviderKind::Com => Box::new(ComProvider::with_fetcher(base_url, fetcher)),
        ProviderKind::Now => Box::new(NowProvider::with_fetcher(base_url, fetcher)),
    }
}

// === Shared extraction helpers ===

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// The verse number printed in a marker node (`"16"`, `"[16]"`, `"v16 "`).
#[must_use]
pub fn verse_number(marker: &str) -> Option<u32> {
    LEADING_NUMBER
        .find(marker)
        .and_then(|m| m.as_str().parse().ok())
}

/// Text of `node` and its descendants, skipping subtrees `skip` rejects.
///
/// Block elements (`p`, `div`, `br`, headings) contribute a separating
/// space so words on either side do not run together.
pub fn collect_text(node: &NodeRef, skip: fn(&Selection) -> bool, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
        } else if child.is_element() {
            let sel = Selection::from(child);
            if skip(&sel) {
                continue;
            }
            collect_text(&child, skip, out);
            if is_block(&child) {
                out.push(' ');
            }
        }
    }
}

/// Whitespace-normalized text of a selection, skipping subtrees `skip` rejects.
#[must_use]
pub fn selection_text(sel: &Selection, skip: fn(&Selection) -> bool) -> String {
    let mut out = String::new();
    for node in sel.nodes() {
        collect_text(node, skip, &mut out);
        out.push(' ');
    }
    normalize_whitespace(&out)
}

fn is_block(node: &NodeRef) -> bool {
    matches!(
        node.node_name().as_deref(),
        Some("p" | "div" | "br" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li")
    )
}

/// Class-based skip rule for footnote and cross-reference markers.
pub(crate) fn is_note(sel: &Selection) -> bool {
    sel.attr("class").is_some_and(|class| {
        class.split_whitespace().any(|c| {
            let c = c.to_ascii_lowercase();
            c.contains("note") || c.starts_with("fn") || c.contains("crossref") || c == "xref"
        })
    })
}
