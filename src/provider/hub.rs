//! BibleHub provider.
//!
//! Chapter pages print verse numbers as `span.reftext` markers followed by
//! loose text siblings. Extraction walks the chapter body in document order
//! with an in-range flag that each marker switches on or off, and keeps
//! text only while the flag is set.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::books;
use crate::dom::{self, NodeRef, Selection};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::{normalize_base_url, Options};
use crate::patterns::HUB_VERSION_LINK;
use crate::provider::{
    is_note, normalize_whitespace, selection_text, verse_number, Provider, ProviderKind,
    DEFAULT_LANGUAGE,
};
use crate::range::VerseRange;
use crate::result::{ProviderVersionEntry, SearchResult};
use crate::url_utils::{build_url, create_absolute_url, parse_url};

/// Chapter body containers, most specific first.
const CHAPTER_SELECTORS: &[&str] = &[".chap", "#leftbox .padleft", "#leftbox", "body"];

/// Verse number marker.
const MARKER_CLASS: &str = "reftext";

const SEARCH_RESULT_SELECTOR: &str = ".result, .srch";

/// BibleHub provider.
#[derive(Clone)]
pub struct HubProvider {
    base_url: String,
    fetcher: Arc<dyn Fetch>,
}

impl HubProvider {
    /// Provider against the configured base URL over HTTP.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self::with_fetcher(
            options.base_url(ProviderKind::Hub),
            Arc::new(HttpFetcher::new(options)?),
        ))
    }

    /// Provider with an explicit base URL and fetcher.
    #[must_use]
    pub fn with_fetcher(base_url: impl AsRef<str>, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            fetcher,
        }
    }

    /// Chapter URL: `{base}/{version}/{book_slug}/{chapter}.htm`.
    #[must_use]
    pub fn chapter_url(&self, book: &str, chapter: &str, version: &str) -> String {
        format!(
            "{}/{}/{}/{}.htm",
            self.base_url,
            version.trim().to_lowercase(),
            books::slug(book),
            chapter.trim()
        )
    }

    /// Text of the verses in `range` from a chapter page.
    #[must_use]
    pub fn extract_range(html: &str, range: VerseRange) -> String {
        let doc = dom::parse(html);
        let Some(chapter) = CHAPTER_SELECTORS
            .iter()
            .map(|s| doc.select_single(s))
            .find(Selection::exists)
        else {
            return String::new();
        };

        let mut walk = RangeWalk {
            range,
            in_range: false,
            out: String::new(),
        };
        for node in chapter.nodes() {
            walk.visit_children(node);
        }
        normalize_whitespace(&walk.out)
    }
}

/// Document-order walk tracking whether the last marker seen was in range.
struct RangeWalk {
    range: VerseRange,
    in_range: bool,
    out: String,
}

impl RangeWalk {
    fn visit_children(&mut self, node: &NodeRef) {
        for child in node.children() {
            if child.is_text() {
                if self.in_range {
                    self.out.push_str(&child.text());
                }
                continue;
            }
            if !child.is_element() {
                continue;
            }

            let sel = Selection::from(child);
            if sel.has_class(MARKER_CLASS) {
                match verse_number(&sel.text()) {
                    Some(n) => self.in_range = self.range.contains(n),
                    None => warn!(marker = %sel.text(), "skipping unparsable verse marker"),
                }
                continue;
            }
            if is_excluded(&sel) {
                continue;
            }

            self.visit_children(&child);
            if matches!(child.node_name().as_deref(), Some("p" | "div" | "br")) {
                self.out.push(' ');
            }
        }
    }
}

/// Footnotes, headings and cross-reference markers never count as verse text.
fn is_excluded(sel: &Selection) -> bool {
    is_note(sel)
        || sel.has_class("hdg")
        || sel.has_class("acrostic")
        || sel.is("script, style, h1, h2, h3, h4, sup")
}

impl Provider for HubProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Hub
    }

    fn get_verse(&self, book: &str, chapter: &str, verses: Option<&str>, version: &str) -> Result<String> {
        let range = VerseRange::from_optional(verses)?;
        let url = self.chapter_url(book, chapter, version);
        let html = self.fetcher.fetch(&url)?;

        let text = Self::extract_range(&html, range);
        debug!(%url, %range, chars = text.len(), "hub verse extraction");
        if text.is_empty() {
            return Err(Error::VerseNotFound(format!("{book} {chapter}:{range}")));
        }
        Ok(text)
    }

    fn search_words(&self, query: &str, version: &str) -> Result<Vec<SearchResult>> {
        let url = build_url(
            &self.base_url,
            "/search.php",
            &[("q", query), ("v", &version.trim().to_lowercase())],
        )?;
        let html = self.fetcher.fetch(&url)?;
        let base = parse_url(&url)?;

        let doc = dom::parse(&html);
        let mut results = Vec::new();
        for node in doc.select(SEARCH_RESULT_SELECTOR).nodes() {
            let block = Selection::from(*node);
            let link = block.select_single("a[href]");
            let verse_reference = normalize_whitespace(&link.text());
            if verse_reference.is_empty() {
                continue;
            }
            let href = link.attr("href").map(|h| h.to_string()).unwrap_or_default();
            link.remove();

            results.push(SearchResult {
                verse_reference,
                text: selection_text(&block, is_note),
                url: create_absolute_url(&href, &base),
            });
        }
        debug!(query, version, hits = results.len(), "hub search");
        Ok(results)
    }

    fn get_versions(&self) -> Result<Vec<ProviderVersionEntry>> {
        let url = format!("{}/genesis/1-1.htm", self.base_url);
        let html = self.fetcher.fetch(&url)?;
        let doc = dom::parse(&html);

        let mut entries: Vec<ProviderVersionEntry> = Vec::new();
        for node in doc.select("a[href]").nodes() {
            let link = Selection::from(*node);
            let href = link.attr("href").map(|h| h.to_string()).unwrap_or_default();
            let Some(slug) = HUB_VERSION_LINK
                .captures(href.trim())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
            else {
                continue;
            };
            if entries.iter().any(|e| e.value == slug) {
                continue;
            }
            let name = normalize_whitespace(&link.text());
            entries.push(ProviderVersionEntry {
                name: if name.is_empty() { slug.clone() } else { name },
                code: slug.to_uppercase(),
                value: slug,
                language: DEFAULT_LANGUAGE.to_string(),
            });
        }
        debug!(versions = entries.len(), "hub version listing");
        Ok(entries)
    }
}
