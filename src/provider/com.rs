//! Bible.com provider.
//!
//! Chapter pages tag every verse span with `data-usfm="JHN.3.16"`, so verses
//! are looked up one by one through an attribute selector. A verse split
//! across paragraphs carries the same `data-usfm` on each piece.

use std::sync::Arc;

use tracing::debug;

use crate::books;
use crate::dom::{self, Document, Selection};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::{normalize_base_url, Options};
use crate::patterns::COM_VERSION_LINK;
use crate::provider::{
    is_note, normalize_whitespace, selection_text, Provider, ProviderKind, DEFAULT_LANGUAGE,
};
use crate::range::{parse_chapter, VerseRange};
use crate::result::{ProviderVersionEntry, SearchResult};

/// Bible.com provider.
#[derive(Clone)]
pub struct ComProvider {
    base_url: String,
    fetcher: Arc<dyn Fetch>,
}

impl ComProvider {
    /// Provider against the configured base URL over HTTP.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self::with_fetcher(
            options.base_url(ProviderKind::Com),
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

    /// Chapter URL: `{base}/bible/{version}/{USFM}.{chapter}`.
    #[must_use]
    pub fn chapter_url(&self, usfm: &str, chapter: u32, version: &str) -> String {
        format!("{}/bible/{}/{}.{}", self.base_url, version.trim(), usfm, chapter)
    }

    /// Text of the verses in `range`, joined by single spaces.
    ///
    /// Missing verses before the first hit are skipped; the first missing
    /// verse after a hit ends the scan.
    #[must_use]
    pub fn extract_range(doc: &Document, usfm: &str, chapter: u32, range: VerseRange) -> String {
        let mut verses = Vec::new();
        for verse in range.verses() {
            let selector = format!(r#"[data-usfm="{usfm}.{chapter}.{verse}"]"#);
            let pieces = doc.select(&selector);
            if pieces.is_empty() {
                if verses.is_empty() {
                    continue;
                }
                break;
            }
            let text = selection_text(&pieces, is_label_or_note);
            if !text.is_empty() {
                verses.push(text);
            }
        }
        verses.join(" ")
    }
}

/// Verse-number labels and footnotes inside a verse span.
fn is_label_or_note(sel: &Selection) -> bool {
    is_note(sel)
        || sel.attr("class").is_some_and(|class| {
            class
                .split_whitespace()
                .any(|c| c == "label" || c.contains("_label"))
        })
}

impl Provider for ComProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Com
    }

    fn get_verse(&self, book: &str, chapter: &str, verses: Option<&str>, version: &str) -> Result<String> {
        let usfm = books::usfm_code(book)?;
        // The chapter ends up inside an attribute selector.
        let chapter = parse_chapter(chapter)?;
        let range = VerseRange::from_optional(verses)?;
        let url = self.chapter_url(usfm, chapter, version);
        let html = self.fetcher.fetch(&url)?;

        let doc = dom::parse(&html);
        let text = Self::extract_range(&doc, usfm, chapter, range);
        debug!(%url, %range, chars = text.len(), "com verse extraction");
        if text.is_empty() {
            return Err(Error::VerseNotFound(format!("{book} {chapter}:{range}")));
        }
        Ok(text)
    }

    fn search_words(&self, _query: &str, _version: &str) -> Result<Vec<SearchResult>> {
        Err(Error::UnsupportedOperation {
            provider: ProviderKind::Com.as_str(),
            operation: "search_words",
        })
    }

    fn get_versions(&self) -> Result<Vec<ProviderVersionEntry>> {
        let url = format!("{}/versions", self.base_url);
        let html = self.fetcher.fetch(&url)?;
        let doc = dom::parse(&html);

        let mut entries: Vec<ProviderVersionEntry> = Vec::new();
        for node in doc.select("a[href]").nodes() {
            let link = Selection::from(*node);
            let href = link.attr("href").map(|h| h.to_string()).unwrap_or_default();
            let Some(caps) = COM_VERSION_LINK.captures(href.trim()) else {
                continue;
            };
            let (Some(id), Some(abbreviation)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            if entries.iter().any(|e| e.value == id.as_str()) {
                continue;
            }
            let name = normalize_whitespace(&link.text());
            entries.push(ProviderVersionEntry {
                name: if name.is_empty() { abbreviation.as_str().to_uppercase() } else { name },
                value: id.as_str().to_string(),
                code: abbreviation.as_str().to_uppercase(),
                language: DEFAULT_LANGUAGE.to_string(),
            });
        }
        debug!(versions = entries.len(), "com version listing");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_notes_are_skipped() {
        let doc = dom::parse(
            r#"<span data-usfm="JHN.3.16" class="ChapterContent_verse__57FIw"><span class="ChapterContent_label__R2PLt">16</span><span class="ChapterContent_content__RrUqA">For God so loved the world</span><span class="ChapterContent_note__YlDW0">note</span></span>"#,
        );
        assert_eq!(
            ComProvider::extract_range(&doc, "JHN", 3, VerseRange { start: 16, end: 16 }),
            "For God so loved the world"
        );
    }

    #[test]
    fn verse_split_across_paragraphs_is_joined() {
        let doc = dom::parse(
            r#"<p><span data-usfm="PSA.23.1">The Lord is my shepherd;</span></p><p><span data-usfm="PSA.23.1">I shall not want.</span></p>"#,
        );
        assert_eq!(
            ComProvider::extract_range(&doc, "PSA", 23, VerseRange { start: 1, end: 1 }),
            "The Lord is my shepherd; I shall not want."
        );
    }

    #[test]
    fn scan_stops_at_first_gap_after_hit() {
        let doc = dom::parse(
            r#"<span data-usfm="GEN.1.2">two</span><span data-usfm="GEN.1.3">three</span><span data-usfm="GEN.1.5">five</span>"#,
        );
        assert_eq!(
            ComProvider::extract_range(&doc, "GEN", 1, VerseRange { start: 1, end: 5 }),
            "two three"
        );
    }

    #[test]
    fn search_is_unsupported() {
        let provider = ComProvider::with_fetcher(
            "https://www.bible.com",
            Arc::new(|_: &str| -> Result<String> { Ok(String::new()) }),
        );
        assert!(matches!(
            provider.search_words("love", "111"),
            Err(Error::UnsupportedOperation { provider: "com", .. })
        ));
    }
}
