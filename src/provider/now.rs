//! BibleNow provider.
//!
//! Chapter URLs cannot be derived from the book name alone. The version's
//! index page is fetched first; its book links (exactly two path segments
//! below the version root: testament and book) are listed in canonical
//! order, and the book is picked by its position in the 66-book canon.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::books;
use crate::dom::{self, Selection};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::{normalize_base_url, Options};
use crate::patterns::NOW_VERSION_LINK;
use crate::provider::{
    is_note, normalize_whitespace, selection_text, verse_number, Provider, ProviderKind,
    DEFAULT_LANGUAGE,
};
use crate::range::VerseRange;
use crate::result::{ProviderVersionEntry, SearchResult};
use crate::url_utils::{hyphenate, parse_url, segments_below};

/// Unified version code -> site slug.
const VERSION_SLUGS: &[(&str, &str)] = &[
    ("KJV", "king-james-version"),
    ("ASV", "american-standard-version"),
    ("WEB", "world-english-bible"),
    ("YLT", "youngs-literal-translation"),
    ("BBE", "bible-in-basic-english"),
    ("DARBY", "darby-translation"),
    ("WBT", "webster-bible"),
];

/// Verse containers on a chapter page.
const VERSE_SELECTOR: &str = ".verse";

/// Verse number marker inside a verse container.
const VERSE_NUMBER_SELECTOR: &str = ".verse-number, .verse-num, sup";

/// BibleNow provider.
#[derive(Clone)]
pub struct NowProvider {
    base_url: String,
    fetcher: Arc<dyn Fetch>,
}

impl NowProvider {
    /// Provider against the configured base URL over HTTP.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self::with_fetcher(
            options.base_url(ProviderKind::Now),
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

    /// Version index URL: `{base}/{slug}`.
    #[must_use]
    pub fn version_url(&self, version: &str) -> String {
        format!("{}/{}", self.base_url, version_slug(version))
    }

    /// URL of the book at canonical position `index` on a version index page.
    pub fn book_url(index_html: &str, index_url: &str, index: usize) -> Result<String> {
        let links = book_links(index_html, &parse_url(index_url)?);
        debug!(index_url, books = links.len(), index, "book index discovered");
        links
            .get(index)
            .map(Url::to_string)
            .ok_or(Error::BookIndexOutOfRange {
                index,
                available: links.len(),
            })
    }

    /// Text of the verses in `range` from a chapter page.
    #[must_use]
    pub fn extract_range(html: &str, range: VerseRange) -> String {
        let doc = dom::parse(html);
        let mut verses = Vec::new();
        for node in doc.select(VERSE_SELECTOR).nodes() {
            let verse = Selection::from(*node);
            let number = verse
                .attr("data-verse")
                .and_then(|v| verse_number(&v))
                .or_else(|| verse_number(&verse.select_single(VERSE_NUMBER_SELECTOR).text()));
            if !number.is_some_and(|n| range.contains(n)) {
                continue;
            }
            let text = selection_text(&verse, is_number_or_note);
            if !text.is_empty() {
                verses.push(text);
            }
        }
        verses.join(" ")
    }
}

/// Normalize a version to the site's slug, falling back to hyphenating
/// the raw input.
#[must_use]
pub fn version_slug(version: &str) -> String {
    let version = version.trim();
    VERSION_SLUGS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(version))
        .map_or_else(|| hyphenate(version), |(_, slug)| (*slug).to_string())
}

/// Book links on a version index page, in document order, deduplicated.
///
/// Only links exactly two path segments below the index URL count.
fn book_links(index_html: &str, index_url: &Url) -> Vec<Url> {
    let doc = dom::parse(index_html);
    let root = root_of(index_url);
    let mut links: Vec<Url> = Vec::new();
    for node in doc.select("a[href]").nodes() {
        let Some(href) = Selection::from(*node).attr("href") else {
            continue;
        };
        let Ok(mut link) = root.join(href.trim()) else {
            continue;
        };
        link.set_query(None);
        link.set_fragment(None);
        let is_book = segments_below(&root, &link).is_some_and(|s| s.len() == 2);
        if is_book && !links.contains(&link) {
            links.push(link);
        }
    }
    links
}

/// The index URL with a trailing slash, so relative hrefs resolve below it.
fn root_of(index_url: &Url) -> Url {
    let mut root = index_url.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root
}

fn is_number_or_note(sel: &Selection) -> bool {
    sel.is(VERSE_NUMBER_SELECTOR) || is_note(sel)
}

impl Provider for NowProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Now
    }

    fn get_verse(&self, book: &str, chapter: &str, verses: Option<&str>, version: &str) -> Result<String> {
        let index = books::canonical_index(book)?;
        let range = VerseRange::from_optional(verses)?;

        let index_url = self.version_url(version);
        let index_html = self.fetcher.fetch(&index_url)?;
        let book_url = Self::book_url(&index_html, &index_url, index)?;

        let chapter_url = format!("{}/{}", book_url.trim_end_matches('/'), chapter.trim());
        let html = self.fetcher.fetch(&chapter_url)?;

        let text = Self::extract_range(&html, range);
        debug!(%chapter_url, %range, chars = text.len(), "now verse extraction");
        if text.is_empty() {
            return Err(Error::VerseNotFound(format!("{book} {chapter}:{range}")));
        }
        Ok(text)
    }

    fn search_words(&self, _query: &str, _version: &str) -> Result<Vec<SearchResult>> {
        Err(Error::UnsupportedOperation {
            provider: ProviderKind::Now.as_str(),
            operation: "search_words",
        })
    }

    fn get_versions(&self) -> Result<Vec<ProviderVersionEntry>> {
        let url = format!("{}/", self.base_url);
        let html = self.fetcher.fetch(&url)?;
        let doc = dom::parse(&html);

        let mut entries: Vec<ProviderVersionEntry> = Vec::new();
        for node in doc.select("a[href]").nodes() {
            let link = Selection::from(*node);
            let href = link.attr("href").map(|h| h.to_string()).unwrap_or_default();
            let Some(slug) = NOW_VERSION_LINK
                .captures(href.trim())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
            else {
                continue;
            };
            if entries.iter().any(|e| e.value == slug) {
                continue;
            }
            let code = VERSION_SLUGS
                .iter()
                .find(|(_, s)| *s == slug)
                .map_or_else(|| slug.to_uppercase(), |(code, _)| (*code).to_string());
            let name = normalize_whitespace(&link.text());
            entries.push(ProviderVersionEntry {
                name: if name.is_empty() { code.clone() } else { name },
                value: slug,
                code,
                language: DEFAULT_LANGUAGE.to_string(),
            });
        }
        debug!(versions = entries.len(), "now version listing");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_table_then_hyphenate() {
        assert_eq!(version_slug("kjv"), "king-james-version");
        assert_eq!(version_slug("KJV"), "king-james-version");
        assert_eq!(version_slug("Douay Rheims"), "douay-rheims");
    }

    #[test]
    fn book_links_need_exactly_two_segments() {
        let html = r#"
            <a href="/king-james-version/old-testament/genesis">Genesis</a>
            <a href="/king-james-version/old-testament/genesis/1">Genesis 1</a>
            <a href="/king-james-version/about">About</a>
            <a href="old-testament/exodus">Exodus</a>
            <a href="/privacy">Privacy</a>
            <a href="https://elsewhere.test/king-james-version/x/y">Elsewhere</a>
            <a href="/king-james-version/old-testament/genesis#top">Genesis again</a>"#;
        let index = Url::parse("https://biblenow.net/king-james-version").ok();
        let links: Vec<String> = index
            .map(|u| book_links(html, &u).iter().map(Url::to_string).collect())
            .unwrap_or_default();
        assert_eq!(
            links,
            vec![
                "https://biblenow.net/king-james-version/old-testament/genesis",
                "https://biblenow.net/king-james-version/old-testament/exodus",
            ]
        );
    }

    #[test]
    fn verses_by_marker_or_attribute() {
        let html = r#"
            <div class="verse"><span class="verse-number">1</span> In the beginning was the Word,</div>
            <div class="verse" data-verse="2">The same was in the beginning with God.</div>
            <div class="verse"><span class="verse-number">3</span> All things were made by him;</div>"#;
        assert_eq!(
            NowProvider::extract_range(html, VerseRange { start: 1, end: 2 }),
            "In the beginning was the Word, The same was in the beginning with God."
        );
        assert_eq!(NowProvider::extract_range(html, VerseRange { start: 4, end: 9 }), "");
    }
}
