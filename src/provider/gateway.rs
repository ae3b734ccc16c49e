//! Bible Gateway provider.
//!
//! The site does the range work itself: the whole reference (including
//! cross-chapter forms like `John 3:12-4:2` and chapter-only references)
//! goes into the `search` query parameter unparsed. What comes back is the
//! passage markup, which is routed through the sanitizer.

use std::sync::Arc;

use tracing::debug;

use crate::dom::{self, Selection};
use crate::error::{Error, Result};
use crate::fetch::{Fetch, HttpFetcher};
use crate::options::{normalize_base_url, Options};
use crate::patterns::{LANGUAGE_HEADER, TRAILING_ABBREVIATION};
use crate::provider::{normalize_whitespace, Provider, ProviderKind, DEFAULT_LANGUAGE};
use crate::result::{ProviderVersionEntry, SearchResult};
use crate::sanitize;
use crate::url_utils::{build_url, create_absolute_url, parse_url};

/// Passage blocks; cross-chapter references render several.
const PASSAGE_SELECTOR: &str = ".passage-text";

/// Phrases the site prints instead of a passage.
const NOT_FOUND_SENTINELS: &[&str] = &[
    "No results found",
    "did not match any Bible passages",
    "is not a valid reference",
    "No passage found",
];

/// The version dropdown on every passage page.
const VERSION_OPTION_SELECTOR: &str = "select.search-dropdown option, select[name='version'] option";

const SEARCH_RESULT_SELECTOR: &str = ".search-result-list .bible-item, li.bible-item";
const SEARCH_TITLE_SELECTOR: &str = ".bible-item-title";
const SEARCH_TEXT_SELECTOR: &str = ".bible-item-text";
const SEARCH_EXTRAS_SELECTOR: &str = ".bible-item-extras";

/// Bible Gateway provider.
#[derive(Clone)]
pub struct GatewayProvider {
    base_url: String,
    fetcher: Arc<dyn Fetch>,
}

impl GatewayProvider {
    /// Provider against the configured base URL over HTTP.
    pub fn new(options: &Options) -> Result<Self> {
        Ok(Self::with_fetcher(
            options.base_url(ProviderKind::Gateway),
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

    /// Passage URL for a free-form reference.
    pub fn passage_url(&self, reference: &str, version: &str) -> Result<String> {
        build_url(
            &self.base_url,
            "/passage/",
            &[("search", reference), ("version", version), ("interface", "print")],
        )
    }

    /// Sanitize every passage block of a fetched page and join them.
    ///
    /// Fails with `VerseNotFound` when there is no passage block or when a
    /// passage block carries one of the site's "no results" phrases. Text
    /// elsewhere on the page is not consulted.
    pub fn extract_passage(html: &str, reference: &str) -> Result<String> {
        let doc = dom::parse(html);
        let passages = doc.select(PASSAGE_SELECTOR);

        if passages.is_empty() || contains_sentinel(&dom::text_content(&passages)) {
            return Err(Error::VerseNotFound(reference.to_string()));
        }

        let mut parts = Vec::new();
        for node in passages.nodes() {
            let passage = Selection::from(*node);
            let cleaned = sanitize::sanitize(&passage.inner_html(), sanitize::is_poetry(&passage))?;
            if !cleaned.is_empty() {
                parts.push(cleaned);
            }
        }
        debug!(reference, blocks = passages.length(), kept = parts.len(), "extracted passage");

        if parts.is_empty() {
            return Err(Error::VerseNotFound(reference.to_string()));
        }
        Ok(parts.join("\n"))
    }
}

fn contains_sentinel(text: &str) -> bool {
    NOT_FOUND_SENTINELS.iter().any(|s| text.contains(s))
}

/// Build the reference string the site expects.
fn reference(book: &str, chapter: &str, verses: Option<&str>) -> String {
    let book = book.trim();
    let chapter = chapter.trim();
    match verses.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => format!("{book} {chapter}:{v}"),
        None => format!("{book} {chapter}"),
    }
}

/// One `<option>` of the version dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOption {
    /// Language header pseudo-option (`---English (EN)---`).
    LanguageHeader(String),
    /// A selectable version.
    Version {
        /// Option label (`New International Version (NIV)`).
        label: String,
        /// Option value (`NIV`).
        value: String,
    },
}

/// Turn dropdown options into version entries, carrying the most recent
/// language header forward onto every following version.
#[must_use]
pub fn fold_version_options<I>(options: I) -> Vec<ProviderVersionEntry>
where
    I: IntoIterator<Item = VersionOption>,
{
    let (_, entries) = options.into_iter().fold(
        (DEFAULT_LANGUAGE.to_string(), Vec::new()),
        |(current_language, mut entries), option| match option {
            VersionOption::LanguageHeader(language) => (language, entries),
            VersionOption::Version { label, value } => {
                let name = TRAILING_ABBREVIATION.replace(&label, "").trim().to_string();
                entries.push(ProviderVersionEntry {
                    name: if name.is_empty() { value.clone() } else { name },
                    code: value.to_uppercase(),
                    value,
                    language: current_language.clone(),
                });
                (current_language, entries)
            }
        },
    );
    entries
}

fn classify_option(option: &Selection) -> Option<VersionOption> {
    let label = normalize_whitespace(&option.text());
    let value = option.attr("value").map(|v| v.trim().to_string()).unwrap_or_default();

    let is_header = option.has_class("lang")
        || option.has_attr("disabled")
        || value.is_empty()
        || value.chars().all(|c| c == '-');
    if is_header {
        let language = LANGUAGE_HEADER
            .captures(&label)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|l| !l.is_empty())?;
        return Some(VersionOption::LanguageHeader(language));
    }
    Some(VersionOption::Version { label, value })
}

impl Provider for GatewayProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gateway
    }

    fn get_verse(&self, book: &str, chapter: &str, verses: Option<&str>, version: &str) -> Result<String> {
        let reference = reference(book, chapter, verses);
        let url = self.passage_url(&reference, version)?;
        let html = self.fetcher.fetch(&url)?;
        Self::extract_passage(&html, &reference)
    }

    fn search_words(&self, query: &str, version: &str) -> Result<Vec<SearchResult>> {
        let url = build_url(
            &self.base_url,
            "/quicksearch/",
            &[("quicksearch", query), ("version", version), ("interface", "print")],
        )?;
        let html = self.fetcher.fetch(&url)?;
        let base = parse_url(&url)?;

        let doc = dom::parse(&html);
        let mut results = Vec::new();
        for node in doc.select(SEARCH_RESULT_SELECTOR).nodes() {
            let item = Selection::from(*node);
            let Some(verse_reference) =
                dom::select_text(&item, SEARCH_TITLE_SELECTOR).map(|t| normalize_whitespace(&t))
            else {
                continue;
            };
            let title = item.select_single(SEARCH_TITLE_SELECTOR);

            let href = title
                .attr("href")
                .or_else(|| title.select_single("a").attr("href"))
                .map(|h| h.to_string())
                .unwrap_or_default();

            let snippet = item.select_single(SEARCH_TEXT_SELECTOR);
            snippet.select(SEARCH_EXTRAS_SELECTOR).remove();
            snippet.select("sup").remove();

            results.push(SearchResult {
                verse_reference,
                text: normalize_whitespace(&snippet.text()),
                url: create_absolute_url(&href, &base),
            });
        }
        debug!(query, version, hits = results.len(), "gateway search");
        Ok(results)
    }

    fn get_versions(&self) -> Result<Vec<ProviderVersionEntry>> {
        let url = self.passage_url("Genesis 1", "NIV")?;
        let html = self.fetcher.fetch(&url)?;
        let doc = dom::parse(&html);

        let options: Vec<VersionOption> = doc
            .select(VERSION_OPTION_SELECTOR)
            .nodes()
            .iter()
            .filter_map(|node| classify_option(&Selection::from(*node)))
            .collect();
        let entries = fold_version_options(options);
        debug!(versions = entries.len(), "gateway version listing");
        Ok(entries)
    }
}
