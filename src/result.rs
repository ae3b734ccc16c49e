//! Result types returned by providers and the resolution manager.

use serde::{Deserialize, Serialize};

/// A verse lookup as received from the caller.
///
/// `verses` absent means the whole chapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseQuery {
    /// Book name as typed by the user (`"John"`, `"1 john"`).
    pub book: String,
    /// Chapter number as text.
    pub chapter: String,
    /// Verse specifier (`"16"`, `"19-20"`, or a Gateway-only `"12-2:4"`).
    pub verses: Option<String>,
    /// Unified version code (`"ESV"`).
    pub version: String,
}

impl VerseQuery {
    /// Build a query; an empty `verses` string is treated as absent.
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        verses: Option<&str>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            chapter: chapter.into(),
            verses: verses
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string),
            version: version.into(),
        }
    }

    /// Human-readable reference: `John 3:16`, or `John 3` for a whole chapter.
    #[must_use]
    pub fn reference(&self) -> String {
        match &self.verses {
            Some(v) => format!("{} {}:{}", self.book.trim(), self.chapter.trim(), v),
            None => format!("{} {}", self.book.trim(), self.chapter.trim()),
        }
    }
}

/// One hit from a provider's word search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Reference as printed by the provider (`John 3:16`).
    pub verse_reference: String,
    /// Snippet text.
    pub text: String,
    /// Absolute link to the verse on the provider's site.
    pub url: String,
}

/// One version as listed by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersionEntry {
    /// Display name.
    pub name: String,
    /// Provider-native id or slug.
    pub value: String,
    /// Best-guess unified code.
    pub code: String,
    /// Language, `English` when the provider publishes none.
    pub language: String,
}
