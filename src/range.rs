//! Verse range specifiers.
//!
//! A specifier is either a single verse (`"16"`) or an inclusive span within
//! one chapter (`"19-20"`). Cross-chapter forms such as `"12-2:4"` are not
//! understood here; only the Gateway provider accepts those, by passing the
//! raw reference through to the site.

use std::fmt;

use crate::error::{Error, Result};

/// Inclusive verse range within one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseRange {
    /// First verse, at least 1.
    pub start: u32,
    /// Last verse, never below `start`.
    pub end: u32,
}

impl VerseRange {
    /// Sentinel end verse meaning "rest of chapter".
    pub const CHAPTER_END: u32 = 999;

    /// Whole chapter: `{1, 999}`.
    pub const WHOLE_CHAPTER: Self = Self {
        start: 1,
        end: Self::CHAPTER_END,
    };

    /// Parse `"N"` or `"A-B"`.
    ///
    /// Tokens are trimmed and must be base-10 integers. A zero start or a
    /// start past the end is rejected as well, so a parsed range always
    /// satisfies `1 <= start <= end`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (start, end) = match spec.split_once('-') {
            Some((a, b)) => (parse_verse_number(a, spec)?, parse_verse_number(b, spec)?),
            None => {
                let n = parse_verse_number(spec, spec)?;
                (n, n)
            }
        };

        if start == 0 || start > end {
            return Err(Error::InvalidRange(spec.to_string()));
        }
        Ok(Self { start, end })
    }

    /// Parse an optional specifier, defaulting to the whole chapter when it
    /// is absent or blank.
    pub fn from_optional(spec: Option<&str>) -> Result<Self> {
        match spec.map(str::trim) {
            None | Some("") => Ok(Self::WHOLE_CHAPTER),
            Some(s) => Self::parse(s),
        }
    }

    /// Whether verse `n` falls inside the range.
    #[inline]
    #[must_use]
    pub fn contains(&self, n: u32) -> bool {
        (self.start..=self.end).contains(&n)
    }

    /// Whether the range names exactly one verse.
    #[inline]
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Iterate the verse numbers in the range.
    pub fn verses(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl Default for VerseRange {
    fn default() -> Self {
        Self::WHOLE_CHAPTER
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse a chapter number: a trimmed, positive base-10 integer.
pub fn parse_chapter(chapter: &str) -> Result<u32> {
    match parse_verse_number(chapter, chapter)? {
        0 => Err(Error::InvalidRange(chapter.to_string())),
        n => Ok(n),
    }
}

fn parse_verse_number(token: &str, spec: &str) -> Result<u32> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidRange(spec.to_string()));
    }
    token
        .parse::<u32>()
        .map_err(|_| Error::InvalidRange(spec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_verse_collapses() {
        assert_eq!(VerseRange::parse("16").ok(), Some(VerseRange { start: 16, end: 16 }));
        assert!(VerseRange::parse("16").is_ok_and(|r| r.is_single()));
    }

    #[test]
    fn span_parses_both_ends_with_whitespace() {
        assert_eq!(VerseRange::parse("19-20").ok(), Some(VerseRange { start: 19, end: 20 }));
        assert_eq!(VerseRange::parse(" 3 - 7 ").ok(), Some(VerseRange { start: 3, end: 7 }));
    }

    #[test]
    fn non_numeric_tokens_fail() {
        for spec in ["", "a", "1-b", "x-2", "1.5", "+3", "-4", "3-", "12-2:4"] {
            assert!(
                matches!(VerseRange::parse(spec), Err(Error::InvalidRange(ref s)) if s == spec),
                "expected InvalidRange for {spec:?}"
            );
        }
    }

    #[test]
    fn chapter_must_be_a_positive_integer() {
        assert_eq!(parse_chapter(" 23 ").ok(), Some(23));
        for chapter in ["", "0", "3a", "3\"]", "3.1", "-1"] {
            assert!(
                matches!(parse_chapter(chapter), Err(Error::InvalidRange(ref s)) if s == chapter),
                "expected InvalidRange for {chapter:?}"
            );
        }
    }

    #[test]
    fn zero_and_reversed_ranges_fail() {
        assert!(matches!(VerseRange::parse("0"), Err(Error::InvalidRange(_))));
        assert!(matches!(VerseRange::parse("5-2"), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn optional_defaults_to_whole_chapter() {
        assert_eq!(VerseRange::from_optional(None).ok(), Some(VerseRange::WHOLE_CHAPTER));
        assert_eq!(VerseRange::from_optional(Some("  ")).ok(), Some(VerseRange::WHOLE_CHAPTER));
        assert_eq!(
            VerseRange::from_optional(Some("2")).ok(),
            Some(VerseRange { start: 2, end: 2 })
        );
    }

    #[test]
    fn contains_is_inclusive() {
        let range = VerseRange { start: 3, end: 5 };
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(6));
        assert_eq!(range.verses().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn display_round_trips_shape() {
        assert_eq!(VerseRange { start: 4, end: 4 }.to_string(), "4");
        assert_eq!(VerseRange { start: 4, end: 9 }.to_string(), "4-9");
    }
}
