//! Book catalog: the 66-book Protestant canon in canonical order.
//!
//! Providers address books differently: Bible.com by USFM three-letter
//! code, BibleHub by a lowercase underscore slug, BibleNow by position in
//! the canon. All three are derived from this one table.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// A canonical book: display name and USFM code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    /// English display name.
    pub name: &'static str,
    /// USFM three-character identifier.
    pub usfm: &'static str,
}

/// The 66 books in canonical order.
pub static CANON: [Book; 66] = [
    Book { name: "Genesis", usfm: "GEN" },
    Book { name: "Exodus", usfm: "EXO" },
    Book { name: "Leviticus", usfm: "LEV" },
    Book { name: "Numbers", usfm: "NUM" },
    Book { name: "Deuteronomy", usfm: "DEU" },
    Book { name: "Joshua", usfm: "JOS" },
    Book { name: "Judges", usfm: "JDG" },
    Book { name: "Ruth", usfm: "RUT" },
    Book { name: "1 Samuel", usfm: "1SA" },
    Book { name: "2 Samuel", usfm: "2SA" },
    Book { name: "1 Kings", usfm: "1KI" },
    Book { name: "2 Kings", usfm: "2KI" },
    Book { name: "1 Chronicles", usfm: "1CH" },
    Book { name: "2 Chronicles", usfm: "2CH" },
    Book { name: "Ezra", usfm: "EZR" },
    Book { name: "Nehemiah", usfm: "NEH" },
    Book { name: "Esther", usfm: "EST" },
    Book { name: "Job", usfm: "JOB" },
    Book { name: "Psalms", usfm: "PSA" },
    Book { name: "Proverbs", usfm: "PRO" },
    Book { name: "Ecclesiastes", usfm: "ECC" },
    Book { name: "Song of Solomon", usfm: "SNG" },
    Book { name: "Isaiah", usfm: "ISA" },
    Book { name: "Jeremiah", usfm: "JER" },
    Book { name: "Lamentations", usfm: "LAM" },
    Book { name: "Ezekiel", usfm: "EZK" },
    Book { name: "Daniel", usfm: "DAN" },
    Book { name: "Hosea", usfm: "HOS" },
    Book { name: "Joel", usfm: "JOL" },
    Book { name: "Amos", usfm: "AMO" },
    Book { name: "Obadiah", usfm: "OBA" },
    Book { name: "Jonah", usfm: "JON" },
    Book { name: "Micah", usfm: "MIC" },
    Book { name: "Nahum", usfm: "NAM" },
    Book { name: "Habakkuk", usfm: "HAB" },
    Book { name: "Zephaniah", usfm: "ZEP" },
    Book { name: "Haggai", usfm: "HAG" },
    Book { name: "Zechariah", usfm: "ZEC" },
    Book { name: "Malachi", usfm: "MAL" },
    Book { name: "Matthew", usfm: "MAT" },
    Book { name: "Mark", usfm: "MRK" },
    Book { name: "Luke", usfm: "LUK" },
    Book { name: "John", usfm: "JHN" },
    Book { name: "Acts", usfm: "ACT" },
    Book { name: "Romans", usfm: "ROM" },
    Book { name: "1 Corinthians", usfm: "1CO" },
    Book { name: "2 Corinthians", usfm: "2CO" },
    Book { name: "Galatians", usfm: "GAL" },
    Book { name: "Ephesians", usfm: "EPH" },
    Book { name: "Philippians", usfm: "PHP" },
    Book { name: "Colossians", usfm: "COL" },
    Book { name: "1 Thessalonians", usfm: "1TH" },
    Book { name: "2 Thessalonians", usfm: "2TH" },
    Book { name: "1 Timothy", usfm: "1TI" },
    Book { name: "2 Timothy", usfm: "2TI" },
    Book { name: "Titus", usfm: "TIT" },
    Book { name: "Philemon", usfm: "PHM" },
    Book { name: "Hebrews", usfm: "HEB" },
    Book { name: "James", usfm: "JAS" },
    Book { name: "1 Peter", usfm: "1PE" },
    Book { name: "2 Peter", usfm: "2PE" },
    Book { name: "1 John", usfm: "1JN" },
    Book { name: "2 John", usfm: "2JN" },
    Book { name: "3 John", usfm: "3JN" },
    Book { name: "Jude", usfm: "JUD" },
    Book { name: "Revelation", usfm: "REV" },
];

/// Alternate spellings and abbreviations, keyed by normalized form.
const ALIASES: &[(&str, &str)] = &[
    ("psalm", "PSA"),
    ("ps", "PSA"),
    ("song of songs", "SNG"),
    ("songs", "SNG"),
    ("canticles", "SNG"),
    ("revelations", "REV"),
    ("rev", "REV"),
    ("gen", "GEN"),
    ("ex", "EXO"),
    ("matt", "MAT"),
    ("mt", "MAT"),
    ("mk", "MRK"),
    ("lk", "LUK"),
    ("jn", "JHN"),
    ("rom", "ROM"),
    ("heb", "HEB"),
    ("i samuel", "1SA"),
    ("ii samuel", "2SA"),
    ("i kings", "1KI"),
    ("ii kings", "2KI"),
    ("i corinthians", "1CO"),
    ("ii corinthians", "2CO"),
    ("i john", "1JN"),
    ("ii john", "2JN"),
    ("iii john", "3JN"),
];

/// Normalized name / alias / USFM code -> canonical index.
static INDEX: LazyLock<HashMap<String, usize>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (i, book) in CANON.iter().enumerate() {
        index.insert(normalize(book.name), i);
        index.insert(book.usfm.to_lowercase(), i);
    }
    for (alias, usfm) in ALIASES {
        if let Some(i) = CANON.iter().position(|b| b.usfm == *usfm) {
            index.insert((*alias).to_string(), i);
        }
    }
    index
});

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches('.')
        .to_lowercase()
}

/// Look up a book by name, alias or USFM code (case-insensitive).
pub fn lookup(name: &str) -> Result<&'static Book> {
    canonical_index(name).map(|i| &CANON[i])
}

/// 0-based position of the book in the canon.
pub fn canonical_index(name: &str) -> Result<usize> {
    INDEX
        .get(&normalize(name))
        .copied()
        .ok_or_else(|| Error::UnknownBook(name.to_string()))
}

/// USFM three-letter code for a book name.
pub fn usfm_code(name: &str) -> Result<&'static str> {
    lookup(name).map(|b| b.usfm)
}

/// Lowercase slug with spaces replaced by underscores: `"1 John"` -> `"1_john"`.
///
/// Works on the raw name; no catalog lookup is involved.
#[must_use]
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
