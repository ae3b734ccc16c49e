//! # scripture-resolver
//!
//! Resolve Bible verse references against third-party scripture sites.
//!
//! A caller asks for a book, chapter, optional verse range and a unified
//! version code (`ESV`). The version table translates that code to what a
//! given site calls the same translation, the site's provider fetches the
//! page, locates the verse nodes and returns their text. Bible Gateway
//! returns sanitized passage markup instead of plain text.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use scripture_resolver::{ComProvider, Provider, Result};
//!
//! let page = r#"<span data-usfm="JHN.3.16">For God so loved the world</span>"#;
//! let provider = ComProvider::with_fetcher(
//!     "https://www.bible.com",
//!     Arc::new(move |_url: &str| -> Result<String> { Ok(page.to_string()) }),
//! );
//!
//! let text = provider.get_verse("John", "3", Some("16"), "111")?;
//! assert_eq!(text, "For God so loved the world");
//! # Ok::<(), scripture_resolver::Error>(())
//! ```
//!
//! Against the live sites, build a [`ResolutionManager`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scripture_resolver::{Options, ResolutionManager, VersionRegistry, VerseQuery};
//!
//! let options = Options::from_env();
//! let registry = Arc::new(VersionRegistry::from_options(&options)?);
//! let manager = ResolutionManager::new(registry, &options)?;
//!
//! let query = VerseQuery::new("John", "3", Some("16-17"), "ESV");
//! println!("{}", manager.get_verse_with_fallback(&query)?);
//! # Ok::<(), scripture_resolver::Error>(())
//! ```
//!
//! ## Providers
//!
//! - **Bible Gateway**: passage markup, cleaned by [`sanitize()`]
//! - **BibleHub**: text between `reftext` verse markers
//! - **Bible.com**: text of `data-usfm` verse spans
//! - **BibleNow**: two fetches, version index then chapter page
//!
//! Nothing is retried inside a provider. Fallback across providers is
//! [`ResolutionManager::get_verse_with_fallback`], driven by the version
//! table's preference order.

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Fixed 66-book canon, USFM codes and aliases.
pub mod books;

/// Verse range specifiers.
pub mod range;

/// Passage HTML sanitizer.
pub mod sanitize;

/// Document fetching (HTTP or injected).
pub mod fetch;

/// URL building and resolution.
pub mod url_utils;

/// The provider capability set and the four site implementations.
pub mod provider;

/// Unified version table and provider selection policy.
pub mod registry;

/// Primary-provider routing and fallback.
pub mod manager;

// Public API - re-exports
pub use error::{Error, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use manager::ResolutionManager;
pub use options::Options;
pub use provider::{
    ComProvider, GatewayProvider, HubProvider, NowProvider, Provider, ProviderKind,
};
pub use range::VerseRange;
pub use registry::{ProviderChoice, UnifiedVersion, VersionRegistry};
pub use result::{ProviderVersionEntry, SearchResult, VerseQuery};
pub use sanitize::sanitize;
