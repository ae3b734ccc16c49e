//! Resolution Manager
//!
//! Composes the version table with the provider set. Plain lookups go to a
//! single primary provider; [`ResolutionManager::get_verse_with_fallback`]
//! walks the table's prioritized provider list instead.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::provider::{self, Provider, ProviderKind};
use crate::registry::VersionRegistry;
use crate::result::{ProviderVersionEntry, SearchResult, VerseQuery};

/// Routes verse and search requests to providers.
pub struct ResolutionManager {
    registry: Arc<VersionRegistry>,
    providers: BTreeMap<ProviderKind, Box<dyn Provider>>,
    primary: ProviderKind,
}

impl ResolutionManager {
    /// All four providers over HTTP, Bible Gateway as primary.
    pub fn new(registry: Arc<VersionRegistry>, options: &Options) -> Result<Self> {
        Self::with_providers(registry, provider::build_all(options)?, ProviderKind::Gateway)
    }

    /// Manager over an explicit provider set.
    ///
    /// A later provider of the same kind replaces an earlier one. Fails
    /// when `primary` is not among `providers`.
    pub fn with_providers(
        registry: Arc<VersionRegistry>,
        providers: Vec<Box<dyn Provider>>,
        primary: ProviderKind,
    ) -> Result<Self> {
        let providers: BTreeMap<_, _> = providers.into_iter().map(|p| (p.kind(), p)).collect();
        if !providers.contains_key(&primary) {
            return Err(Error::UnknownProvider(primary.as_str().to_string()));
        }
        Ok(Self {
            registry,
            providers,
            primary,
        })
    }

    /// Switch the primary provider.
    pub fn set_primary(&mut self, kind: ProviderKind) -> Result<()> {
        if !self.providers.contains_key(&kind) {
            return Err(Error::UnknownProvider(kind.as_str().to_string()));
        }
        self.primary = kind;
        Ok(())
    }

    /// The primary provider's kind.
    #[must_use]
    pub const fn primary(&self) -> ProviderKind {
        self.primary
    }

    /// The provider of `kind`, if held.
    #[must_use]
    pub fn provider(&self, kind: ProviderKind) -> Option<&dyn Provider> {
        self.providers.get(&kind).map(AsRef::as_ref)
    }

    /// The version table.
    #[must_use]
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    fn require(&self, kind: ProviderKind) -> Result<&dyn Provider> {
        self.provider(kind)
            .ok_or_else(|| Error::UnknownProvider(kind.as_str().to_string()))
    }

    /// Look up a passage on the primary provider.
    pub fn get_verse(&self, query: &VerseQuery) -> Result<String> {
        self.get_verse_from(self.primary, query)
    }

    fn get_verse_from(&self, kind: ProviderKind, query: &VerseQuery) -> Result<String> {
        let provider = self.require(kind)?;
        let code = self.registry.get_provider_code(&query.version, kind.as_str());
        debug!(provider = %kind, version = %query.version, %code, reference = %query.reference(), "resolving verse");
        provider.get_verse(&query.book, &query.chapter, query.verses.as_deref(), &code)
    }

    /// Look up a passage on each provider the table maps the version to,
    /// in default fallback order, until one succeeds.
    ///
    /// Returns the last failure when every candidate fails. Providers the
    /// table names but this manager does not hold are skipped.
    pub fn get_verse_with_fallback(&self, query: &VerseQuery) -> Result<String> {
        let choices = self.registry.get_prioritized_providers(&query.version, &[])?;

        let mut last_error = None;
        for choice in choices {
            let Ok(kind) = choice.provider.parse::<ProviderKind>() else {
                warn!(provider = %choice.provider, "skipping unrecognized provider name");
                continue;
            };
            let Some(provider) = self.provider(kind) else {
                continue;
            };
            match provider.get_verse(&query.book, &query.chapter, query.verses.as_deref(), &choice.code) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(provider = %kind, error = %e, reference = %query.reference(), "provider failed, trying next");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| Error::NoSuitableProvider(query.version.clone())))
    }

    /// Word search on the primary provider.
    pub fn search_words(&self, query: &str, unified_code: &str) -> Result<Vec<SearchResult>> {
        let provider = self.require(self.primary)?;
        let code = self.registry.get_provider_code(unified_code, self.primary.as_str());
        provider.search_words(query, &code)
    }

    /// Version listing of one provider.
    pub fn get_versions(&self, kind: ProviderKind) -> Result<Vec<ProviderVersionEntry>> {
        self.require(kind)?.get_versions()
    }
}

impl std::fmt::Debug for ResolutionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionManager")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .field("primary", &self.primary)
            .field("versions", &self.registry.len())
            .finish()
    }
}
