//! Version Registry
//!
//! Maps a unified version code (`ESV`) to each provider's own code for that
//! translation and decides which providers to try, in what order. The
//! table is loaded once from a YAML file and is read-only afterwards:
//!
//! ```yaml
//! - code: NIV
//!   name: New International Version
//!   language: English
//!   providers:
//!     gateway: NIV
//!     hub: niv
//!     com: "111"
//! ```
//!
//! A load either yields the complete table or fails; there is no partial
//! registry.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{OnceLock, RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::provider::{DEFAULT_FALLBACK_ORDER, DEFAULT_SELECTION_ORDER};

/// Version table shipped with the crate.
pub const BUNDLED_VERSIONS: &str = include_str!("../data/versions.yaml");

/// One translation and its per-provider codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedVersion {
    /// Unified code, unique case-insensitively.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Language of the translation.
    #[serde(default)]
    pub language: String,
    /// Provider name -> provider code.
    #[serde(default)]
    pub providers: BTreeMap<String, String>,
}

impl UnifiedVersion {
    /// Non-empty code for `provider`, if mapped.
    #[must_use]
    pub fn provider_code(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider)
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
    }
}

/// A provider chosen for a version, with the code to send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderChoice {
    /// Provider name (`gateway`).
    pub provider: String,
    /// Provider-specific version code.
    pub code: String,
}

#[derive(Debug, Default)]
struct Table {
    /// Versions in file order.
    versions: Vec<UnifiedVersion>,
    /// Uppercased code -> position in `versions`.
    index: HashMap<String, usize>,
}

/// The loaded version table.
#[derive(Debug)]
pub struct VersionRegistry {
    table: RwLock<Table>,
}

impl VersionRegistry {
    /// Load the table from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|e| Error::RegistryLoadError(format!("{}: {e}", path.display())))?;
        let registry = Self::from_yaml_str(&yaml)?;
        debug!(path = %path.display(), versions = registry.len(), "loaded version table");
        Ok(registry)
    }

    /// Parse the table from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let versions: Vec<UnifiedVersion> =
            serde_yaml::from_str(yaml).map_err(|e| Error::RegistryLoadError(e.to_string()))?;
        Self::from_versions(versions)
    }

    /// Build from already-parsed records.
    ///
    /// Fails on an empty or duplicate (case-insensitive) code.
    pub fn from_versions(versions: Vec<UnifiedVersion>) -> Result<Self> {
        let mut index = HashMap::with_capacity(versions.len());
        for (i, version) in versions.iter().enumerate() {
            let key = normalize_code(&version.code);
            if key.is_empty() {
                return Err(Error::RegistryLoadError(format!("entry {i} has an empty code")));
            }
            if index.insert(key, i).is_some() {
                return Err(Error::RegistryLoadError(format!(
                    "duplicate version code {:?}",
                    version.code
                )));
            }
        }
        Ok(Self {
            table: RwLock::new(Table { versions, index }),
        })
    }

    /// The table bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_VERSIONS)
    }

    /// The table at `options.versions_path`, or the bundled one.
    pub fn from_options(options: &Options) -> Result<Self> {
        match &options.versions_path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        // The table is never written after construction, so a poisoned lock
        // still guards consistent data.
        self.table.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Number of versions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().versions.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All versions, in file order.
    #[must_use]
    pub fn get_all(&self) -> Vec<UnifiedVersion> {
        self.read().versions.clone()
    }

    /// One version by unified code (case-insensitive).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<UnifiedVersion> {
        let table = self.read();
        table
            .index
            .get(&normalize_code(code))
            .map(|&i| table.versions[i].clone())
    }

    /// Provider code for a unified code.
    ///
    /// Unknown versions and missing mappings pass `unified_code` through
    /// unchanged; this never fails.
    #[must_use]
    pub fn get_provider_code(&self, unified_code: &str, provider: &str) -> String {
        let table = self.read();
        table
            .index
            .get(&normalize_code(unified_code))
            .and_then(|&i| table.versions[i].provider_code(provider))
            .map_or_else(|| unified_code.to_string(), ToString::to_string)
    }

    /// First provider in preference order with a mapping for the version.
    ///
    /// An empty preference list means `[gateway, hub, now]`.
    pub fn select_provider(&self, unified_code: &str, preferred: &[&str]) -> Result<ProviderChoice> {
        let default_order = DEFAULT_SELECTION_ORDER.map(|k| k.as_str());
        let order = if preferred.is_empty() { &default_order[..] } else { preferred };
        self.matching_providers(unified_code, order)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoSuitableProvider(unified_code.to_string()))
    }

    /// Every provider in preference order with a mapping for the version.
    ///
    /// An empty preference list means `[gateway, hub, now, com]`.
    pub fn get_prioritized_providers(
        &self,
        unified_code: &str,
        preferred: &[&str],
    ) -> Result<Vec<ProviderChoice>> {
        let default_order = DEFAULT_FALLBACK_ORDER.map(|k| k.as_str());
        let order = if preferred.is_empty() { &default_order[..] } else { preferred };
        let choices = self.matching_providers(unified_code, order)?;
        if choices.is_empty() {
            return Err(Error::NoSuitableProvider(unified_code.to_string()));
        }
        Ok(choices)
    }

    fn matching_providers(&self, unified_code: &str, order: &[&str]) -> Result<Vec<ProviderChoice>> {
        let table = self.read();
        let version = table
            .index
            .get(&normalize_code(unified_code))
            .map(|&i| &table.versions[i])
            .ok_or_else(|| Error::VersionNotFound(unified_code.to_string()))?;

        let mut choices: Vec<ProviderChoice> = Vec::new();
        for name in order {
            let name = name.trim();
            if choices.iter().any(|c| c.provider == name) {
                continue;
            }
            if let Some(code) = version.provider_code(name) {
                choices.push(ProviderChoice {
                    provider: name.to_string(),
                    code: code.to_string(),
                });
            }
        }
        Ok(choices)
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// === Process-wide table ===

static GLOBAL: OnceLock<VersionRegistry> = OnceLock::new();

/// Install the process-wide table. Only the first call wins; later calls
/// hand their registry back as `Err`.
pub fn install(registry: VersionRegistry) -> std::result::Result<(), VersionRegistry> {
    GLOBAL.set(registry)
}

/// The process-wide table, if installed.
#[must_use]
pub fn global() -> Option<&'static VersionRegistry> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
- code: ESV
  name: English Standard Version
  language: English
  providers:
    gateway: ESV
    hub: esv
- code: KJV
  name: King James Version
  language: English
  providers:
    gateway: KJV
    hub: kjv
    now: king-james-version
    com: "1"
- code: SBLGNT
  name: SBL Greek New Testament
  language: Greek
  providers:
    com: "156"
    gateway: ""
"#;

    fn registry() -> VersionRegistry {
        VersionRegistry::from_yaml_str(TABLE).unwrap_or_else(|e| panic!("test table: {e}"))
    }

    #[test]
    fn provider_code_lookup_is_case_insensitive() {
        let reg = registry();
        assert_eq!(reg.get_provider_code("esv", "hub"), "esv");
        assert_eq!(reg.get_provider_code("KJV", "com"), "1");
    }

    #[test]
    fn provider_code_passes_through() {
        let reg = registry();
        assert_eq!(reg.get_provider_code("UNKNOWN", "anyProvider"), "UNKNOWN");
        assert_eq!(reg.get_provider_code("ESV", "now"), "ESV");
        assert_eq!(reg.get_provider_code("SBLGNT", "gateway"), "SBLGNT");
    }

    #[test]
    fn select_provider_default_and_preferred() {
        let reg = registry();
        let choice = reg.select_provider("ESV", &[]).ok();
        assert_eq!(choice.map(|c| (c.provider, c.code)), Some(("gateway".into(), "ESV".into())));

        let choice = reg.select_provider("ESV", &["hub", "gateway"]).ok();
        assert_eq!(choice.map(|c| (c.provider, c.code)), Some(("hub".into(), "esv".into())));
    }

    #[test]
    fn select_provider_failures() {
        let reg = registry();
        assert!(matches!(reg.select_provider("NOPE", &[]), Err(Error::VersionNotFound(_))));
        // com is outside the default selection order
        assert!(matches!(
            reg.select_provider("SBLGNT", &[]),
            Err(Error::NoSuitableProvider(_))
        ));
    }

    #[test]
    fn prioritized_providers_extend_default_with_com() {
        let reg = registry();
        let names: Vec<String> = reg
            .get_prioritized_providers("kjv", &[])
            .map(|v| v.into_iter().map(|c| c.provider).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["gateway", "hub", "now", "com"]);

        let sbl = reg.get_prioritized_providers("SBLGNT", &[]).unwrap_or_default();
        assert_eq!(sbl, vec![ProviderChoice { provider: "com".into(), code: "156".into() }]);
    }

    #[test]
    fn prioritized_providers_failures() {
        let reg = registry();
        assert!(matches!(
            reg.get_prioritized_providers("NOPE", &[]),
            Err(Error::VersionNotFound(_))
        ));
        assert!(matches!(
            reg.get_prioritized_providers("ESV", &["com", "now"]),
            Err(Error::NoSuitableProvider(_))
        ));
    }

    #[test]
    fn duplicate_and_empty_codes_fail() {
        let dup = "- code: ESV\n- code: esv\n";
        assert!(matches!(VersionRegistry::from_yaml_str(dup), Err(Error::RegistryLoadError(_))));
        let empty = "- code: ''\n";
        assert!(matches!(VersionRegistry::from_yaml_str(empty), Err(Error::RegistryLoadError(_))));
    }

    #[test]
    fn malformed_yaml_fails() {
        assert!(matches!(
            VersionRegistry::from_yaml_str("code: [unclosed"),
            Err(Error::RegistryLoadError(_))
        ));
        assert!(matches!(
            VersionRegistry::from_yaml_str("just a string"),
            Err(Error::RegistryLoadError(_))
        ));
    }

    #[test]
    fn get_all_keeps_file_order() {
        let codes: Vec<String> = registry().get_all().into_iter().map(|v| v.code).collect();
        assert_eq!(codes, vec!["ESV", "KJV", "SBLGNT"]);
        assert_eq!(registry().get("kjv").map(|v| v.name), Some("King James Version".into()));
    }

    #[test]
    fn bundled_table_loads() {
        let reg = VersionRegistry::bundled().unwrap_or_else(|e| panic!("bundled table: {e}"));
        assert!(!reg.is_empty());
        assert!(reg.get("NIV").is_some());
    }
}
