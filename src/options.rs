//! Configuration options for providers and the version table.
//!
//! The `Options` struct carries everything a provider needs at
//! construction: per-provider base URLs and the HTTP transport settings.
//! Nothing here is global; each provider keeps its own copy.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::provider::ProviderKind;

/// Default Bible Gateway site root.
pub const GATEWAY_BASE_URL: &str = "https://www.biblegateway.com";
/// Default BibleHub site root.
pub const HUB_BASE_URL: &str = "https://biblehub.com";
/// Default Bible.com site root.
pub const COM_BASE_URL: &str = "https://www.bible.com";
/// Default BibleNow site root.
pub const NOW_BASE_URL: &str = "https://biblenow.net";

/// Configuration for provider construction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings or [`Options::from_env`] to honor environment
/// overrides.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use scripture_resolver::Options;
///
/// let options = Options {
///     timeout: Duration::from_secs(10),
///     hub_base_url: "http://localhost:8080".to_string(),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Deadline for each outbound document fetch.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,

    /// `User-Agent` header sent with every fetch.
    ///
    /// Default: `scripture-resolver/<crate version>`
    pub user_agent: String,

    /// Bible Gateway site root, no trailing slash.
    pub gateway_base_url: String,

    /// BibleHub site root, no trailing slash.
    pub hub_base_url: String,

    /// Bible.com site root, no trailing slash.
    pub com_base_url: String,

    /// BibleNow site root, no trailing slash.
    pub now_base_url: String,

    /// Version table file. `None` means the bundled table.
    ///
    /// Default: `None`
    pub versions_path: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("scripture-resolver/", env!("CARGO_PKG_VERSION")).to_string(),
            gateway_base_url: GATEWAY_BASE_URL.to_string(),
            hub_base_url: HUB_BASE_URL.to_string(),
            com_base_url: COM_BASE_URL.to_string(),
            now_base_url: NOW_BASE_URL.to_string(),
            versions_path: None,
        }
    }
}

impl Options {
    /// Defaults overlaid with `SCRIPTURE_*` environment variables.
    ///
    /// Recognized: `SCRIPTURE_GATEWAY_BASE_URL`, `SCRIPTURE_HUB_BASE_URL`,
    /// `SCRIPTURE_COM_BASE_URL`, `SCRIPTURE_NOW_BASE_URL`,
    /// `SCRIPTURE_VERSIONS_PATH`, `SCRIPTURE_HTTP_TIMEOUT_SECS`.
    /// Unparsable timeouts are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Ok(url) = env::var("SCRIPTURE_GATEWAY_BASE_URL") {
            opts.gateway_base_url = url;
        }
        if let Ok(url) = env::var("SCRIPTURE_HUB_BASE_URL") {
            opts.hub_base_url = url;
        }
        if let Ok(url) = env::var("SCRIPTURE_COM_BASE_URL") {
            opts.com_base_url = url;
        }
        if let Ok(url) = env::var("SCRIPTURE_NOW_BASE_URL") {
            opts.now_base_url = url;
        }
        if let Ok(path) = env::var("SCRIPTURE_VERSIONS_PATH") {
            opts.versions_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = env::var("SCRIPTURE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            opts.timeout = Duration::from_secs(secs);
        }
        opts
    }

    /// Base URL for one provider, trailing slashes removed.
    #[must_use]
    pub fn base_url(&self, kind: ProviderKind) -> String {
        let url = match kind {
            ProviderKind::Gateway => &self.gateway_base_url,
            ProviderKind::Hub => &self.hub_base_url,
            ProviderKind::Com => &self.com_base_url,
            ProviderKind::Now => &self.now_base_url,
        };
        normalize_base_url(url)
    }
}

/// Strip trailing slashes so paths can be appended with `format!`.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
