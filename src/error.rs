//! Error types for scripture-resolver.
//!
//! Every provider, the sanitizer and the version registry report failures
//! through this one enum. Nothing here is retried internally; the variants
//! carry enough context (status code, offending token, missing provider)
//! for the caller to build a user-facing message.

/// Error type for resolution operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider site answered with something other than `200 OK`.
    #[error("HTTP request to {url} failed with status {status}")]
    HttpStatusError {
        /// Status code returned by the site.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The HTTP transport failed before a status code was available
    /// (connect, timeout, body read).
    #[error("HTTP transport failed: {0}")]
    TransportError(String),

    /// The fetched markup could not be parsed as a document.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// A verse specifier contained a token that is not a verse number.
    #[error("invalid verse range specifier: {0:?}")]
    InvalidRange(String),

    /// The book name has no mapping in the provider's book scheme.
    #[error("unknown book: {0}")]
    UnknownBook(String),

    /// Fewer book links were discovered than the canonical index requires.
    #[error("book index {index} out of range: only {available} book links found")]
    BookIndexOutOfRange {
        /// Canonical 0-based book index that was requested.
        index: usize,
        /// Number of book links found on the version index page.
        available: usize,
    },

    /// The request was valid but produced no verse content.
    #[error("verse not found: {0}")]
    VerseNotFound(String),

    /// The provider has no surface for this capability.
    #[error("{provider} does not support {operation}")]
    UnsupportedOperation {
        /// Provider name.
        provider: &'static str,
        /// Capability that was requested.
        operation: &'static str,
    },

    /// The unified version code is not in the version table.
    #[error("version not found: {0}")]
    VersionNotFound(String),

    /// No preferred provider has a mapping for the version.
    #[error("no suitable provider for version {0}")]
    NoSuitableProvider(String),

    /// The static version table could not be loaded.
    #[error("failed to load version table: {0}")]
    RegistryLoadError(String),

    /// A provider name outside `gateway`, `hub`, `com`, `now`.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::HttpStatusError {
                status: status.as_u16(),
                url: err.url().map(ToString::to_string).unwrap_or_default(),
            },
            None => Self::TransportError(err.to_string()),
        }
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;
