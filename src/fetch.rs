//! Document fetching.
//!
//! Providers never talk to the network directly; they hold a [`Fetch`]
//! implementation injected at construction. [`HttpFetcher`] is the real
//! transport. Any `Fn(&str) -> Result<String>` closure is also a fetcher,
//! which is how tests serve canned pages.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Options;

/// Fetch one document by URL and return its body.
///
/// Implementations must report any response other than `200 OK` as
/// [`Error::HttpStatusError`] and must not retry.
pub trait Fetch: Send + Sync {
    /// GET `url` and return the decoded body.
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<String> {
        self(url)
    }
}

/// Blocking HTTP fetcher with a per-request deadline.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher using the timeout and user agent from `options`.
    pub fn new(options: &Options) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching document");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        debug!(url, bytes = body.len(), "fetched document");
        Ok(body)
    }
}
