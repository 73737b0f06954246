//! Scheme dispatch: one fetch strategy per [`Url`] variant.

mod data;
mod file;
mod network;

use crate::error::Result;
use crate::http::Response;
use crate::transport::{Connector, TcpConnector};
use crate::url_model::Url;

/// `User-Agent` sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("rfetch/", env!("CARGO_PKG_VERSION"));

/// Per-request settings for network fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Routes parsed identifiers to their fetch strategy.
///
/// Each call is a single synchronous attempt: no retries, no timeouts, and
/// the network stream is closed before `fetch` returns.
#[derive(Debug, Clone)]
pub struct Fetcher<C = TcpConnector> {
    connector: C,
    options: FetchOptions,
}

impl Fetcher<TcpConnector> {
    pub fn new(options: FetchOptions) -> Self {
        Self::with_connector(TcpConnector::new(), options)
    }
}

impl Default for Fetcher<TcpConnector> {
    fn default() -> Self {
        Self::new(FetchOptions::default())
    }
}

impl<C: Connector> Fetcher<C> {
    pub fn with_connector(connector: C, options: FetchOptions) -> Self {
        Self { connector, options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn fetch(&self, url: &Url) -> Result<Response> {
        tracing::debug!(scheme = %url.scheme(), "fetching {}", url);
        match url {
            Url::Http(loc) => network::fetch(&self.connector, loc, false, &self.options.user_agent),
            Url::Https(loc) => network::fetch(&self.connector, loc, true, &self.options.user_agent),
            Url::File(loc) => file::fetch(&loc.path()),
            Url::Data(payload) => Ok(data::fetch(payload)),
        }
    }
}

/// Fetch with a default [`Fetcher`].
pub fn fetch(url: &Url) -> Result<Response> {
    Fetcher::default().fetch(url)
}
