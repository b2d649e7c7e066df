// src/fetch/mod.rs
// =============================================================================
// The transport seam of the crawler.
//
// The frontier never talks to reqwest directly. It asks a `Fetcher` for a
// page and gets back either the body (HTTP 200) or a FetchError saying why the
// page was skipped. Tests plug in an in-memory fetcher instead of a network.
// =============================================================================

mod http;

pub use http::HttpFetcher;

use thiserror::Error;

// Why a single page could not be fetched
//
// Neither variant stops the crawl; the page is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with something other than 200
    #[error("status code {0}")]
    Status(u16),
    /// Connection, timeout, TLS or body-read failure
    #[error("{0}")]
    Transport(String),
}

// Capability to download one page
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Returns the page body when the server answers 200
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// Lets a crawler borrow a fetcher instead of owning it
impl<T: Fetcher> Fetcher for &T {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}
