// src/crawl/config.rs
// =============================================================================
// Immutable settings for one crawl run.
//
// Built once from the command line, then handed to the Crawler. The domain is
// never given directly: it's derived from the start URL so the two can't
// disagree.
// =============================================================================

use super::urls::{authority, normalize};
use crate::extract::LinkScope;
use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Normalized seed URL
    pub start_url: String,
    /// Raw authority (host[:port], as written) every crawled page must live on
    pub domain: String,
    /// Where links are collected from on each page
    pub scope: LinkScope,
    /// Timeout for each HTTP request
    pub timeout: Duration,
    /// Depth 1 = just the start page; None = unlimited
    pub max_depth: Option<usize>,
    /// Stop after this many pages were saved; None = unlimited
    pub max_pages: Option<usize>,
    /// How many pages may be downloaded at the same time (at least 1)
    pub concurrency: usize,
}

impl CrawlConfig {
    // Validates the start URL and derives the crawl domain from it
    //
    // Fails when the URL can't be parsed or has no host (e.g. "mailto:...").
    // The domain keeps the start URL's spelling: case and explicit ports stay.
    pub fn new(start_url: &str, scope: LinkScope) -> Result<Self> {
        Url::parse(start_url).map_err(|e| anyhow!("Invalid start URL '{}': {}", start_url, e))?;

        let domain = authority(start_url)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| anyhow!("Start URL has no host: {}", start_url))?
            .to_string();

        Ok(Self {
            start_url: normalize(start_url),
            domain,
            scope,
            timeout: DEFAULT_TIMEOUT,
            max_depth: None,
            max_pages: None,
            concurrency: 1,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    // Whether links found on a page at `depth` should be followed
    pub fn follows_links_at(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }

    // Whether `count` saved pages already hits the page cap
    pub fn page_cap_reached(&self, count: usize) -> bool {
        self.max_pages.is_some_and(|max| count >= max)
    }
}
