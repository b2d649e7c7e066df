// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Stays on the start URL's host (exact authority match, case kept)
// - Follows either navigation-bar links only or every link on the page
// - Each normalized URL is fetched at most once
// - Optional depth / page caps and ordered concurrent fetching
//
// Submodules:
// - config: the immutable settings of one run
// - queue: the crawl loop itself (frontier, visited set, results)
// - urls: normalization, same-domain check, link resolution
// =============================================================================

mod config;
mod queue;
mod urls;

pub use config::CrawlConfig;
pub use queue::Crawler;
