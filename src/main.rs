// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (debug lines go to stderr)
// 2. Parse command-line arguments using clap
// 3. Crawl the site
// 4. Write every fetched page to the output JSON file
// 5. Exit with proper code (0 = done, 2 = fatal error)
//
// Individual pages failing (404, timeouts, ...) never change the exit code;
// only an invalid start URL or an unwritable output file do.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl loop, URL normalization, domain guard
mod extract; // src/extract/ - link extraction from HTML
mod fetch; // src/fetch/ - HTTP transport
mod output; // src/output.rs - page records and the JSON writer

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::{CrawlConfig, Crawler};
use extract::LinkScope;
use fetch::HttpFetcher;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// Log filter used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "navcrawl=debug";

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    std::process::exit(exit_code(run(cli).await));
}

// Maps the outcome of a run onto the process exit code
fn exit_code(outcome: Result<i32>) -> i32 {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    }
}

// Sends tracing output to stderr so it never mixes with anything on stdout
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Runs one crawl and writes its output
//
// Returns:
//   Ok(0) = crawl finished and output written
//   Err   = fatal error (bad start URL, HTTP client setup, output write)
async fn run(cli: Cli) -> Result<i32> {
    let restrict_navbar = cli.restrict_navbar();

    tracing::debug!("Starting crawl from: {}", cli.start_url);
    tracing::debug!("Output JSON: {}", cli.output_json.display());
    tracing::debug!("Restrict to #navigationbar links: {}", restrict_navbar);

    let config = CrawlConfig::new(&cli.start_url, LinkScope::from_restrict_navbar(restrict_navbar))?
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_depth(cli.max_depth)
        .with_max_pages(cli.max_pages)
        .with_concurrency(usize::from(cli.concurrency));

    let fetcher = HttpFetcher::new(config.timeout)?;
    let report = Crawler::new(config, fetcher).run().await;

    if report.results.is_empty() {
        tracing::warn!("No pages could be fetched from {}", cli.start_url);
    }

    output::write_json(&cli.output_json, report.results.pages())?;

    let stats = &report.stats;
    tracing::debug!(
        "Crawl stats: {} fetched, {} failed, {} links seen ({} off-domain) in {:.2}s",
        stats.pages_fetched,
        stats.pages_failed,
        stats.links_discovered,
        stats.links_off_domain,
        stats.duration.as_secs_f64()
    );
    tracing::debug!(
        "Done! Scraped {} pages. Results saved to {}",
        report.results.len(),
        cli.output_json.display()
    );

    Ok(0)
}
