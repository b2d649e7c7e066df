// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the CLI, clap generates the
// parsing, --help and --version output from it.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "navcrawl",
    version,
    about = "Crawl one website and save every page's HTML to a JSON file",
    long_about = "navcrawl crawls a website breadth-first from a start URL, never leaving \
                  the start URL's host. By default it only follows the links found in the \
                  page's <div id=\"navigationbar\">, which is how conference sites list their pages."
)]
pub struct Cli {
    /// Starting URL for the crawl
    #[arg(long, default_value = "https://sigcse2025.sigcse.org")]
    pub start_url: String,

    /// Path to the output JSON file
    #[arg(long, default_value = "sigcse2025_all_pages.json")]
    pub output_json: PathBuf,

    /// Only follow links within div#navigationbar (default)
    #[arg(long, overrides_with = "no_restrict_navbar")]
    restrict_navbar: bool,

    /// Follow every link on the page, not just the navigation bar
    #[arg(long, overrides_with = "restrict_navbar")]
    no_restrict_navbar: bool,

    /// Maximum crawl depth (1 = only the start page). Unlimited if omitted
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Stop after this many pages were saved. Unlimited if omitted
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Timeout in seconds for each HTTP request
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// How many pages to download at the same time (output order is unaffected)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,
}

impl Cli {
    // Resolves the --restrict-navbar / --no-restrict-navbar pair
    //
    // Restricting is the default; when both flags are given the last one wins.
    pub fn restrict_navbar(&self) -> bool {
        self.restrict_navbar || !self.no_restrict_navbar
    }
}
