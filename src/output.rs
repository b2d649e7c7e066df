// src/output.rs
// =============================================================================
// Collects fetched pages and writes them to disk as JSON.
//
// Output format:
//   [
//     {
//       "url": "https://example.com/",
//       "html": "<html>...</html>"
//     }
//   ]
//
// - 2-space indentation (serde_json's pretty printer)
// - UTF-8, non-ASCII characters written as-is (never \u-escaped)
// - Array order = order in which pages were fetched
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// One successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL of the page
    pub url: String,
    /// Raw response body, unmodified
    pub html: String,
}

// Append-only, ordered list of fetched pages
#[derive(Debug, Default)]
pub struct ResultCollector {
    pages: Vec<PageRecord>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: String, html: String) {
        self.pages.push(PageRecord { url, html });
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }
}

// Serializes the pages and writes them to `path` in one go
//
// Errors here are fatal for the run.
pub fn write_json(path: &Path, pages: &[PageRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(pages).context("Failed to serialize pages")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write output to '{}'", path.display()))?;
    Ok(())
}

// Reads an output file back (used to verify round-trips)
#[cfg(test)]
pub fn read_json(path: &Path) -> Result<Vec<PageRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}
