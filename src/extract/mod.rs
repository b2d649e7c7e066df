// src/extract/mod.rs
// =============================================================================
// Link extraction from fetched pages.
//
// Submodules:
// - html: finds <a href> values, either in the navigation bar or everywhere
// =============================================================================

mod html;

pub use html::{extract_links, LinkScope};
