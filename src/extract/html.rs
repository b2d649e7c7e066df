// src/extract/html.rs
// =============================================================================
// This module pulls the raw href values out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever, Mozilla's HTML parser)
// - Supports CSS selectors for finding elements
//
// Two scopes are supported:
// - Navigation: only links inside <div id="navigationbar">
// - Document: every link on the page
//
// The hrefs are returned exactly as written in the page (relative or absolute).
// Resolving them is the frontier's job, because only it knows the page URL.
// =============================================================================

use scraper::{ElementRef, Html, Selector};

// CSS selector for the navigation container on conference-style sites
pub const NAVIGATION_SELECTOR: &str = "div#navigationbar";

// CSS selector for "every <a> tag that has an href attribute"
const LINK_SELECTOR: &str = "a[href]";

// Where on the page links are collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// Only links inside the navigation container
    Navigation,
    /// Every link in the document
    Document,
}

impl LinkScope {
    // Maps the --restrict-navbar flag onto a scope
    pub fn from_restrict_navbar(restrict: bool) -> Self {
        if restrict {
            LinkScope::Navigation
        } else {
            LinkScope::Document
        }
    }
}

// Extracts href values from HTML content
//
// Parameters:
//   html: the page source
//   scope: which part of the page to look at
//
// Returns: hrefs in document order. With LinkScope::Navigation and no
// navigation container on the page, the result is empty (not an error).
//
// Example:
//   html = "<div id='navigationbar'><a href='/a'>A</a></div><a href='/b'>B</a>"
//   Navigation -> ["/a"]
//   Document   -> ["/a", "/b"]
pub fn extract_links(html: &str, scope: LinkScope) -> Vec<String> {
    let document = Html::parse_document(html);

    // Both selectors are constants and known to be valid
    let link_selector = Selector::parse(LINK_SELECTOR).expect("valid link selector");

    match scope {
        LinkScope::Navigation => {
            let nav_selector =
                Selector::parse(NAVIGATION_SELECTOR).expect("valid navigation selector");

            match document.select(&nav_selector).next() {
                Some(nav) => hrefs_in(nav, &link_selector),
                None => {
                    tracing::debug!("No {} found, page contributes no links", NAVIGATION_SELECTOR);
                    Vec::new()
                }
            }
        }
        LinkScope::Document => hrefs_in(document.root_element(), &link_selector),
    }
}

// Collects the href attribute of every element under `root` matching `selector`
fn hrefs_in(root: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    root.select(selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why select().next() for the navigation bar?
//    - A well-formed page has a single #navigationbar
//    - If a page repeats the id, only the first container counts
//
// 2. Why not filter mailto:/javascript: here?
//    - Those are dropped later by the domain guard (they have no host)
//    - Keeping this function dumb makes the scope rules easy to test
//
// 3. What does ElementRef::select do?
//    - Same as Html::select but limited to the element's descendants
// -----------------------------------------------------------------------------
