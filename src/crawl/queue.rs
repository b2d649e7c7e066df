// src/crawl/queue.rs
// =============================================================================
// This module implements the breadth-first crawl loop.
//
// How it works:
// 1. Start with the seed URL in a queue (and in the visited set)
// 2. Take the next URL(s) from the front of the queue and fetch them
// 3. Save every page that answered 200
// 4. Extract links (navigation bar only, or the whole page)
// 5. Resolve + normalize each link; keep it if it's on the seed's host and
//    hasn't been seen yet, and push it to the back of the queue
// 6. Repeat until the queue is empty (or a configured cap is hit)
//
// A URL is marked visited the moment it is queued, so it can sit in the
// queue at most once and is fetched exactly once.
//
// Failures are per page: a timeout, a 404 or a page without a navigation bar
// only means that page contributes nothing. The crawl itself never aborts.
// =============================================================================

use super::config::CrawlConfig;
use super::urls::{normalize, resolve, same_domain};
use crate::extract::extract_links;
use crate::fetch::{FetchError, Fetcher};
use crate::output::ResultCollector;
use futures::stream::{self, StreamExt};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

// A page waiting in the crawl queue
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    depth: usize, // 1 = the start page
}

// Counters reported at the end of a crawl
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub links_discovered: usize,
    pub links_off_domain: usize,
    pub duration: Duration,
}

// Everything a finished crawl produced
#[derive(Debug)]
pub struct CrawlReport {
    pub results: ResultCollector,
    pub stats: CrawlStats,
}

// Owns the whole crawl state: queue, visited set and results
//
// Nothing is global. Each run gets its own Crawler, and the fetcher is
// injected so tests can swap the network out.
pub struct Crawler<F> {
    config: CrawlConfig,
    fetcher: F,
    queue: VecDeque<CrawlItem>,
    visited: HashSet<String>,
    results: ResultCollector,
    stats: CrawlStats,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let seed = CrawlItem {
            url: config.start_url.clone(),
            depth: 1,
        };

        let mut visited = HashSet::new();
        visited.insert(seed.url.clone());

        Self {
            config,
            fetcher,
            queue: VecDeque::from([seed]),
            visited,
            results: ResultCollector::new(),
            stats: CrawlStats::default(),
        }
    }

    // Runs the crawl to completion
    //
    // With concurrency N, up to N queued pages are downloaded at once, but
    // they are processed strictly in queue order, so the output is identical
    // to a sequential crawl.
    pub async fn run(mut self) -> CrawlReport {
        let started = Instant::now();

        while !self.queue.is_empty() && !self.config.page_cap_reached(self.results.len()) {
            let batch = self.next_batch();

            let fetcher = &self.fetcher;
            let fetched: Vec<(CrawlItem, Result<String, FetchError>)> = stream::iter(batch)
                .map(move |item| async move {
                    tracing::debug!("Scraping: {}", item.url);
                    let outcome = fetcher.fetch(&item.url).await;
                    (item, outcome)
                })
                .buffered(self.config.concurrency)
                .collect()
                .await;

            for (item, outcome) in fetched {
                self.process(item, outcome);
            }
        }

        self.stats.duration = started.elapsed();
        CrawlReport {
            results: self.results,
            stats: self.stats,
        }
    }

    // Pops the next items to fetch, never more than the page cap still allows
    fn next_batch(&mut self) -> Vec<CrawlItem> {
        let mut size = self.config.concurrency;
        if let Some(max) = self.config.max_pages {
            size = size.min(max.saturating_sub(self.results.len()));
        }

        let size = size.min(self.queue.len());
        self.queue.drain(..size).collect()
    }

    // Handles one fetched (or failed) page
    fn process(&mut self, item: CrawlItem, outcome: Result<String, FetchError>) {
        let html = match outcome {
            Ok(html) => html,
            Err(FetchError::Status(code)) => {
                tracing::debug!("Skipping {} (status code {})", item.url, code);
                self.stats.pages_failed += 1;
                return;
            }
            Err(e) => {
                tracing::debug!("Request failed for {}: {}", item.url, e);
                self.stats.pages_failed += 1;
                return;
            }
        };

        if self.config.follows_links_at(item.depth) {
            let hrefs = extract_links(&html, self.config.scope);
            self.enqueue_links(&item, &hrefs);
        }

        self.results.push(item.url, html);
        self.stats.pages_fetched += 1;
    }

    // Resolves, filters and queues the links found on `page`
    fn enqueue_links(&mut self, page: &CrawlItem, hrefs: &[String]) {
        self.stats.links_discovered += hrefs.len();

        for href in hrefs {
            let Some(absolute) = resolve(&page.url, href) else {
                continue;
            };
            let link = normalize(&absolute);

            if !same_domain(&link, &self.config.domain) {
                self.stats.links_off_domain += 1;
                continue;
            }

            // insert() returns false if the URL was already seen
            if self.visited.insert(link.clone()) {
                self.queue.push_back(CrawlItem {
                    url: link,
                    depth: page.depth + 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::LinkScope;
    use crate::fetch::HttpFetcher;
    use std::cell::RefCell;
    use std::collections::HashMap;

    // In-memory website: unknown URLs answer 404
    #[derive(Default)]
    struct MockSite {
        pages: HashMap<String, Result<String, FetchError>>,
        requested: RefCell<Vec<String>>,
    }

    impl MockSite {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(html.to_string()));
            self
        }

        fn failing(mut self, url: &str, error: FetchError) -> Self {
            self.pages.insert(url.to_string(), Err(error));
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }
    }

    impl Fetcher for MockSite {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::Status(404)))
        }
    }

    fn nav(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!(r#"<html><body><div id="navigationbar">{}</div></body></html>"#, anchors)
    }

    fn config(start: &str, scope: LinkScope) -> CrawlConfig {
        CrawlConfig::new(start, scope).unwrap()
    }

    async fn crawl(config: CrawlConfig, site: &MockSite) -> CrawlReport {
        Crawler::new(config, site).run().await
    }

    fn urls(report: &CrawlReport) -> Vec<&str> {
        report.results.pages().iter().map(|p| p.url.as_str()).collect()
    }

    // Seed "/" links to /a and /b; /a links back home and off-site
    fn conference_site() -> MockSite {
        MockSite::default()
            .page("https://example.test/", &nav(&["/a", "/b"]))
            .page("https://example.test/a", &nav(&["/", "https://other.test/x"]))
            .page("https://example.test/b", "<html><body>B</body></html>")
    }

    #[tokio::test]
    async fn test_breadth_first_crawl() {
        let site = conference_site();

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(
            urls(&report),
            vec!["https://example.test/", "https://example.test/a", "https://example.test/b"]
        );
        assert_eq!(report.results.pages()[2].html, "<html><body>B</body></html>");
        // "/" is not fetched twice and other.test is never touched
        assert_eq!(
            site.requested(),
            vec!["https://example.test/", "https://example.test/a", "https://example.test/b"]
        );
        assert_eq!(report.stats.links_off_domain, 1);
        assert_eq!(report.stats.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_not_found_does_not_stop_crawl() {
        let site = MockSite::default()
            .page("https://example.test/", &nav(&["/missing", "/ok"]))
            .page("https://example.test/ok", "ok");

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(urls(&report), vec!["https://example.test/", "https://example.test/ok"]);
        assert_eq!(site.requested().len(), 3);
        assert_eq!(report.stats.pages_failed, 1);
    }

    #[tokio::test]
    async fn test_transport_error_does_not_stop_crawl() {
        let site = MockSite::default()
            .page("https://example.test/", &nav(&["/slow", "/ok"]))
            .failing(
                "https://example.test/slow",
                FetchError::Transport("request timed out".into()),
            )
            .page("https://example.test/ok", "ok");

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(urls(&report), vec!["https://example.test/", "https://example.test/ok"]);
    }

    #[tokio::test]
    async fn test_failed_seed_yields_empty_results() {
        let site = MockSite::default();

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert!(report.results.is_empty());
        assert_eq!(site.requested(), vec!["https://example.test/"]);
    }

    #[tokio::test]
    async fn test_page_without_navbar_adds_nothing() {
        let site = MockSite::default()
            .page("https://example.test/", r#"<a href="/a">A</a><a href="/b">B</a>"#)
            .page("https://example.test/a", "a");

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(urls(&report), vec!["https://example.test/"]);
        assert_eq!(site.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_whole_document_scope_follows_every_link() {
        let site = MockSite::default()
            .page(
                "https://example.test/",
                r#"<div id="navigationbar"><a href="/nav">N</a></div><a href="/body">B</a>"#,
            )
            .page("https://example.test/nav", "nav")
            .page("https://example.test/body", "body");

        let report = crawl(config("https://example.test/", LinkScope::Document), &site).await;

        assert_eq!(
            urls(&report),
            vec!["https://example.test/", "https://example.test/nav", "https://example.test/body"]
        );
    }

    #[tokio::test]
    async fn test_query_and_fragment_variants_fetched_once() {
        let site = MockSite::default()
            .page(
                "https://example.test/",
                &nav(&["/a?lang=en", "/a#program", "/a", "#top", "?q=1"]),
            )
            .page("https://example.test/a", "a");

        let report = crawl(config("https://example.test/?utm=x", LinkScope::Navigation), &site).await;

        assert_eq!(urls(&report), vec!["https://example.test/", "https://example.test/a"]);
        assert_eq!(
            site.requested(),
            vec!["https://example.test/", "https://example.test/a"]
        );
    }

    #[tokio::test]
    async fn test_off_domain_links_never_fetched() {
        let site = MockSite::default().page(
            "https://example.test/",
            &nav(&[
                "https://www.example.test/",
                "https://example.test:8443/",
                "https://other.test/",
                "mailto:chair@example.test",
                "javascript:void(0)",
            ]),
        );

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(site.requested(), vec!["https://example.test/"]);
        assert_eq!(report.stats.links_off_domain, 5);
        assert_eq!(report.stats.links_discovered, 5);
    }

    #[tokio::test]
    async fn test_trailing_slash_variants_are_distinct() {
        let site = MockSite::default()
            .page("https://example.test/", &nav(&["/page", "/page/"]))
            .page("https://example.test/page", "no slash")
            .page("https://example.test/page/", "slash");

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        assert_eq!(report.results.len(), 3);
    }

    // Every page links to every other page: each must still be fetched once
    fn fully_connected_site() -> MockSite {
        let paths = ["/", "/1", "/2", "/3", "/4", "/5", "/6"];
        let mut site = MockSite::default();
        for path in paths {
            let url = format!("https://example.test{}", path);
            site = site.page(&url, &nav(&paths));
        }
        site
    }

    #[tokio::test]
    async fn test_each_url_fetched_exactly_once() {
        let site = fully_connected_site();

        let report = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;

        let requested = site.requested();
        let unique: HashSet<_> = requested.iter().collect();
        assert_eq!(requested.len(), 7);
        assert_eq!(unique.len(), 7);
        assert_eq!(report.results.len(), 7);
    }

    #[tokio::test]
    async fn test_concurrent_crawl_matches_sequential_order() {
        let site = conference_site()
            .page("https://example.test/b", &nav(&["/c", "/d"]))
            .page("https://example.test/c", &nav(&["/e"]))
            .page("https://example.test/d", "d")
            .page("https://example.test/e", "e");

        let sequential = crawl(config("https://example.test/", LinkScope::Navigation), &site).await;
        let concurrent = crawl(
            config("https://example.test/", LinkScope::Navigation).with_concurrency(4),
            &site,
        )
        .await;

        assert_eq!(urls(&sequential), urls(&concurrent));
        assert_eq!(urls(&sequential).len(), 6);
    }

    #[tokio::test]
    async fn test_max_pages_caps_results() {
        let site = fully_connected_site();

        let report = crawl(
            config("https://example.test/", LinkScope::Navigation)
                .with_max_pages(Some(3))
                .with_concurrency(2),
            &site,
        )
        .await;

        assert_eq!(
            urls(&report),
            vec!["https://example.test/", "https://example.test/1", "https://example.test/2"]
        );
        assert_eq!(site.requested().len(), 3);
    }

    #[tokio::test]
    async fn test_max_depth_limits_link_following() {
        let site = MockSite::default()
            .page("https://example.test/", &nav(&["/level2"]))
            .page("https://example.test/level2", &nav(&["/level3"]))
            .page("https://example.test/level3", "deep");

        let only_seed = crawl(
            config("https://example.test/", LinkScope::Navigation).with_max_depth(Some(1)),
            &site,
        )
        .await;
        let two_levels = crawl(
            config("https://example.test/", LinkScope::Navigation).with_max_depth(Some(2)),
            &site,
        )
        .await;

        assert_eq!(urls(&only_seed), vec!["https://example.test/"]);
        assert_eq!(
            urls(&two_levels),
            vec!["https://example.test/", "https://example.test/level2"]
        );
    }

    #[tokio::test]
    async fn test_host_spelling_must_match_exactly() {
        let site = MockSite::default()
            .page(
                "https://Conf.test/",
                &nav(&[
                    "/a",
                    "https://Conf.test/b",
                    "https://conf.test/c",
                    "https://Conf.test:443/d",
                ]),
            )
            .page("https://Conf.test/a", "a")
            .page("https://Conf.test/b", "b");

        let report = crawl(config("https://Conf.test/", LinkScope::Navigation), &site).await;

        assert_eq!(
            urls(&report),
            vec!["https://Conf.test/", "https://Conf.test/a", "https://Conf.test/b"]
        );
        assert_eq!(site.requested().len(), 3);
        assert_eq!(report.stats.links_off_domain, 2);
    }

    #[tokio::test]
    async fn test_crawl_over_http() {
        use httpmock::{Method::GET, MockServer};

        let server = MockServer::start_async().await;
        let home = server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200)
                    .body(r#"<div id="navigationbar"><a href="/about?x=1">About</a><a href="/gone">Gone</a></div>"#);
            })
            .await;
        let about = server
            .mock_async(|when, then| {
                when.method(GET).path("/about");
                then.status(200)
                    .body(r#"<div id="navigationbar"><a href="/">Home</a></div>"#);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let config = config(&server.url("/"), LinkScope::Navigation);
        let fetcher = HttpFetcher::new(config.timeout).unwrap();
        let report = Crawler::new(config, fetcher).run().await;

        assert_eq!(urls(&report), vec![server.url("/"), server.url("/about")]);
        home.assert_async().await;
        about.assert_async().await;
    }
}
