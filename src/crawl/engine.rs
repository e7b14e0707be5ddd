// src/crawl/engine.rs
// =============================================================================
// The traversal engine: a breadth-first crawl over the site's pages.
//
// How it works:
// 1. Seed the frontier with the normalized root URL
// 2. Pop the next page, skip it if some spelling of it was already visited,
//    otherwise mark it visited and fetch it
// 3. Record the outcome (status code, or unreachable)
// 4. If the page came back as HTML, extract its links and assets:
//    - internal links inside the hierarchy are queued for crawling
//    - internal links outside the hierarchy, under an ignored internal path,
//      or past the depth limit are checked once but never crawled
//    - external links are checked once (unless ignored) and never crawled
//    - internal assets go into the catalog of the page that referenced them
// 5. When the frontier is empty, check every catalogued asset once
//
// One request is in flight at a time, with a politeness delay in between.
// Each URL gets exactly one attempt; a failure is final for the run.
//
// Rust concepts:
// - Generics: Crawler<F: Fetcher> works with the real client or a test fake
// - Trait objects: Box<dyn CrawlObserver> for pluggable progress reporting
// - let-else: bail out early when a fetch is skipped
// =============================================================================

use std::time::Duration;
use url::Url;

use super::observer::{CrawlObserver, Limit, NoopObserver};
use super::queue::{CrawlItem, Frontier};
use super::state::{CheckedUrl, CrawlState, LinkScope, ResourceKind};
use crate::checker::{
    canonicalize, equivalent_forms, extract_references, normalize, FetchResult, Fetcher,
    HierarchyGuard, IgnorePolicy,
};
use crate::config::CheckerConfig;

pub struct Crawler<F: Fetcher> {
    fetcher: F,
    observer: Box<dyn CrawlObserver>,
    root: String,
    root_host: Option<String>,
    guard: HierarchyGuard,
    policy: IgnorePolicy,
    request_delay: Duration,
    max_requests: Option<usize>,
    max_depth: Option<usize>,
    frontier: Frontier,
    state: CrawlState,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(config: &CheckerConfig, fetcher: F) -> Self {
        Self {
            fetcher,
            observer: Box::new(NoopObserver),
            root: canonicalize(config.root_url.as_str()),
            root_host: config.root_url.host_str().map(str::to_string),
            guard: HierarchyGuard::new(&config.root_url),
            policy: config.ignore_policy(),
            request_delay: config.request_delay,
            max_requests: config.max_requests,
            max_depth: config.max_depth,
            frontier: Frontier::new(),
            state: CrawlState::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Runs the crawl to completion (or until the request cap) and returns
    /// everything it found.
    pub async fn run(mut self) -> CrawlState {
        let root = self.root.clone();
        self.frontier.push(root, 0);

        self.crawl_pages().await;
        if !self.state.truncated {
            self.check_assets().await;
        }

        self.state
    }

    async fn crawl_pages(&mut self) {
        while let Some(CrawlItem { url, depth }) = self.frontier.pop() {
            let url = normalize(&url, self.state.visited());
            if self.state.is_visited(&url) {
                continue;
            }

            if self.budget_exhausted() {
                self.halt(self.frontier.len() + 1);
                return;
            }

            let Some(result) = self.fetch_once(&url, true).await else {
                continue;
            };

            let outcome = result.outcome();
            self.state.record_outcome(
                &url,
                CheckedUrl {
                    outcome,
                    scope: LinkScope::Internal,
                    kind: ResourceKind::Page,
                    crawled: result.body().is_some(),
                },
            );
            self.observer.page_fetched(&url, depth, &outcome);

            if let FetchResult::Response {
                body: Some(html),
                final_url,
                ..
            } = &result
            {
                self.process_page(&url, final_url, html, depth).await;
            }

            if self.state.truncated {
                return;
            }
        }
    }

    // Extracts one page's references and decides what happens to each
    //
    // Parameters:
    //   page: the page's normalized URL (used as the referrer)
    //   final_url: where redirects ended up; relative links resolve against it
    //   depth: link hops from the root to this page
    async fn process_page(&mut self, page: &str, final_url: &Url, html: &str, depth: usize) {
        let extraction = extract_references(html, final_url, &self.policy);
        self.state.counters.ignored_assets += extraction.ignored_assets;

        for link in extraction.links {
            if self.state.truncated {
                return;
            }
            let link = normalize(&link, self.state.visited());
            self.state.add_referrer(&link, page);
            self.observer.link_found(page, &link);

            if !self.is_internal(&link) {
                self.check_external(&link, ResourceKind::Page).await;
                continue;
            }

            if !self.guard.within_hierarchy(&link) {
                if self
                    .check_only(&link, LinkScope::Internal, ResourceKind::Page, "outside the crawl hierarchy")
                    .await
                {
                    self.state.counters.outside_hierarchy += 1;
                }
                continue;
            }

            if self.policy.should_not_crawl(&link) {
                if self
                    .check_only(&link, LinkScope::Internal, ResourceKind::Page, "ignored internal path")
                    .await
                {
                    self.state.counters.non_crawled += 1;
                }
                continue;
            }

            // Already waiting in the frontier at a depth within the limit; it
            // will be crawled when popped
            if self.is_queued(&link) {
                continue;
            }

            let next_depth = depth + 1;
            if let Some(max) = self.max_depth.filter(|max| next_depth > *max) {
                if !self.state.is_visited(&link) {
                    self.observer.limit_reached(Limit::MaxDepth { max, url: &link });
                }
                self.check_only(&link, LinkScope::Internal, ResourceKind::Page, "beyond the depth limit")
                    .await;
                continue;
            }

            if !self.state.is_visited(&link) {
                self.frontier.push(link, next_depth);
            }
        }

        for (asset, kind) in extraction.assets {
            self.state.add_referrer(&asset, page);

            if self.is_internal(&asset) {
                self.observer.asset_found(page, &asset, &kind);
                self.state.add_asset(page, &asset, kind);
            } else {
                self.check_external(&asset, ResourceKind::Asset).await;
            }
        }
    }

    // Every internal asset in the catalog gets one existence check
    async fn check_assets(&mut self) {
        let assets: Vec<String> = self
            .state
            .unique_assets()
            .keys()
            .map(|url| url.to_string())
            .collect();

        for asset in assets {
            if self.state.truncated {
                return;
            }
            self.check_only(&asset, LinkScope::Internal, ResourceKind::Asset, "asset")
                .await;
        }
    }

    async fn check_external(&mut self, url: &str, kind: ResourceKind) {
        if self.policy.should_ignore_external(url) {
            self.state.note_ignored_external(url);
            self.observer.link_skipped(url, "ignored external link");
            return;
        }
        self.check_only(url, LinkScope::External, kind, "external").await;
    }

    // Checks a URL without extracting anything from it
    //
    // Parameters:
    //   url: normalized URL to check
    //   scope/kind: how the result is filed in CrawlState
    //   reason: why it isn't crawled, for the observer
    //
    // Returns: true if a request was actually made (false if it was already
    // visited or the request cap was hit)
    async fn check_only(
        &mut self,
        url: &str,
        scope: LinkScope,
        kind: ResourceKind,
        reason: &str,
    ) -> bool {
        if self.state.is_visited(url) {
            return false;
        }
        if self.budget_exhausted() {
            self.halt(self.frontier.len());
            return false;
        }

        if scope == LinkScope::Internal && kind == ResourceKind::Page {
            self.observer.link_skipped(url, reason);
        }

        let Some(result) = self.fetch_once(url, false).await else {
            return false;
        };

        let outcome = result.outcome();
        self.state.record_outcome(
            url,
            CheckedUrl {
                outcome,
                scope,
                kind,
                crawled: false,
            },
        );
        self.observer.url_checked(url, scope, &outcome);
        true
    }

    // The only place a request is sent. Marking visited and fetching happen
    // together, so a URL (in any of its spellings) is fetched at most once.
    async fn fetch_once(&mut self, url: &str, want_body: bool) -> Option<FetchResult> {
        let parsed = Url::parse(url).ok()?;
        if !self.state.mark_visited(url) {
            return None;
        }

        if self.state.requests > 0 && !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
        self.state.requests += 1;

        Some(self.fetcher.fetch(&parsed, want_body).await)
    }

    fn is_internal(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                parsed.host_str().is_some() && parsed.host_str() == self.root_host.as_deref()
            }
            Err(_) => false,
        }
    }

    // Queued under this or any equivalent spelling
    fn is_queued(&self, url: &str) -> bool {
        equivalent_forms(url)
            .iter()
            .any(|form| self.frontier.contains(form))
    }

    fn budget_exhausted(&self) -> bool {
        self.max_requests
            .map_or(false, |max| self.state.requests >= max)
    }

    fn halt(&mut self, abandoned: usize) {
        if self.state.truncated {
            return;
        }
        self.state.truncated = true;
        if let Some(max) = self.max_requests {
            self.observer.limit_reached(Limit::MaxRequests { max, abandoned });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{AssetKind, LinkOutcome, TransportFailure};
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    enum Canned {
        Html(u16, &'static str),
        Redirect(&'static str, &'static str),
        Plain(u16),
        Down,
    }

    // In-memory site: canned responses keyed by URL, unknown URLs are 404s
    #[derive(Default)]
    struct FakeSite {
        responses: HashMap<String, Canned>,
        requests: Arc<Mutex<Vec<(String, bool)>>>,
    }

    impl FakeSite {
        fn html(mut self, url: &str, body: &'static str) -> Self {
            self.responses.insert(url.to_string(), Canned::Html(200, body));
            self
        }

        fn status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Canned::Plain(status));
            self
        }

        fn redirect(mut self, url: &str, to: &'static str, body: &'static str) -> Self {
            self.responses.insert(url.to_string(), Canned::Redirect(to, body));
            self
        }

        fn down(mut self, url: &str) -> Self {
            self.responses.insert(url.to_string(), Canned::Down);
            self
        }

        fn request_log(&self) -> Arc<Mutex<Vec<(String, bool)>>> {
            self.requests.clone()
        }
    }

    impl Fetcher for FakeSite {
        fn fetch<'a>(&'a self, url: &'a Url, want_body: bool) -> BoxFuture<'a, FetchResult> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), want_body));

            let result = match self.responses.get(url.as_str()) {
                Some(Canned::Html(status, body)) => FetchResult::Response {
                    status: *status,
                    final_url: url.clone(),
                    body: want_body.then(|| body.to_string()),
                },
                Some(Canned::Redirect(to, body)) => FetchResult::Response {
                    status: 200,
                    final_url: Url::parse(to).unwrap(),
                    body: want_body.then(|| body.to_string()),
                },
                Some(Canned::Plain(status)) => FetchResult::Response {
                    status: *status,
                    final_url: url.clone(),
                    body: None,
                },
                Some(Canned::Down) => FetchResult::Unreachable(TransportFailure::ConnectionFailed),
                None => FetchResult::Response {
                    status: 404,
                    final_url: url.clone(),
                    body: None,
                },
            };
            Box::pin(async move { result })
        }
    }

    fn config(root: &str) -> CheckerConfig {
        CheckerConfig::new(root)
            .unwrap()
            .with_request_delay(Duration::ZERO)
    }

    fn requested(log: &Arc<Mutex<Vec<(String, bool)>>>) -> Vec<String> {
        log.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    #[tokio::test]
    async fn test_two_pages_one_broken_link_one_asset() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<link rel="stylesheet" href="/style.css">
                   <a href="/about.html">About</a>
                   <a href="/missing.html">Missing</a>"#,
            )
            .html("https://example.com/about.html", r#"<a href="/">Home</a>"#)
            .status("https://example.com/style.css", 200);

        let state = Crawler::new(&config("https://example.com"), site).run().await;

        assert_eq!(state.pages_crawled(), 2);

        let broken: Vec<_> = state.broken().collect();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].0, "https://example.com/missing.html");
        assert_eq!(broken[0].1.outcome, LinkOutcome::Status(404));

        assert_eq!(state.assets().len(), 1);
        assert_eq!(
            state.assets()["https://example.com/"]["https://example.com/style.css"],
            AssetKind::WebAsset
        );
        assert_eq!(
            state.outcome("https://example.com/style.css").map(|c| c.outcome),
            Some(LinkOutcome::Status(200))
        );
    }

    #[tokio::test]
    async fn test_external_links_are_checked_not_crawled() {
        let site = FakeSite::default()
            .html("https://example.com/", r#"<a href="https://other.org/">Other</a>"#)
            .html("https://other.org/", r#"<a href="https://other.org/deeper">Deeper</a>"#);
        let log = site.request_log();

        let state = Crawler::new(&config("https://example.com/"), site).run().await;

        let checked = state.outcome("https://other.org/").unwrap();
        assert_eq!(checked.scope, LinkScope::External);
        assert!(!checked.crawled);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("https://example.com/".to_string(), true),
                ("https://other.org/".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_ignored_internal_path_checked_but_not_crawled() {
        let site = FakeSite::default()
            .html("https://example.com/", r#"<a href="/docs/guide.html">Guide</a>"#)
            .html("https://example.com/docs/guide.html", r#"<a href="/docs/more.html">More</a>"#);
        let log = site.request_log();

        let config = config("https://example.com").with_ignored_internal_paths(vec!["docs".to_string()]);
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(state.counters.non_crawled, 1);
        assert_eq!(
            state.outcome("https://example.com/docs/guide.html").map(|c| c.outcome),
            Some(LinkOutcome::Status(200))
        );
        assert!(!requested(&log).contains(&"https://example.com/docs/more.html".to_string()));
    }

    #[tokio::test]
    async fn test_respects_hierarchy() {
        let site = FakeSite::default().html(
            "https://example.com/subdir",
            r#"<a href="https://example.com/subdir/page1.html">In 1</a>
               <a href="/subdir/page2.html">In 2</a>
               <a href="https://example.com">Out 1</a>
               <a href="/other">Out 2</a>"#,
        );
        let log = site.request_log();

        let state = Crawler::new(&config("https://example.com/subdir"), site).run().await;

        for url in [
            "https://example.com/subdir/page1.html",
            "https://example.com/subdir/page2.html",
            "https://example.com/",
            "https://example.com/other",
        ] {
            assert!(state.is_visited(url), "{} should be visited", url);
        }
        assert_eq!(state.counters.outside_hierarchy, 2);
        assert_eq!(requested(&log).len(), 5);

        // Out-of-hierarchy pages are checked without asking for a body
        let log = log.lock().unwrap();
        assert!(log.contains(&("https://example.com/other".to_string(), false)));
        assert!(log.contains(&("https://example.com/subdir/page1.html".to_string(), true)));
    }

    #[tokio::test]
    async fn test_each_url_fetched_at_most_once() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/a.html">A</a><a href="/b.html">B</a><a href="https://ext.org/x">X</a>"#,
            )
            .html(
                "https://example.com/a.html",
                r#"<a href="/b.html">B</a><a href="/">Home</a><a href="https://ext.org/x#frag">X</a>"#,
            )
            .html(
                "https://example.com/b.html",
                r#"<a href="/a.html">A</a><a href="/index.html">Home</a>"#,
            );
        let log = site.request_log();

        let state = Crawler::new(&config("https://example.com"), site).run().await;

        let mut urls = requested(&log);
        let total = urls.len();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), total, "some URL was fetched twice: {:?}", urls);
        assert_eq!(state.requests, total);
        assert_eq!(state.outcomes().len(), total);
        assert!(!urls.contains(&"https://example.com/index.html".to_string()));
    }

    #[tokio::test]
    async fn test_directory_and_index_fetched_once() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/dir">Dir</a><a href="/dir/index.html">Dir index</a><a href="/dir/">Dir slash</a>"#,
            )
            .html("https://example.com/dir", "<p>dir</p>");
        let log = site.request_log();

        let state = Crawler::new(&config("https://example.com"), site).run().await;

        assert!(state.is_visited("https://example.com/dir"));
        assert!(state.is_visited("https://example.com/dir/index.html"));
        assert_eq!(
            requested(&log),
            vec!["https://example.com/", "https://example.com/dir"]
        );
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_redirect_target() {
        let site = FakeSite::default()
            .redirect(
                "https://example.com/voyager",
                "https://example.com/voyager/",
                r#"<a href="data.html">Data</a>"#,
            )
            .html("https://example.com/voyager/data.html", "<p>data</p>");

        let state = Crawler::new(&config("https://example.com/voyager"), site).run().await;

        assert_eq!(
            state.outcome("https://example.com/voyager/data.html").map(|c| c.outcome),
            Some(LinkOutcome::Status(200))
        );
        assert_eq!(state.total_broken(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_is_recorded_and_run_continues() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="https://down.example/">Down</a><a href="/next.html">Next</a>"#,
            )
            .html("https://example.com/next.html", "<p>next</p>")
            .down("https://down.example/");

        let state = Crawler::new(&config("https://example.com"), site).run().await;

        assert_eq!(
            state.outcome("https://down.example/").map(|c| c.outcome),
            Some(LinkOutcome::Unreachable(TransportFailure::ConnectionFailed))
        );
        assert_eq!(state.pages_crawled(), 2);
    }

    #[tokio::test]
    async fn test_ignored_external_links_are_not_fetched() {
        let site = FakeSite::default().html(
            "https://example.com/",
            r#"<a href="https://example.org/x">Skip</a><a href="https://test.com/">Check</a>"#,
        );
        let log = site.request_log();

        let config = config("https://example.com")
            .with_ignored_external_links(vec!["https://example.org".to_string()]);
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(state.counters.ignored_external, 1);
        assert!(state.outcome("https://example.org/x").is_none());
        assert!(requested(&log).contains(&"https://test.com/".to_string()));
    }

    #[tokio::test]
    async fn test_ignored_assets_are_counted() {
        let site = FakeSite::default().html(
            "https://example.com/",
            r#"<img src="/images/a.png"><img src="/images/b.png"><img src="/pics/c.png">"#,
        );
        let log = site.request_log();

        let config = config("https://example.com").with_ignored_asset_paths(vec!["/images".to_string()]);
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(state.counters.ignored_assets, 2);
        assert_eq!(state.unique_assets().len(), 1);
        assert!(!requested(&log).iter().any(|u| u.contains("/images/")));
    }

    #[tokio::test]
    async fn test_max_requests_abandons_the_rest() {
        let site = FakeSite::default().html(
            "https://example.com/",
            r#"<a href="/a.html">A</a><a href="/b.html">B</a><a href="/c.html">C</a>"#,
        );

        let config = config("https://example.com").with_max_requests(Some(2));
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(state.requests, 2);
        assert!(state.truncated);
        assert!(state.is_visited("https://example.com/a.html"));
        assert!(!state.is_visited("https://example.com/b.html"));
        // Abandoned pages aren't reported as broken
        assert!(state.outcome("https://example.com/b.html").is_none());
    }

    #[tokio::test]
    async fn test_max_depth_checks_edge_links_without_crawling() {
        let site = FakeSite::default()
            .html("https://example.com/", r#"<a href="/a.html">A</a>"#)
            .html("https://example.com/a.html", r#"<a href="/b.html">B</a>"#);
        let log = site.request_log();

        let config = config("https://example.com").with_max_depth(Some(0));
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(state.pages_crawled(), 1);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("https://example.com/".to_string(), true),
                ("https://example.com/a.html".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_depth_edge_link_to_queued_page_still_crawls_it() {
        // b.html sits at the depth cap and links to x.html, which is already
        // queued at depth 1 from the root
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/b.html">B</a><a href="/x.html">X</a>"#,
            )
            .html("https://example.com/b.html", r#"<a href="/x.html">X</a>"#)
            .html("https://example.com/x.html", r#"<a href="/y.html">Y</a>"#);
        let log = site.request_log();

        let config = config("https://example.com").with_max_depth(Some(1));
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(
            state.outcome("https://example.com/x.html").map(|c| c.crawled),
            Some(true)
        );
        assert_eq!(state.pages_crawled(), 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("https://example.com/".to_string(), true),
                ("https://example.com/b.html".to_string(), true),
                ("https://example.com/x.html".to_string(), true),
                ("https://example.com/y.html".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_depth_edge_index_spelling_does_not_preempt_queued_directory() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/b.html">B</a><a href="/dir">Dir</a>"#,
            )
            .html("https://example.com/b.html", r#"<a href="/dir/index.html">Dir</a>"#)
            .html("https://example.com/dir", "<p>dir</p>");
        let log = site.request_log();

        let config = config("https://example.com").with_max_depth(Some(1));
        let state = Crawler::new(&config, site).run().await;

        assert_eq!(
            state.outcome("https://example.com/dir").map(|c| c.crawled),
            Some(true)
        );
        assert!(!requested(&log).contains(&"https://example.com/dir/index.html".to_string()));
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let site = FakeSite::default()
            .html("https://example.com/", r#"<a href="/a.html">A</a><a href="/b.html">B</a>"#)
            .html("https://example.com/a.html", r#"<a href="/a1.html">A1</a>"#)
            .html("https://example.com/b.html", r#"<a href="/b1.html">B1</a>"#)
            .html("https://example.com/a1.html", "")
            .html("https://example.com/b1.html", "");
        let log = site.request_log();

        Crawler::new(&config("https://example.com"), site).run().await;

        assert_eq!(
            requested(&log),
            vec![
                "https://example.com/",
                "https://example.com/a.html",
                "https://example.com/b.html",
                "https://example.com/a1.html",
                "https://example.com/b1.html",
            ]
        );
    }

    #[derive(Default)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl CrawlObserver for Recorder {
        fn page_fetched(&mut self, url: &str, depth: usize, _outcome: &LinkOutcome) {
            self.events.lock().unwrap().push(format!("page {} {}", depth, url));
        }

        fn link_found(&mut self, _page: &str, link: &str) {
            self.events.lock().unwrap().push(format!("link {}", link));
        }

        fn asset_found(&mut self, _page: &str, asset: &str, kind: &AssetKind) {
            self.events.lock().unwrap().push(format!("asset {} {}", kind, asset));
        }

        fn limit_reached(&mut self, limit: Limit<'_>) {
            let event = match limit {
                Limit::MaxRequests { max, abandoned } => format!("max requests {} {}", max, abandoned),
                Limit::MaxDepth { max, url } => format!("max depth {} {}", max, url),
            };
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn test_observer_receives_progress_events() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/a.html">A</a><script src="/app.js"></script>"#,
            )
            .html("https://example.com/a.html", "");

        let recorder = Recorder::default();
        let events = recorder.events.clone();
        Crawler::new(&config("https://example.com"), site)
            .with_observer(Box::new(recorder))
            .run()
            .await;

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "page 0 https://example.com/",
                "link https://example.com/a.html",
                "asset web_asset https://example.com/app.js",
                "page 1 https://example.com/a.html",
            ]
        );
    }

    #[tokio::test]
    async fn test_observer_hears_about_limits() {
        let site = FakeSite::default()
            .html(
                "https://example.com/",
                r#"<a href="/a.html">A</a><a href="/b.html">B</a>"#,
            )
            .html("https://example.com/a.html", r#"<a href="/deep.html">Deep</a><a href="/deep.html#x">Again</a>"#)
            .html("https://example.com/b.html", "");

        let recorder = Recorder::default();
        let events = recorder.events.clone();
        let config = config("https://example.com").with_max_depth(Some(1)).with_max_requests(Some(3));
        Crawler::new(&config, site)
            .with_observer(Box::new(recorder))
            .run()
            .await;

        let limits: Vec<String> = events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("max "))
            .cloned()
            .collect();
        assert_eq!(
            limits,
            vec![
                "max depth 1 https://example.com/deep.html",
                "max requests 3 1",
            ]
        );
    }
}
