// src/crawl/observer.rs
// =============================================================================
// Progress events emitted by the crawl engine.
//
// The engine never logs on its own; it tells a CrawlObserver what happened.
// The binary plugs in TracingObserver, tests plug in recorders or nothing.
// =============================================================================

use tracing::{debug, info, warn};

use super::state::LinkScope;
use crate::checker::{AssetKind, LinkOutcome};

/// A configured cap that changed what the engine did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit<'a> {
    /// The request cap was hit; `abandoned` queued pages are left unvisited
    MaxRequests { max: usize, abandoned: usize },
    /// `url` sits one hop past the depth cap, so it is checked but not crawled
    MaxDepth { max: usize, url: &'a str },
}

/// Receives crawl progress events. Every method has an empty default.
pub trait CrawlObserver {
    /// A page was fetched for link extraction
    fn page_fetched(&mut self, _url: &str, _depth: usize, _outcome: &LinkOutcome) {}

    /// A link or asset was checked for existence only
    fn url_checked(&mut self, _url: &str, _scope: LinkScope, _outcome: &LinkOutcome) {}

    /// A page links to another page
    fn link_found(&mut self, _page: &str, _link: &str) {}

    /// A page references an internal asset
    fn asset_found(&mut self, _page: &str, _asset: &str, _kind: &AssetKind) {}

    /// A link was left out of the crawl (ignored pattern, outside hierarchy, ...)
    fn link_skipped(&mut self, _url: &str, _reason: &str) {}

    /// A request or depth cap kicked in
    fn limit_reached(&mut self, _limit: Limit<'_>) {}
}

/// Observer that drops every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}

/// Observer that turns events into `tracing` records
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn page_fetched(&mut self, url: &str, depth: usize, outcome: &LinkOutcome) {
        if outcome.is_broken() {
            warn!(depth, "Broken page {}: {}", url, outcome);
        } else {
            info!(depth, "Crawled {} ({})", url, outcome);
        }
    }

    fn url_checked(&mut self, url: &str, scope: LinkScope, outcome: &LinkOutcome) {
        if outcome.is_broken() {
            warn!(?scope, "Broken link {}: {}", url, outcome);
        } else {
            debug!(?scope, "Checked {} ({})", url, outcome);
        }
    }

    fn link_found(&mut self, page: &str, link: &str) {
        debug!("Found link {} on {}", link, page);
    }

    fn asset_found(&mut self, page: &str, asset: &str, kind: &AssetKind) {
        debug!(%kind, "Found asset {} on {}", asset, page);
    }

    fn link_skipped(&mut self, url: &str, reason: &str) {
        debug!("Skipping {}: {}", url, reason);
    }

    fn limit_reached(&mut self, limit: Limit<'_>) {
        match limit {
            Limit::MaxRequests { max, abandoned } => warn!(
                "Reached the limit of {} requests; {} queued page(s) left unvisited",
                max, abandoned
            ),
            Limit::MaxDepth { max, url } => {
                debug!("Not crawling {}: deeper than max depth {}", url, max)
            }
        }
    }
}
