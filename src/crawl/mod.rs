// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a website and checking what it links to.
//
// Features:
// - Breadth-first crawling starting from the root URL
// - Crawling restricted to the root URL's host and path subtree
// - Links outside that scope are still checked, once, without being crawled
// - Optional request and depth caps
// - Polite crawling with a delay between requests
//
// Submodules:
// - queue:    the frontier (FIFO of pages to fetch)
// - state:    visited set, outcomes, asset catalog, counters
// - observer: progress events, with a tracing-backed implementation
// - engine:   the crawl loop itself
// =============================================================================

mod engine;
mod observer;
mod queue;
mod state;

pub use engine::Crawler;
pub use observer::TracingObserver;
pub use state::{CheckedUrl, Counters, CrawlState, LinkScope, ResourceKind};
