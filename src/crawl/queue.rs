// src/crawl/queue.rs
// =============================================================================
// The frontier: internal pages waiting to be fetched, in discovery order.
//
// A URL is queued at most once per run. Whether it has already been fetched
// is the visited set's business (see state.rs); the engine checks that when
// it pops an item.
//
// Rust concepts:
// - VecDeque: push_back/pop_front gives breadth-first order
// - HashSet: remembers every URL ever queued
// =============================================================================

use std::collections::{HashSet, VecDeque};

/// A page in the crawl queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlItem {
    pub url: String,
    /// Link hops from the root page (the root is depth 0)
    pub depth: usize,
}

/// FIFO queue of pages to crawl
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<CrawlItem>,
    queued: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL to the back of the queue. Returns false if it was queued before.
    pub fn push(&mut self, url: String, depth: usize) -> bool {
        if !self.queued.insert(url.clone()) {
            return false;
        }
        self.queue.push_back(CrawlItem { url, depth });
        true
    }

    /// True if `url` was ever queued, including items popped since
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    pub fn pop(&mut self) -> Option<CrawlItem> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
