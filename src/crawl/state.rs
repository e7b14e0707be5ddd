// src/crawl/state.rs
// =============================================================================
// Everything a crawl accumulates: the visited set, one outcome per checked
// URL, the asset catalog and the counters.
//
// One CrawlState belongs to one engine for one run. When the run ends the
// engine hands it over and the reporter only reads it.
// =============================================================================

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::checker::{equivalent_forms, AssetKind, LinkOutcome};

/// Whether a URL shares the root URL's host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScope {
    Internal,
    External,
}

/// What a checked URL was referenced as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Page,
    Asset,
}

/// The terminal record for one checked URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckedUrl {
    #[serde(flatten)]
    pub outcome: LinkOutcome,
    pub scope: LinkScope,
    pub kind: ResourceKind,
    /// True if the page body was requested for link extraction
    pub crawled: bool,
}

impl CheckedUrl {
    pub fn is_broken(&self) -> bool {
        self.outcome.is_broken()
    }
}

/// Monotonic counters; nothing ever decrements them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Assets dropped because their path matched an ignored asset pattern
    pub ignored_assets: usize,
    /// Internal pages checked but not crawled because of an ignored internal pattern
    pub non_crawled: usize,
    /// Internal URLs checked but not crawled because they're outside the hierarchy
    pub outside_hierarchy: usize,
    /// External links skipped because they matched an ignored external pattern
    pub ignored_external: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct CrawlState {
    visited: BTreeSet<String>,
    outcomes: BTreeMap<String, CheckedUrl>,
    referrers: BTreeMap<String, Vec<String>>,
    assets: BTreeMap<String, BTreeMap<String, AssetKind>>,
    #[serde(skip)]
    ignored_external_seen: BTreeSet<String>,
    pub counters: Counters,
    /// Number of requests actually sent
    pub requests: usize,
    /// Set when the request cap cut the crawl short
    pub truncated: bool,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks `url` and all its equivalent spellings as visited.
    ///
    /// Returns false, and changes nothing, if any spelling was visited already.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        let forms = equivalent_forms(url);
        if forms.iter().any(|form| self.visited.contains(form)) {
            return false;
        }
        self.visited.extend(forms);
        true
    }

    pub fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    pub fn record_outcome(&mut self, url: &str, checked: CheckedUrl) {
        self.outcomes.insert(url.to_string(), checked);
    }

    pub fn outcome(&self, url: &str) -> Option<&CheckedUrl> {
        self.outcomes.get(url)
    }

    pub fn outcomes(&self) -> &BTreeMap<String, CheckedUrl> {
        &self.outcomes
    }

    /// Remembers that `page` references `url`. Each page is listed once.
    pub fn add_referrer(&mut self, url: &str, page: &str) {
        let pages = self.referrers.entry(url.to_string()).or_default();
        if !pages.iter().any(|p| p == page) {
            pages.push(page.to_string());
        }
    }

    pub fn referrers(&self, url: &str) -> &[String] {
        self.referrers.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_asset(&mut self, page: &str, asset: &str, kind: AssetKind) {
        self.assets
            .entry(page.to_string())
            .or_default()
            .insert(asset.to_string(), kind);
    }

    /// page URL -> (asset URL -> kind)
    pub fn assets(&self) -> &BTreeMap<String, BTreeMap<String, AssetKind>> {
        &self.assets
    }

    /// Every distinct asset URL in the catalog, with its kind
    pub fn unique_assets(&self) -> BTreeMap<&str, &AssetKind> {
        self.assets
            .values()
            .flat_map(|assets| assets.iter())
            .map(|(url, kind)| (url.as_str(), kind))
            .collect()
    }

    /// Counts an ignored external link, once per URL
    pub fn note_ignored_external(&mut self, url: &str) {
        if self.ignored_external_seen.insert(url.to_string()) {
            self.counters.ignored_external += 1;
        }
    }

    pub fn pages_crawled(&self) -> usize {
        self.outcomes.values().filter(|c| c.crawled).count()
    }

    pub fn broken(&self) -> impl Iterator<Item = (&String, &CheckedUrl)> {
        self.outcomes.iter().filter(|(_, checked)| checked.is_broken())
    }

    pub fn total_broken(&self) -> usize {
        self.broken().count()
    }
}
