// src/report.rs
// =============================================================================
// Turns a finished crawl into something a person (or a script) can read.
//
// Text layout:
//   === CONFIGURATION ===      what was crawled and with which ignore lists
//   === BROKEN INTERNAL LINKS ===
//   === BROKEN EXTERNAL LINKS ===
//   === BROKEN ASSETS ===
//   === INTERNAL ASSETS ===    inventory grouped by asset type
//   === SUMMARY ===            counters
//
// The JSON form carries the same data, serialized with serde_json.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::checker::HierarchyGuard;
use crate::config::CheckerConfig;
use crate::crawl::{CheckedUrl, Counters, CrawlState, LinkScope, ResourceKind};

/// Counters plus the derived totals
#[derive(Debug, Serialize)]
pub struct Summary {
    pub pages_crawled: usize,
    pub urls_checked: usize,
    pub requests: usize,
    pub total_broken: usize,
    #[serde(flatten)]
    pub counters: Counters,
    pub truncated: bool,
}

impl Summary {
    pub fn new(state: &CrawlState) -> Self {
        Self {
            pages_crawled: state.pages_crawled(),
            urls_checked: state.outcomes().len(),
            requests: state.requests,
            total_broken: state.total_broken(),
            counters: state.counters.clone(),
            truncated: state.truncated,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a CheckerConfig,
    summary: Summary,
    results: &'a CrawlState,
}

pub fn write_json(out: &mut impl Write, config: &CheckerConfig, state: &CrawlState) -> io::Result<()> {
    let report = JsonReport {
        config,
        summary: Summary::new(state),
        results: state,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

pub fn write_text(out: &mut impl Write, config: &CheckerConfig, state: &CrawlState) -> io::Result<()> {
    write_configuration(out, config)?;

    write_broken_section(out, "BROKEN INTERNAL LINKS", state, |c| {
        c.scope == LinkScope::Internal && c.kind == ResourceKind::Page
    })?;
    write_broken_section(out, "BROKEN EXTERNAL LINKS", state, |c| {
        c.scope == LinkScope::External
    })?;
    write_broken_section(out, "BROKEN ASSETS", state, |c| {
        c.scope == LinkScope::Internal && c.kind == ResourceKind::Asset
    })?;

    write_asset_inventory(out, state)?;
    write_summary(out, config, state)
}

fn write_configuration(out: &mut impl Write, config: &CheckerConfig) -> io::Result<()> {
    writeln!(out, "=== CONFIGURATION ===")?;
    writeln!(out, "Root URL: {}", config.root_url)?;

    let guard = HierarchyGuard::new(&config.root_url);
    match guard.prefix() {
        Some(prefix) => writeln!(out, "Crawl restricted to: {}", prefix)?,
        None => writeln!(out, "Crawl restricted to: entire host")?,
    }

    write_pattern_list(out, "Ignored asset paths:", &config.ignored_asset_paths)?;
    write_pattern_list(
        out,
        "Ignored internal paths (checked but not crawled):",
        &config.ignored_internal_paths,
    )?;
    write_pattern_list(out, "Ignored external links:", &config.ignored_external_links)?;

    writeln!(out, "Timeout: {}s", config.timeout.as_secs_f64())?;
    writeln!(out, "Max requests: {}", limit_text(config.max_requests))?;
    writeln!(out, "Max depth: {}", limit_text(config.max_depth))?;
    writeln!(out)
}

fn write_pattern_list(out: &mut impl Write, title: &str, patterns: &[String]) -> io::Result<()> {
    if patterns.is_empty() {
        return writeln!(out, "{} none", title);
    }
    writeln!(out, "{}", title)?;
    let mut sorted: Vec<&String> = patterns.iter().collect();
    sorted.sort();
    for pattern in sorted {
        writeln!(out, "  - {}", pattern)?;
    }
    Ok(())
}

fn limit_text(limit: Option<usize>) -> String {
    limit.map_or_else(|| "unlimited".to_string(), |n| n.to_string())
}

fn write_broken_section(
    out: &mut impl Write,
    title: &str,
    state: &CrawlState,
    include: impl Fn(&CheckedUrl) -> bool,
) -> io::Result<()> {
    writeln!(out, "=== {} ===", title)?;

    let mut any = false;
    for (url, checked) in state.broken().filter(|(_, checked)| include(checked)) {
        any = true;
        writeln!(out, "{} ({})", url, checked.outcome)?;
        for page in state.referrers(url) {
            writeln!(out, "    found on: {}", page)?;
        }
    }

    if !any {
        writeln!(out, "None")?;
    }
    writeln!(out)
}

fn write_asset_inventory(out: &mut impl Write, state: &CrawlState) -> io::Result<()> {
    writeln!(out, "=== INTERNAL ASSETS ===")?;

    let mut by_kind: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (url, kind) in state.unique_assets() {
        by_kind.entry(kind.as_str()).or_default().push(url);
    }

    if by_kind.is_empty() {
        writeln!(out, "None")?;
    }
    for (kind, urls) in by_kind {
        writeln!(out, "{} ({}):", kind, urls.len())?;
        for url in urls {
            writeln!(out, "  - {}", url)?;
        }
    }
    writeln!(out)
}

fn write_summary(out: &mut impl Write, config: &CheckerConfig, state: &CrawlState) -> io::Result<()> {
    let summary = Summary::new(state);
    let counters = &summary.counters;

    writeln!(out, "=== SUMMARY ===")?;
    writeln!(out, "Pages crawled: {}", summary.pages_crawled)?;
    writeln!(out, "URLs checked: {}", summary.urls_checked)?;
    writeln!(out, "Total broken links: {}", summary.total_broken)?;
    writeln!(out, "Assets ignored due to path patterns: {}", counters.ignored_assets)?;
    writeln!(out, "URLs checked but not crawled: {}", counters.non_crawled)?;
    writeln!(out, "URLs outside allowed hierarchy: {}", counters.outside_hierarchy)?;
    writeln!(out, "External links ignored: {}", counters.ignored_external)?;
    if summary.truncated {
        if let Some(max) = config.max_requests {
            writeln!(out, "Stopped early: reached the limit of {} requests", max)?;
        }
    }
    Ok(())
}
