// src/checker/policy.rs
// =============================================================================
// Scope rules for the crawl:
// - HierarchyGuard: is a URL inside the subtree rooted at the starting URL?
// - IgnorePolicy: which assets are dropped, which internal pages are checked
//   but never crawled, and which external links are skipped entirely
//
// Path comparisons go through checker::paths so both rules agree on what a
// "segment" is.
// =============================================================================

use url::Url;

use super::paths;

/// Decides whether a URL lies within the crawl subtree.
#[derive(Debug, Clone)]
pub struct HierarchyGuard {
    host: Option<String>,
    // None when the root is the bare domain: everything on the host is in scope
    prefix: Option<String>,
}

impl HierarchyGuard {
    pub fn new(root: &Url) -> Self {
        let mut prefix = root.path().trim_end_matches('/').to_string();

        // "/docs/index.html" as a root means the "/docs" directory
        if !root.path().ends_with('/') && paths::extension(&prefix).is_some() {
            prefix = match prefix.rsplit_once('/') {
                Some((parent, _)) => parent.to_string(),
                None => String::new(),
            };
        }

        Self {
            host: root.host_str().map(str::to_string),
            prefix: if prefix.is_empty() { None } else { Some(prefix) },
        }
    }

    /// The path every in-scope URL must begin with, or None for the whole host.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn within_hierarchy(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if parsed.host_str() != self.host.as_deref() {
            return false;
        }

        match &self.prefix {
            None => true,
            Some(prefix) => paths::starts_with_segments(parsed.path(), prefix),
        }
    }
}

/// The three ignore lists supplied by configuration.
#[derive(Debug, Clone, Default)]
pub struct IgnorePolicy {
    asset_paths: Vec<String>,
    internal_paths: Vec<String>,
    external_links: Vec<String>,
}

impl IgnorePolicy {
    pub fn new(
        asset_paths: Vec<String>,
        internal_paths: Vec<String>,
        external_links: Vec<String>,
    ) -> Self {
        Self {
            asset_paths,
            internal_paths,
            external_links,
        }
    }

    /// Assets under one of these paths are left out of the catalog.
    pub fn should_ignore_asset(&self, url: &str) -> bool {
        path_matches_any(url, &self.asset_paths)
    }

    /// Internal pages under one of these paths are checked but not crawled.
    pub fn should_not_crawl(&self, url: &str) -> bool {
        path_matches_any(url, &self.internal_paths)
    }

    /// External links containing one of these patterns are never fetched.
    pub fn should_ignore_external(&self, url: &str) -> bool {
        self.external_links
            .iter()
            .any(|pattern| !pattern.is_empty() && url.contains(pattern.as_str()))
    }
}

fn path_matches_any(url: &str, patterns: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    patterns
        .iter()
        .any(|pattern| paths::contains_segments(parsed.path(), pattern))
}
