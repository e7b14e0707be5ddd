// src/config.rs
// =============================================================================
// Validated input for one crawl.
//
// The CLI layer builds a CheckerConfig, reading ignore patterns from files
// with read_patterns_file(). Everything here fails fast: a bad root URL or an
// unreadable pattern file stops the run before any request is made.
// =============================================================================

use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::checker::IgnorePolicy;
use crate::error::CheckerError;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Default pause between two requests, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Configuration for one run of the checker
#[derive(Debug, Clone, Serialize)]
pub struct CheckerConfig {
    pub root_url: Url,
    pub ignored_asset_paths: Vec<String>,
    pub ignored_internal_paths: Vec<String>,
    pub ignored_external_links: Vec<String>,
    #[serde(serialize_with = "serialize_secs")]
    pub timeout: Duration,
    #[serde(serialize_with = "serialize_secs")]
    pub request_delay: Duration,
    pub max_requests: Option<usize>,
    pub max_depth: Option<usize>,
}

impl CheckerConfig {
    /// Validates `root_url`: it must be an absolute http(s) URL with a host.
    pub fn new(root_url: &str) -> Result<Self, CheckerError> {
        let invalid = |reason: String| CheckerError::InvalidRootUrl {
            url: root_url.to_string(),
            reason,
        };

        let parsed = Url::parse(root_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }

        Ok(Self {
            root_url: parsed,
            ignored_asset_paths: Vec::new(),
            ignored_internal_paths: Vec::new(),
            ignored_external_links: Vec::new(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            max_requests: None,
            max_depth: None,
        })
    }

    pub fn with_ignored_asset_paths(mut self, patterns: Vec<String>) -> Self {
        self.ignored_asset_paths = patterns;
        self
    }

    pub fn with_ignored_internal_paths(mut self, patterns: Vec<String>) -> Self {
        self.ignored_internal_paths = patterns;
        self
    }

    pub fn with_ignored_external_links(mut self, patterns: Vec<String>) -> Self {
        self.ignored_external_links = patterns;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn with_max_requests(mut self, max_requests: Option<usize>) -> Self {
        self.max_requests = max_requests;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn ignore_policy(&self) -> IgnorePolicy {
        IgnorePolicy::new(
            self.ignored_asset_paths.clone(),
            self.ignored_internal_paths.clone(),
            self.ignored_external_links.clone(),
        )
    }
}

/// Converts a `--timeout` value; zero, negative and non-finite values are rejected.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, CheckerError> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(CheckerError::InvalidTimeout(secs)),
    }
}

/// Reads one pattern per line. Blank lines and `#` comments are skipped.
pub fn read_patterns_file(path: &Path) -> Result<Vec<String>, CheckerError> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckerError::PatternFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_patterns(&content))
}

fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}
