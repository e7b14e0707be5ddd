// src/checker/html.rs
// =============================================================================
// This module extracts links and assets from one fetched HTML page.
//
// We use the `scraper` crate to find every reference in the page:
// - <a href>            anchors
// - <img src>           images
// - <link href>         stylesheets and icons
// - <script src>        scripts
//
// Every reference is resolved against the page URL with the `url` crate and
// then sorted into one of two buckets:
// - links:  pages we may crawl (HTML-like extension or no extension)
// - assets: everything else, tagged with an AssetKind
//
// html5ever never rejects a document; broken markup just yields fewer
// elements, so extraction is always best-effort and never fails.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::assets::{classify_path, AssetKind};
use super::normalize::canonicalize;
use super::policy::IgnorePolicy;

const REFERENCE_SELECTOR: &str = "a[href], img[src], script[src], \
     link[rel~=\"stylesheet\"][href], link[rel~=\"icon\"][href]";

/// Everything one page points at, in document order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extraction {
    /// Crawlable page URLs
    pub links: Vec<String>,
    /// Asset URLs with their category, already filtered by the ignore policy
    pub assets: Vec<(String, AssetKind)>,
    /// How many distinct assets the ignore policy dropped from this page
    pub ignored_assets: usize,
}

/// Extracts all links and assets from `html`, resolving against `page_url`.
///
/// Example:
///   html     = "<a href='/docs'>Docs</a><img src='logo.png'>"
///   page_url = "https://example.com/about/team.html"
///   links    = ["https://example.com/docs"]
///   assets   = [("https://example.com/about/logo.png", Image)]
pub fn extract_references(html: &str, page_url: &Url, policy: &IgnorePolicy) -> Extraction {
    let mut extraction = Extraction::default();

    let Ok(selector) = Selector::parse(REFERENCE_SELECTOR) else {
        return extraction;
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    for element in document.select(&selector) {
        let attribute = match element.value().name() {
            "img" | "script" => "src",
            _ => "href",
        };

        let Some(raw) = element.value().attr(attribute) else {
            continue;
        };
        let Some(resolved) = resolve_reference(page_url, raw) else {
            continue;
        };

        let url = canonicalize(resolved.as_str());
        if !seen.insert(url.clone()) {
            continue;
        }

        match classify_path(resolved.path()) {
            None => extraction.links.push(url),
            Some(_) if policy.should_ignore_asset(&url) => extraction.ignored_assets += 1,
            Some(kind) => extraction.assets.push((url, kind)),
        }
    }

    extraction
}

// Resolves a possibly-relative reference to an absolute http(s) URL
//
// Examples, with base = "https://example.com/dir/page.html":
//   "/docs"              -> https://example.com/docs
//   "other.html"         -> https://example.com/dir/other.html
//   "../other.html"      -> https://example.com/other.html
//   "https://other.com"  -> https://other.com/
//   "#section", "mailto:a@b", "javascript:void(0)" -> None
fn resolve_reference(base: &Url, raw: &str) -> Option<Url> {
    let href = raw.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["mailto:", "javascript:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    // join() leaves absolute URLs alone and resolves relative ones
    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}
