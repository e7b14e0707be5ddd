// src/checker/normalize.rs
// =============================================================================
// URL normalization: turns a URL string into the identity we use as a key in
// the visited set and the outcome map.
//
// Rules:
// 1. The fragment (#...) is dropped
// 2. A trailing slash is dropped, except for the bare root path "/"
// 3. A directory-like path ("/dir", no extension) becomes "/dir/index.html"
//    when that spelling has already been visited
//
// Strings that don't parse as URLs are passed through untouched; whatever
// consumes them will fail to classify them later.
// =============================================================================

use std::collections::BTreeSet;
use url::Url;

use super::paths;

const INDEX_PAGE: &str = "index.html";

/// Strips the fragment and the trailing slash. Needs no crawl state.
pub fn canonicalize(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => canonical_url(parsed).to_string(),
        Err(_) => url.to_string(),
    }
}

/// Full normalization, including the directory/index lookup against `visited`.
pub fn normalize(url: &str, visited: &BTreeSet<String>) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => canonical_url(parsed),
        Err(_) => return url.to_string(),
    };

    if let Some(index) = index_form(&parsed) {
        if visited.contains(&index) {
            return index;
        }
    }

    parsed.to_string()
}

/// Every spelling of `url` that should count as visited once `url` is checked.
///
/// "/dir" and "/dir/index.html" are the same page; so are "/" and "/index.html".
/// The given URL is always the first element.
pub fn equivalent_forms(url: &str) -> Vec<String> {
    let mut forms = vec![url.to_string()];

    let parsed = match Url::parse(url) {
        Ok(parsed) => canonical_url(parsed),
        Err(_) => return forms,
    };

    let alternate = if let Some(index) = index_form(&parsed) {
        Some(index)
    } else if parsed.path() == "/" {
        let mut index = parsed.clone();
        index.set_path(&format!("/{}", INDEX_PAGE));
        Some(index.to_string())
    } else {
        directory_form(&parsed)
    };

    if let Some(alternate) = alternate {
        if alternate != forms[0] {
            forms.push(alternate);
        }
    }

    forms
}

/// True for a path with no extension and no trailing slash that isn't the root.
pub fn is_directory_like(url: &Url) -> bool {
    let path = url.path();
    path != "/" && !path.is_empty() && !path.ends_with('/') && paths::extension(path).is_none()
}

fn canonical_url(mut url: Url) -> Url {
    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    url
}

// "/dir" -> "/dir/index.html"
fn index_form(url: &Url) -> Option<String> {
    if !is_directory_like(url) {
        return None;
    }
    let mut index = url.clone();
    index.set_path(&format!("{}/{}", url.path(), INDEX_PAGE));
    Some(index.to_string())
}

// "/dir/index.html" -> "/dir", "/index.html" -> "/"
fn directory_form(url: &Url) -> Option<String> {
    let parent = url.path().strip_suffix(INDEX_PAGE)?.strip_suffix('/')?;
    let mut directory = url.clone();
    directory.set_path(if parent.is_empty() { "/" } else { parent });
    Some(directory.to_string())
}
