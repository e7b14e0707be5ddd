// src/checker/assets.rs
// =============================================================================
// Asset classification by file extension.
//
// The known categories live in one ordered table; the first row whose
// extension list contains the extension wins. Anything else keeps its
// extension as its category (".xyz" -> "xyz").
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

use super::paths;

/// What kind of non-page resource a URL points at
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetKind {
    Image,
    /// Stylesheets and scripts
    WebAsset,
    /// PDF and office formats
    Document,
    Text,
    /// Unknown extension, stored lowercase
    Other(String),
}

const ASSET_TABLE: &[(&[&str], AssetKind)] = &[
    (
        &["jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "bmp", "tif", "tiff", "avif"],
        AssetKind::Image,
    ),
    (&["css", "js", "mjs"], AssetKind::WebAsset),
    (
        &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf"],
        AssetKind::Document,
    ),
    (
        &["txt", "xml", "json", "csv", "md", "yaml", "yml", "tsv", "lbl", "tab"],
        AssetKind::Text,
    ),
];

// Extensions that name a page to crawl rather than an asset
const PAGE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "shtml", "php", "asp", "aspx", "jsp"];

impl AssetKind {
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        ASSET_TABLE
            .iter()
            .find(|(extensions, _)| extensions.contains(&ext.as_str()))
            .map(|(_, kind)| kind.clone())
            .unwrap_or(AssetKind::Other(ext))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AssetKind::Image => "image",
            AssetKind::WebAsset => "web_asset",
            AssetKind::Document => "document",
            AssetKind::Text => "text",
            AssetKind::Other(ext) => ext,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as the bare category name so JSON reports read "web_asset", "xyz"
impl Serialize for AssetKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classifies a URL path: None means a crawlable page, Some(kind) an asset.
///
/// Paths with no extension, or with an HTML-like one, are pages.
pub fn classify_path(path: &str) -> Option<AssetKind> {
    let ext = paths::extension(path)?;
    if PAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(AssetKind::from_extension(&ext))
}
