// src/checker/paths.rs
// =============================================================================
// Slash-delimited path matching shared by the hierarchy guard and the ignore
// policy.
//
// Both checks compare URL paths segment by segment instead of as raw strings,
// so "/sub" never matches "/subdirectory" and "images" never matches
// "/image-file.jpg".
// =============================================================================

/// Splits a path (or a pattern) into its non-empty segments.
///
/// "/docs/api/" -> ["docs", "api"], "images" -> ["images"]
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// True if `path` begins with every segment of `prefix`, in order.
///
/// An empty prefix matches everything.
pub fn starts_with_segments(path: &str, prefix: &str) -> bool {
    let path = segments(path);
    let prefix = segments(prefix);
    path.len() >= prefix.len() && path.iter().zip(&prefix).all(|(a, b)| a == b)
}

/// True if the segments of `pattern` appear as a contiguous run anywhere in
/// `path`. A leading slash on the pattern makes no difference.
///
/// An empty pattern matches nothing.
pub fn contains_segments(path: &str, pattern: &str) -> bool {
    let path = segments(path);
    let pattern = segments(pattern);
    if pattern.is_empty() || pattern.len() > path.len() {
        return false;
    }
    path.windows(pattern.len()).any(|window| window == pattern.as_slice())
}

/// Returns the lowercase file extension of the last path segment, if any.
///
/// "/a/logo.PNG" -> Some("png"), "/a/dir/" -> None, "/a/.hidden" -> None
pub fn extension(path: &str) -> Option<String> {
    // A trailing slash means the last segment is a directory
    if path.ends_with('/') {
        return None;
    }
    let last = path.rsplit('/').next()?;
    let (stem, ext) = last.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
