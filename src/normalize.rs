//! Suffix and UTI normalization
//!
//! Canonical suffix form has no leading separator and is lower-cased
//! (`"jpg"`, never `".JPG"`). All lookup paths go through these helpers so
//! the two resolution strategies agree on keys.

use std::path::Path;

/// Normalizes a file-name suffix for lookup.
///
/// Strips one leading `.` if present and lower-cases the rest. Returns
/// `None` when nothing is left (empty input, or a bare `"."`).
///
/// Idempotent: normalizing an already-normalized suffix yields the same
/// value.
pub fn normalize_suffix(suffix: &str) -> Option<String> {
    let stripped = suffix.strip_prefix('.').unwrap_or(suffix);
    if stripped.is_empty() {
        return None;
    }
    Some(stripped.to_ascii_lowercase())
}

/// Normalizes a UTI for lookup. UTIs are compared case-insensitively.
pub fn normalize_uti(uti: &str) -> String {
    uti.to_ascii_lowercase()
}

/// Extracts the normalized suffix of a path, or `None` if the path has no
/// extension component.
pub fn suffix_of_path(path: &Path) -> Option<String> {
    let ext = path.extension()?;
    normalize_suffix(&ext.to_string_lossy())
}
