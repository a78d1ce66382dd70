//! Stored-name generation.
//!
//! Every artifact is stored under a fresh random UUID followed by the
//! extension of the name the uploader gave us. Nothing else from the
//! original name reaches the filesystem.

use reqwest::Url;
use uuid::Uuid;

/// Name used when a URL path has no final segment.
pub const DEFAULT_URL_FILENAME: &str = "downloaded_file";

/// Generate a unique stored name that keeps the extension of `original_name`.
#[must_use]
pub fn generate_stored_name(original_name: &str) -> String {
    format!("{}{}", Uuid::new_v4(), extension(original_name))
}

/// Extension of the last path segment, including the dot.
///
/// Returns an empty string when there is none. Leading dots do not start an
/// extension, so `.bashrc` and `..` have none.
#[must_use]
pub fn extension(name: &str) -> &str {
    let base = base_name(name);
    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => &base[dot..],
        _ => "",
    }
}

/// Advisory filename for a URL: the last segment of its path.
///
/// Percent-encoding is left as-is. Falls back to [`DEFAULT_URL_FILENAME`].
#[must_use]
pub fn filename_from_url(url: &Url) -> String {
    let base = base_name(url.path());
    if base.is_empty() {
        DEFAULT_URL_FILENAME.to_string()
    } else {
        base.to_string()
    }
}

/// Last segment of a `/` or `\` separated path, ignoring trailing separators.
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
}
