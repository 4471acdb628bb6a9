//! Asset version management for cache busting.
//!
//! Uses the file modification time to generate version strings for assets.
//! When an asset file is replaced, its mtime changes and so does the URL,
//! triggering a browser re-fetch.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Compute the version string for a file: its mtime in whole seconds.
///
/// Returns `None` unless `path` is a regular file with a readable mtime
/// at or after the Unix epoch.
pub fn compute_version(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    let secs = get_mtime(path)?.duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(secs.to_string())
}

/// Append a version query parameter to a URL.
///
/// Returns `url?v=version` format.
pub fn apply_version(url: &str, version: &str) -> String {
    format!("{url}?v={version}")
}

/// Get versioned URL for an asset, or the plain URL when no version is
/// available for `path`.
pub fn versioned_url(url: &str, path: &Path) -> String {
    match compute_version(path) {
        Some(version) => apply_version(url, &version),
        None => url.to_owned(),
    }
}
