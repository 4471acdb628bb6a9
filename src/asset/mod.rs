//! Resolved assets and URL versioning.

mod file;
pub mod version;

use std::fmt;

pub use file::FileAsset;

/// A static resource (image, script, stylesheet, ...) with a public URL.
///
/// `Display` renders the URL, so an asset can be dropped straight into a
/// template.
pub trait Asset: fmt::Debug + fmt::Display + Send + Sync {
    /// Public URL of the asset.
    fn url(&self) -> &str;

    /// File-backed view of this asset, if it has one.
    fn as_file(&self) -> Option<&FileAsset> {
        None
    }
}
