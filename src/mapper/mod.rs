//! Asset mappers: backends that turn a reference into an asset.
//!
//! # Modules
//!
//! - [`filesystem`]: local directory backend with mtime versioning

mod filesystem;

use std::sync::Arc;

pub use filesystem::FilesystemMapper;

use crate::asset::Asset;
use crate::error::Result;
use crate::utils::options::AssetOptions;

// =============================================================================
// Mapper Trait
// =============================================================================

/// Trait for asset backends (filesystem, CDN, object storage, ...)
///
/// `Ok(None)` means the reference does not resolve to anything. Errors are
/// reserved for invalid input such as unsupported options.
pub trait Mapper: Send + Sync {
    /// Returns the asset for the given reference.
    fn get_asset(&self, reference: &str, options: &AssetOptions) -> Result<Option<Arc<dyn Asset>>>;
}
