//! Central registry of asset mappers and cache of resolved assets.
//!
//! Assets are requested by scope-qualified reference (`scope:reference`).
//! The registry dispatches to the mapper registered for the scope and keeps
//! the last [`MAX_CACHE_SIZE`] results, including "not found" results.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = Registry::new();
//! registry.add_mapper("", FilesystemMapper::new("/assets", "www/assets", ["svg", "png"]))?;
//!
//! let logo = registry.get_asset("images/logo", &AssetOptions::new())?;
//! ```

mod cache;
mod reference;

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

pub use reference::{DEFAULT_SCOPE, QualifiedRef};

use crate::asset::Asset;
use crate::debug;
use crate::error::{AssetError, Result};
use crate::mapper::Mapper;
use crate::utils::options::{AssetOptions, to_query_string};

use cache::ResolutionCache;

/// Number of resolutions kept in the cache.
pub const MAX_CACHE_SIZE: usize = 10;

/// Mapper table plus resolution cache.
///
/// Mappers are registered through `&mut self` during setup; lookups take
/// `&self` and may run from several threads.
pub struct Registry {
    mappers: FxHashMap<String, Box<dyn Mapper>>,
    cache: Mutex<ResolutionCache>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            mappers: FxHashMap::default(),
            cache: Mutex::new(ResolutionCache::new(MAX_CACHE_SIZE)),
        }
    }

    /// Register a mapper under a scope id.
    ///
    /// # Errors
    ///
    /// [`AssetError::DuplicateScope`] if the scope is already taken; the
    /// existing mapper is kept.
    pub fn add_mapper(&mut self, scope: impl Into<String>, mapper: impl Mapper + 'static) -> Result<()> {
        let scope = scope.into();
        if self.mappers.contains_key(&scope) {
            return Err(AssetError::DuplicateScope(scope));
        }
        debug!("registry"; "registered mapper '{}'", scope);
        self.mappers.insert(scope, Box::new(mapper));
        Ok(())
    }

    /// Get the mapper registered for a scope.
    ///
    /// # Errors
    ///
    /// [`AssetError::UnknownScope`] if nothing is registered under `scope`.
    pub fn mapper(&self, scope: &str) -> Result<&dyn Mapper> {
        self.mappers
            .get(scope)
            .map(Box::as_ref)
            .ok_or_else(|| AssetError::UnknownScope(scope.to_owned()))
    }

    /// Registered scope ids, sorted.
    pub fn scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<_> = self.mappers.keys().map(String::as_str).collect();
        scopes.sort_unstable();
        scopes
    }

    /// Resolve an asset by qualified reference.
    ///
    /// Accepts `"scope:reference"` strings (no `:` means the default scope)
    /// or a `(scope, reference)` pair. Returns `Ok(None)` if the mapper finds
    /// nothing; that outcome is cached like any other.
    ///
    /// # Errors
    ///
    /// Unknown scope or options rejected by the mapper. Errors are not cached.
    pub fn get_asset(
        &self,
        qualified: impl Into<QualifiedRef>,
        options: &AssetOptions,
    ) -> Result<Option<Arc<dyn Asset>>> {
        let QualifiedRef { scope, reference } = qualified.into();
        let key = cache_key(&scope, &reference, options);

        if let Some(cached) = self.cache.lock().get(&key) {
            return Ok(cached);
        }

        // Resolve outside the lock; filesystem probing can be slow
        let asset = self.mapper(&scope)?.get_asset(&reference, options)?;
        debug!(
            "registry";
            "resolved {} -> {}",
            key,
            asset.as_ref().map_or("<not found>", |a| a.url())
        );

        let mut cache = self.cache.lock();
        if let Some(existing) = cache.get(&key) {
            // Another thread resolved the same key meanwhile
            return Ok(existing);
        }
        if let Some(evicted) = cache.insert(key, asset.clone()) {
            debug!("registry"; "evicted {}", evicted);
        }
        Ok(asset)
    }

    /// Drop every cached resolution.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Number of cached resolutions.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the cache key: `scope:reference` plus `?query` when options are set.
fn cache_key(scope: &str, reference: &str, options: &AssetOptions) -> String {
    let query = to_query_string(options);
    if query.is_empty() {
        format!("{scope}:{reference}")
    } else {
        format!("{scope}:{reference}?{query}")
    }
}

// ============================================================================
// tests
// ============================================================================
