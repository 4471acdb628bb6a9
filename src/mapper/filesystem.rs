//! Filesystem mapper: serves files from a local directory.
//!
//! Supports versioning based on modification time and automatic extension
//! detection, so that `"logo"` can resolve to `logo.svg` or `logo.png`
//! depending on what exists on disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::asset::version::versioned_url;
use crate::asset::{Asset, FileAsset};
use crate::debug;
use crate::error::Result;
use crate::utils::options::{AssetOptions, check_options};

use super::Mapper;

/// Mapper for files below `base_path`, published under `base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemMapper {
    base_url: String,
    base_path: PathBuf,
    extensions: Vec<String>,
}

impl FilesystemMapper {
    /// Create a mapper.
    ///
    /// Trailing slashes are stripped from both bases (and backslashes from
    /// `base_path`). `extensions` are tried in order when resolving; an empty
    /// string stands for "no extension".
    pub fn new<I, S>(base_url: impl Into<String>, base_path: impl Into<PathBuf>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            base_path: trim_separators(base_path.into()),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Public URL for a relative path (no version).
    pub fn resolve_url(&self, reference: &str) -> String {
        format!("{}/{}", self.base_url, reference)
    }

    /// Filesystem path for a relative path.
    pub fn resolve_path(&self, reference: &str) -> PathBuf {
        let mut path = self.base_path.clone().into_os_string();
        path.push("/");
        path.push(reference);
        path.into()
    }

    /// Pick the extension (with leading dot) to append to `path`.
    ///
    /// The first configured candidate that exists on disk wins. When none
    /// exists, the first non-empty candidate is used, or no extension at all
    /// if every candidate is empty.
    fn find_extension(&self, path: &Path) -> String {
        let mut fallback: Option<String> = None;

        for ext in &self.extensions {
            let candidate = if ext.is_empty() {
                String::new()
            } else {
                let dotted = format!(".{ext}");
                if fallback.is_none() {
                    fallback = Some(dotted.clone());
                }
                dotted
            };
            if with_extension(path, &candidate).is_file() {
                return candidate;
            }
        }

        fallback.unwrap_or_default()
    }
}

impl Mapper for FilesystemMapper {
    fn get_asset(&self, reference: &str, options: &AssetOptions) -> Result<Option<Arc<dyn Asset>>> {
        check_options(options, &[], &[])?;

        let base = self.resolve_path(reference);
        let ext = if self.extensions.is_empty() {
            String::new()
        } else {
            self.find_extension(&base)
        };

        let source_path = with_extension(&base, &ext);
        if !source_path.is_file() {
            debug!("mapper"; "not found: {}", source_path.display());
            return Ok(None);
        }

        let url = versioned_url(&self.resolve_url(&format!("{reference}{ext}")), &source_path);
        Ok(Some(Arc::new(FileAsset::new(url, source_path))))
    }
}

/// Strip trailing `/` and `\` from a base directory.
///
/// Non-UTF-8 paths are rebuilt from their components, which drops a
/// trailing `/` without touching the other bytes.
fn trim_separators(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(s.trim_end_matches(['/', '\\'])),
        None => path.components().collect(),
    }
}

/// Append a dotted extension (or nothing) to a path without touching any
/// existing extension.
fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut full = OsString::from(path.as_os_str());
    full.push(ext);
    full.into()
}

// ============================================================================
// tests
// ============================================================================
