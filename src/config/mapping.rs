//! `[mapping]` entries: one asset scope each.
//!
//! # Example
//!
//! ```toml
//! [mapping]
//! default = "assets"                                  # www/assets → /assets
//! images = { path = "img", url = "static/img", extension = ["webp", "png"] }
//! icons = { path = "icons", extension = "svg" }       # url defaults to path
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::util::join_url;
use crate::mapper::FilesystemMapper;

// ============================================================================
// Mapping Entry
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingEntry {
    /// Sub-directory of the base path, published under the same name.
    Simple(String),
    /// Full format with separate URL and candidate extensions.
    Full(MappingTable),
}

/// Table form of a mapping entry.
///
/// Unknown keys are rejected: the untagged enum buffers the table, so they
/// would otherwise be dropped without a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingTable {
    /// Source directory (relative paths resolve against the base path).
    pub path: PathBuf,
    /// URL segment (defaults to `path`).
    #[serde(default)]
    pub url: Option<String>,
    /// Extensions tried when a reference has none.
    #[serde(default)]
    pub extension: Option<ExtensionList>,
}

impl MappingEntry {
    /// Source directory as written in the config.
    pub fn source(&self) -> &Path {
        match self {
            Self::Simple(dir) => Path::new(dir),
            Self::Full(table) => &table.path,
        }
    }

    /// URL segment as written in the config.
    pub fn url_segment(&self) -> String {
        match self {
            Self::Simple(dir) => dir.clone(),
            Self::Full(MappingTable { url: Some(url), .. }) => url.clone(),
            Self::Full(table) => table.path.to_string_lossy().replace('\\', "/"),
        }
    }

    /// Candidate extensions, in configured order.
    pub fn extensions(&self) -> &[String] {
        match self {
            Self::Full(MappingTable {
                extension: Some(list),
                ..
            }) => list.as_slice(),
            _ => &[],
        }
    }

    /// Build the filesystem mapper for this entry.
    pub fn to_mapper(&self, base_url: &str, base_path: &Path) -> FilesystemMapper {
        let url = join_url(base_url, &self.url_segment());
        let path = match self {
            Self::Simple(dir) => base_path.join(dir.trim_start_matches('/')),
            Self::Full(table) => base_path.join(&table.path),
        };
        FilesystemMapper::new(url, path, self.extensions().iter().cloned())
    }
}

// ============================================================================
// Extension List
// ============================================================================

/// A single extension or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionList {
    One(String),
    Many(Vec<String>),
}

impl ExtensionList {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(ext) => std::slice::from_ref(ext),
            Self::Many(list) => list,
        }
    }
}

// ============================================================================
// tests
// ============================================================================
