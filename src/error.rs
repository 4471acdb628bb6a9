//! Asset resolution errors.
//!
//! Structural errors (scopes, options) surface when a lookup is attempted.
//! Content errors (file access, format) surface only when metadata such as
//! image size or audio duration is requested, so URL resolution keeps working
//! for malformed files.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub type Result<T, E = AssetError> = std::result::Result<T, E>;

/// Errors raised by mappers, the registry and file metadata probes.
///
/// `Clone` so that a memoized probe failure can be handed out again.
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("asset mapper '{0}' is already registered")]
    DuplicateScope(String),

    #[error("unknown asset mapper '{0}'")]
    UnknownScope(String),

    #[error("{}", describe_options(.unsupported, .missing))]
    InvalidOptions {
        unsupported: Vec<String>,
        missing: Vec<String>,
    },

    #[error("failed to open file '{}'", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("invalid content in '{}': {reason}", .path.display())]
    Format { path: PathBuf, reason: String },
}

impl AssetError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn describe_options(unsupported: &[String], missing: &[String]) -> String {
    let mut parts = Vec::with_capacity(2);
    if !unsupported.is_empty() {
        parts.push(format!("unsupported asset options: {}", unsupported.join(", ")));
    }
    if !missing.is_empty() {
        parts.push(format!("missing asset options: {}", missing.join(", ")));
    }
    parts.join("; ")
}
