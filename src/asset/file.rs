//! File-backed asset with lazily probed metadata.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::ImageReader;

use super::Asset;
use crate::error::{AssetError, Result};
use crate::utils::mp3::guess_mp3_duration;

/// An asset backed by a file on the local filesystem.
///
/// Image size is probed on first access and memoized, including failures;
/// resolve the asset again to observe changes on disk. Audio duration is
/// memoized once it has been computed; a failed probe is tried again on the
/// next call.
#[derive(Debug)]
pub struct FileAsset {
    url: String,
    source_path: PathBuf,
    size: OnceLock<Result<(u32, u32)>>,
    duration: OnceLock<u64>,
}

impl FileAsset {
    pub fn new(url: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            source_path: source_path.into(),
            size: OnceLock::new(),
            duration: OnceLock::new(),
        }
    }

    /// Filesystem path of the source file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Check whether the source file currently exists (not cached).
    pub fn exists(&self) -> bool {
        self.source_path.is_file()
    }

    /// Duration in seconds, for constant-bitrate MP3 files.
    pub fn duration(&self) -> Result<u64> {
        if let Some(&seconds) = self.duration.get() {
            return Ok(seconds);
        }
        let seconds = guess_mp3_duration(&self.source_path)?;
        Ok(*self.duration.get_or_init(|| seconds))
    }

    /// Width in pixels, for image files.
    pub fn width(&self) -> Result<u32> {
        self.size().map(|(width, _)| width)
    }

    /// Height in pixels, for image files.
    pub fn height(&self) -> Result<u32> {
        self.size().map(|(_, height)| height)
    }

    /// Dimensions `(width, height)` of an image file.
    pub fn size(&self) -> Result<(u32, u32)> {
        self.size
            .get_or_init(|| probe_image_size(&self.source_path))
            .clone()
    }
}

impl Asset for FileAsset {
    fn url(&self) -> &str {
        &self.url
    }

    fn as_file(&self) -> Option<&FileAsset> {
        Some(self)
    }
}

impl fmt::Display for FileAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl PartialEq for FileAsset {
    /// Assets are equal when they point at the same URL and source file.
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.source_path == other.source_path
    }
}

impl Eq for FileAsset {}

/// Read image dimensions from the file header without decoding pixels.
fn probe_image_size(path: &Path) -> Result<(u32, u32)> {
    let reader = ImageReader::open(path)
        .map_err(|e| AssetError::file_access(path, e))?
        .with_guessed_format()
        .map_err(|e| AssetError::file_access(path, e))?;

    reader.into_dimensions().map_err(|e| match e {
        image::ImageError::IoError(io) => AssetError::file_access(path, io),
        other => AssetError::format(path, format!("cannot get size of image: {other}")),
    })
}
