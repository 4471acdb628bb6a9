//! MP3 duration estimation.
//!
//! Reads the first frame header and assumes constant bitrate for the whole
//! file. Variable-bitrate files produce an approximate (often wrong) value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AssetError, Result};

/// Number of leading bytes searched for the first frame sync.
const HEADER_WINDOW: u64 = 10_000;

/// Frame sync for MPEG-1 Layer III without CRC.
const FRAME_SYNC: [u8; 2] = [0xFF, 0xFB];

/// MPEG-1 Layer III bitrates in kbps, indexed by the 4-bit header field.
/// Index 0 ("free") and 15 ("bad") are not usable.
const BITRATES: [Option<u32>; 16] = [
    None,
    Some(32),
    Some(40),
    Some(48),
    Some(56),
    Some(64),
    Some(80),
    Some(96),
    Some(112),
    Some(128),
    Some(160),
    Some(192),
    Some(224),
    Some(256),
    Some(320),
    None,
];

/// Returns the duration of a constant-bitrate MP3 file in whole seconds.
pub fn guess_mp3_duration(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|e| AssetError::file_access(path, e))?;
    let file_size = file
        .metadata()
        .map_err(|e| AssetError::file_access(path, e))?
        .len();

    let mut header = Vec::with_capacity(HEADER_WINDOW as usize);
    file.take(HEADER_WINDOW)
        .read_to_end(&mut header)
        .map_err(|e| AssetError::file_access(path, e))?;

    mp3_duration_from_header(&header, file_size)
        .map_err(|reason| AssetError::format(path, reason))
}

/// Compute the duration from the leading bytes of a file and its total size.
///
/// The error is a human-readable reason; callers attach the path.
pub fn mp3_duration_from_header(header: &[u8], file_size: u64) -> Result<u64, String> {
    let offset = header
        .windows(FRAME_SYNC.len())
        .position(|w| w == FRAME_SYNC.as_slice())
        .ok_or_else(|| "failed to find MP3 frame sync bits".to_owned())?;

    let frame: [u8; 4] = header
        .get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| "truncated MP3 frame header".to_owned())?;
    let bits = u32::from_be_bytes(frame);

    let index = ((bits >> 12) & 0xF) as usize;
    let kbps = BITRATES[index].ok_or_else(|| "invalid or unsupported bitrate index".to_owned())?;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = (file_size as f64 * 8.0 / f64::from(kbps) / 1000.0).round() as u64;
    Ok(seconds)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Frame header with sync, MPEG-1 Layer III, given bitrate index.
    fn frame_header(bitrate_index: u8) -> [u8; 4] {
        [0xFF, 0xFB, bitrate_index << 4, 0x44]
    }

    #[test]
    fn test_duration_128kbps() {
        let mut header = vec![0u8; 37];
        header.extend_from_slice(&frame_header(9));
        header.extend_from_slice(&[0u8; 100]);

        let size = 2_000_000;
        let expected = (size as f64 * 8.0 / 128.0 / 1000.0).round() as u64;
        assert_eq!(mp3_duration_from_header(&header, size), Ok(expected));
        assert_eq!(expected, 125);
    }

    #[test]
    fn test_duration_rounds_to_nearest() {
        let header = frame_header(14); // 320 kbps
        // 60_000 bytes * 8 / 320 / 1000 = 1.5 -> 2
        assert_eq!(mp3_duration_from_header(&header, 60_000), Ok(2));
        // 50_000 bytes * 8 / 320 / 1000 = 1.25 -> 1
        assert_eq!(mp3_duration_from_header(&header, 50_000), Ok(1));
    }

    #[test]
    fn test_missing_sync() {
        let header = vec![0x49, 0x44, 0x33, 0x04, 0x00];
        let err = mp3_duration_from_header(&header, 1000).unwrap_err();
        assert!(err.contains("sync"));
    }

    #[test]
    fn test_invalid_bitrate_index() {
        assert!(mp3_duration_from_header(&frame_header(0), 1000).is_err());
        assert!(mp3_duration_from_header(&frame_header(15), 1000).is_err());
    }

    #[test]
    fn test_truncated_header() {
        let header = [0x00, 0xFF, 0xFB, 0x90];
        let err = mp3_duration_from_header(&header, 1000).unwrap_err();
        assert!(err.contains("truncated"));
    }

    #[test]
    fn test_guess_from_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("track.mp3");
        let mut content = frame_header(9).to_vec(); // 128 kbps
        content.resize(16_000, 0);
        fs::write(&file, &content).unwrap();

        // 16_000 * 8 / 128 / 1000 = 1.0
        assert_eq!(guess_mp3_duration(&file).unwrap(), 1);
    }

    #[test]
    fn test_guess_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = guess_mp3_duration(&dir.path().join("nope.mp3")).unwrap_err();
        assert!(matches!(err, AssetError::FileAccess { .. }));
    }

    #[test]
    fn test_guess_not_mp3() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "plain text").unwrap();

        let err = guess_mp3_duration(&file).unwrap_err();
        assert!(matches!(err, AssetError::Format { .. }));
    }
}
