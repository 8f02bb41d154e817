//! Lossless track encoders.
//!
//! A [`TrackEncoder`] serializes the finished [`AudioTrack`] to a path and
//! reports the size of the file it wrote. Missing parent directories are
//! created first.

mod flac;
mod wav;

pub use flac::FlacEncoder;
pub use wav::WavEncoder;

use std::fs;
use std::path::Path;

use crate::error::{AudioError, AudioResult};
use crate::track::AudioTrack;

/// Writes a stereo 16-bit track to a file.
pub trait TrackEncoder {
    /// Encodes `track` to `path`, returning the final file size in bytes.
    fn encode(&self, track: &AudioTrack, path: &Path) -> AudioResult<u64>;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Format name for progress messages.
    fn label(&self) -> &'static str;
}

impl<E: TrackEncoder + ?Sized> TrackEncoder for &E {
    fn encode(&self, track: &AudioTrack, path: &Path) -> AudioResult<u64> {
        (**self).encode(track, path)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }
}

impl<E: TrackEncoder + ?Sized> TrackEncoder for Box<E> {
    fn encode(&self, track: &AudioTrack, path: &Path) -> AudioResult<u64> {
        (**self).encode(track, path)
    }

    fn extension(&self) -> &'static str {
        (**self).extension()
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }
}

/// Picks an encoder from a path extension (`flac` or `wav`, case-insensitive).
pub fn encoder_for_path(path: &Path) -> Option<Box<dyn TrackEncoder>> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "flac" => Some(Box::new(FlacEncoder::default())),
        "wav" => Some(Box::new(WavEncoder)),
        _ => None,
    }
}

/// Creates the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> AudioResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| AudioError::filesystem(parent, e))
        }
        _ => Ok(()),
    }
}

/// Size of a file that was just written.
pub(crate) fn file_size(path: &Path) -> AudioResult<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| AudioError::filesystem(path, e))
}
