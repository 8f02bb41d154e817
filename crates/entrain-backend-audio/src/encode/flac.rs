//! FLAC output via libFLAC.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flac_bound::{FlacEncoder as FlacEnc, WriteWrapper};

use super::{ensure_parent_dir, file_size, TrackEncoder};
use crate::error::{AudioError, AudioResult};
use crate::track::AudioTrack;

/// Frames handed to libFLAC per call.
const BLOCK_FRAMES: usize = 4096;

/// Lossless FLAC writer, 16-bit stereo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacEncoder {
    /// libFLAC compression level (0 fastest to 8 smallest).
    pub compression_level: u32,
}

impl Default for FlacEncoder {
    fn default() -> Self {
        Self {
            compression_level: 5,
        }
    }
}

impl FlacEncoder {
    pub fn with_compression_level(level: u32) -> Self {
        Self {
            compression_level: level.min(8),
        }
    }
}

impl TrackEncoder for FlacEncoder {
    fn encode(&self, track: &AudioTrack, path: &Path) -> AudioResult<u64> {
        ensure_parent_dir(path)?;

        let file = File::create(path).map_err(|e| AudioError::filesystem(path, e))?;
        let mut output = BufWriter::new(file);

        {
            let config = FlacEnc::new()
                .ok_or_else(|| AudioError::encoding("FLAC encoder init failed"))?
                .channels(2)
                .sample_rate(track.sample_rate())
                .bits_per_sample(16)
                .compression_level(self.compression_level);

            let mut wrapper = WriteWrapper(&mut output);
            let mut encoder = config
                .init_write(&mut wrapper)
                .map_err(|e| AudioError::encoding(format!("FLAC init write failed: {e:?}")))?;

            // Interleaved, widened to i32 one block at a time
            let mut block = Vec::with_capacity(BLOCK_FRAMES * 2);
            for chunk in track.frames().chunks(BLOCK_FRAMES) {
                block.clear();
                for frame in chunk {
                    block.push(frame[0] as i32);
                    block.push(frame[1] as i32);
                }
                encoder
                    .process_interleaved(&block, chunk.len() as u32)
                    .map_err(|_| AudioError::encoding("FLAC process failed"))?;
            }

            encoder
                .finish()
                .map_err(|_| AudioError::encoding("FLAC finish failed"))?;
        }

        output.flush().map_err(|e| AudioError::filesystem(path, e))?;
        drop(output);

        file_size(path)
    }

    fn extension(&self) -> &'static str {
        "flac"
    }

    fn label(&self) -> &'static str {
        "FLAC"
    }
}
