//! Uncompressed WAV output.

use std::path::Path;

use super::{ensure_parent_dir, file_size, TrackEncoder};
use crate::error::{AudioError, AudioResult};
use crate::track::AudioTrack;

/// 16-bit stereo PCM WAV writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WavEncoder;

impl TrackEncoder for WavEncoder {
    fn encode(&self, track: &AudioTrack, path: &Path) -> AudioResult<u64> {
        ensure_parent_dir(path)?;

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: track.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec).map_err(|e| match e {
            hound::Error::IoError(io) => AudioError::filesystem(path, io),
            other => AudioError::encoding(format!("WAV create failed: {other}")),
        })?;

        for frame in track.frames() {
            for &sample in frame {
                writer
                    .write_sample(sample)
                    .map_err(|e| AudioError::encoding(format!("WAV write failed: {e}")))?;
            }
        }

        writer
            .finalize()
            .map_err(|e| AudioError::encoding(format!("WAV finalize failed: {e}")))?;

        file_size(path)
    }

    fn extension(&self) -> &'static str {
        "wav"
    }

    fn label(&self) -> &'static str {
        "WAV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wav_round_trips_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.wav");
        let track = AudioTrack::from_frames(vec![[1, -1], [32767, -32767], [0, 5]], 22050);

        let size = WavEncoder.encode(&track, &path).unwrap();
        assert_eq!(size, std::fs::metadata(&path).unwrap().len());
        assert!(size >= 44 + 3 * 4);

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![1, -1, 32767, -32767, 0, 5]);
    }
}
