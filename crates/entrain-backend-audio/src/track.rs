//! Committed stereo sample buffer.

/// A stereo frame: `[left, right]`.
pub type Frame = [i16; 2];

/// Largest magnitude a mixed sample may take.
pub const SAMPLE_LIMIT: f32 = 32767.0;

/// Full-length stereo 16-bit track.
///
/// Allocated once at its final size and mutated in place by the synthesis and
/// mixing passes. The pipeline holds the only `&mut` to it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    frames: Vec<Frame>,
    sample_rate: u32,
}

impl AudioTrack {
    /// Allocates a silent track of `num_frames` frames.
    pub fn silent(num_frames: usize, sample_rate: u32) -> Self {
        Self {
            frames: vec![[0, 0]; num_frames],
            sample_rate,
        }
    }

    /// Wraps existing frames.
    pub fn from_frames(frames: Vec<Frame>, sample_rate: u32) -> Self {
        Self {
            frames,
            sample_rate,
        }
    }

    /// Number of frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.frames.len() as f64 / self.sample_rate as f64
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Number of frames in `seconds` of audio.
    pub fn frames_per(&self, seconds: u32) -> usize {
        seconds as usize * self.sample_rate as usize
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> i16 {
        self.frames
            .iter()
            .flat_map(|f| f.iter())
            .map(|s| s.saturating_abs())
            .max()
            .unwrap_or(0)
    }

    /// BLAKE3 hash of the interleaved little-endian PCM.
    pub fn pcm_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        let mut bytes = Vec::with_capacity(4096 * 4);
        for chunk in self.frames.chunks(4096) {
            bytes.clear();
            for frame in chunk {
                bytes.extend_from_slice(&frame[0].to_le_bytes());
                bytes.extend_from_slice(&frame[1].to_le_bytes());
            }
            hasher.update(&bytes);
        }
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_track_shape() {
        let track = AudioTrack::silent(22050 * 3, 22050);
        assert_eq!(track.num_frames(), 66150);
        assert_eq!(track.duration_seconds(), 3.0);
        assert_eq!(track.frames_per(2), 44100);
        assert_eq!(track.peak(), 0);
    }

    #[test]
    fn test_peak_uses_both_channels() {
        let track = AudioTrack::from_frames(vec![[10, -20], [i16::MIN, 5]], 8000);
        assert_eq!(track.peak(), i16::MAX);
    }

    #[test]
    fn test_pcm_hash_tracks_content() {
        let a = AudioTrack::from_frames(vec![[1, 2], [3, 4]], 8000);
        let b = AudioTrack::from_frames(vec![[1, 2], [3, 5]], 8000);
        assert_eq!(a.pcm_hash().len(), 64);
        assert_eq!(a.pcm_hash(), a.clone().pcm_hash());
        assert_ne!(a.pcm_hash(), b.pcm_hash());
    }
}
