//! Binaural beat tone synthesis.
//!
//! The left ear hears the carrier, the right ear hears carrier + beat. The tone
//! is written straight into the committed 16-bit track one 30-second chunk at a
//! time, so no floating-point buffer ever scales with the track length.

use std::f64::consts::TAU;

use crate::track::AudioTrack;

/// Peak amplitude of the raw tone: 30% of full scale.
pub const TONE_AMPLITUDE: f64 = 32767.0 * 0.3;

/// Seconds of audio rendered per chunk.
pub const CHUNK_SECONDS: u32 = 30;

/// Two-tone binaural beat generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinauralSynth {
    /// Left-ear frequency in Hz.
    pub carrier_hz: f64,
    /// Right-left offset in Hz.
    pub beat_hz: f64,
}

impl BinauralSynth {
    /// Creates a generator.
    pub fn new(carrier_hz: f64, beat_hz: f64) -> Self {
        Self {
            carrier_hz,
            beat_hz,
        }
    }

    /// Right-ear frequency in Hz.
    pub fn right_hz(&self) -> f64 {
        self.carrier_hz + self.beat_hz
    }

    /// Fills the whole track, chunk by chunk.
    pub fn fill(&self, track: &mut AudioTrack) {
        let sample_rate = track.sample_rate();
        let chunk_frames = track.frames_per(CHUNK_SECONDS).max(1);

        for (i, chunk) in track.frames_mut().chunks_mut(chunk_frames).enumerate() {
            self.render_chunk(i * chunk_frames, sample_rate, chunk);
        }
    }

    /// Renders frames `[start, start + out.len())` of the tone into `out`.
    ///
    /// Sample values are truncated toward zero when converted to `i16`.
    pub fn render_chunk(&self, start: usize, sample_rate: u32, out: &mut [[i16; 2]]) {
        let sr = sample_rate as f64;
        let left_step = TAU * self.carrier_hz / sr;
        let right_step = TAU * self.right_hz() / sr;

        for (offset, frame) in out.iter_mut().enumerate() {
            let n = (start + offset) as f64;
            frame[0] = ((left_step * n).sin() * TONE_AMPLITUDE) as i16;
            frame[1] = ((right_step * n).sin() * TONE_AMPLITUDE) as i16;
        }
    }
}
