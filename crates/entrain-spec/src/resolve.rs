//! Config resolution.
//!
//! Turns a [`GenerationConfig`] into the concrete numbers the audio backend
//! works with, and estimates affirmation spacing for display.

use crate::config::{BinauralPreset, GenerationConfig, VoiceTuning};
use crate::voices::resolve_voice_id;

/// Silence kept free of affirmation starts at each end of the track, in seconds.
pub const EDGE_WINDOW_SECONDS: u32 = 30;

/// Maximum random offset applied to each affirmation step, in seconds.
pub const JITTER_SECONDS: u32 = 3;

/// Beat frequency used for theta and for any unrecognized preset.
const FALLBACK_BEAT_HZ: f64 = 6.0;

/// Concrete generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Track length in seconds.
    pub duration_seconds: u32,
    /// Track length in frames (samples per channel).
    pub total_frames: usize,
    /// Left-ear tone in Hz.
    pub carrier_hz: f64,
    /// Right-left frequency offset in Hz.
    pub beat_hz: f64,
    /// Linear gain for the binaural tone.
    pub binaural_gain: f32,
    /// Linear gain for each affirmation.
    pub affirmation_gain: f32,
    /// Low-pass cutoff in Hz, `None` when the filter is disabled.
    pub lowpass_cutoff_hz: Option<f64>,
    /// Times each phrase is scheduled.
    pub repetitions: usize,
    /// Provider voice ID.
    pub voice_id: String,
    /// Provider voice tuning.
    pub tuning: VoiceTuning,
}

impl ResolvedParams {
    /// Bytes held by the committed stereo 16-bit buffer.
    pub fn track_bytes(&self) -> usize {
        self.total_frames * 2 * std::mem::size_of::<i16>()
    }
}

/// Maps a preset to its representative beat frequency.
///
/// # Example
/// ```
/// use entrain_spec::{preset_frequency, BinauralPreset};
///
/// assert_eq!(preset_frequency(Some(&BinauralPreset::Delta)), 2.0);
/// assert_eq!(preset_frequency(Some(&BinauralPreset::parse("gamma"))), 6.0);
/// assert_eq!(preset_frequency(None), 6.0);
/// ```
pub fn preset_frequency(preset: Option<&BinauralPreset>) -> f64 {
    match preset {
        Some(BinauralPreset::Delta) => 2.0,
        Some(BinauralPreset::Theta) => 6.0,
        Some(BinauralPreset::Alpha) => 10.0,
        Some(BinauralPreset::Beta) => 20.0,
        Some(BinauralPreset::Unrecognized(_)) | None => FALLBACK_BEAT_HZ,
    }
}

/// Converts decibels to a linear amplitude factor.
pub fn db_to_gain(db: f64) -> f32 {
    10f64.powf(db / 20.0) as f32
}

/// Resolves a config into concrete parameters.
///
/// An explicit `binaural_frequency_hz` always wins over the preset.
pub fn resolve(config: &GenerationConfig) -> ResolvedParams {
    let sample_rate = config.audio.sample_rate;
    let duration_seconds = config.duration_minutes * 60;
    let beat_hz = config
        .binaural_frequency_hz
        .unwrap_or_else(|| preset_frequency(config.binaural_preset.as_ref()));

    ResolvedParams {
        sample_rate,
        duration_seconds,
        total_frames: duration_seconds as usize * sample_rate as usize,
        carrier_hz: config.audio.carrier_frequency_hz,
        beat_hz,
        binaural_gain: db_to_gain(config.binaural_volume_db),
        affirmation_gain: db_to_gain(config.affirmation_volume_db),
        lowpass_cutoff_hz: config
            .lowpass_filter
            .enabled
            .then_some(config.lowpass_filter.cutoff_hz as f64),
        repetitions: config.repetitions as usize,
        voice_id: resolve_voice_id(&config.voice_id).to_string(),
        tuning: config.voice_settings.clone(),
    }
}

/// Affirmation spacing summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingEstimate {
    /// Affirmations x repetitions.
    pub total_entries: usize,
    /// Track length in seconds.
    pub duration_seconds: u32,
    /// Nominal seconds between affirmation starts.
    pub interval_seconds: f64,
    /// Entries expected to start before the trail window, ignoring jitter.
    pub estimated_placements: usize,
}

impl SpacingEstimate {
    /// Returns true when some entries are expected to be dropped.
    pub fn is_truncated(&self) -> bool {
        self.estimated_placements < self.total_entries
    }
}

/// Estimates how affirmations will be spaced.
///
/// The estimate walks the nominal interval from the lead-in to the trail
/// window without jitter, so the real count can differ by a few entries.
pub fn spacing_estimate(config: &GenerationConfig) -> SpacingEstimate {
    let total_entries = config.total_entries();
    let duration_seconds = config.duration_minutes * 60;
    let sample_rate = config.audio.sample_rate as u64;

    if total_entries == 0 {
        return SpacingEstimate {
            total_entries,
            duration_seconds,
            interval_seconds: 0.0,
            estimated_placements: 0,
        };
    }

    let interval_seconds = duration_seconds as f64 / total_entries as f64;
    let interval_frames = (interval_seconds * sample_rate as f64) as u64;
    let window = (duration_seconds as u64 * sample_rate)
        .saturating_sub(2 * EDGE_WINDOW_SECONDS as u64 * sample_rate);

    let estimated_placements = if window == 0 {
        0
    } else if interval_frames == 0 {
        total_entries
    } else {
        (window.div_ceil(interval_frames) as usize).min(total_entries)
    };

    SpacingEstimate {
        total_entries,
        duration_seconds,
        interval_seconds,
        estimated_placements,
    }
}
