//! Config validation.
//!
//! Range checks mirror the limits the generation form enforces. The audio
//! backend assumes a config has passed these checks and does not repeat them.

use crate::config::GenerationConfig;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::resolve::spacing_estimate;

const MIN_DURATION_MINUTES: u32 = 5;
const MAX_DURATION_MINUTES: u32 = 40;
const MIN_BEAT_HZ: f64 = 0.5;
const MAX_BEAT_HZ: f64 = 30.0;
const MIN_VOLUME_DB: f64 = -30.0;
const MAX_VOLUME_DB: f64 = 0.0;
const MIN_CUTOFF_HZ: u32 = 2000;
const MAX_CUTOFF_HZ: u32 = 8000;
const MIN_REPETITIONS: u32 = 1;
const MAX_REPETITIONS: u32 = 10;
const MAX_TITLE_CHARS: usize = 100;

/// Validates a config and returns a validation result.
///
/// # Example
/// ```
/// use entrain_spec::{validate_config, GenerationConfig};
///
/// let config = GenerationConfig::builder(["I am calm"]).build();
/// assert!(validate_config(&config).is_ok());
///
/// let empty = GenerationConfig::builder(Vec::<String>::new()).build();
/// assert!(!validate_config(&empty).is_ok());
/// ```
pub fn validate_config(config: &GenerationConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_affirmations(config, &mut result);
    validate_basic(config, &mut result);
    validate_levels(config, &mut result);
    validate_voice(config, &mut result);
    validate_audio(config, &mut result);

    if result.is_ok() {
        check_warnings(config, &mut result);
    }

    result
}

fn validate_affirmations(config: &GenerationConfig, result: &mut ValidationResult) {
    if config.affirmations.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoAffirmations,
            "at least one affirmation is required",
            "affirmations",
        ));
    }
}

fn validate_basic(config: &GenerationConfig, result: &mut ValidationResult) {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&config.duration_minutes) {
        result.add_error(ValidationError::with_path(
            ErrorCode::DurationOutOfRange,
            format!(
                "duration_minutes must be in [{}, {}], got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, config.duration_minutes
            ),
            "duration_minutes",
        ));
    }

    if let Some(hz) = config.binaural_frequency_hz {
        if !hz.is_finite() || !(MIN_BEAT_HZ..=MAX_BEAT_HZ).contains(&hz) {
            result.add_error(ValidationError::with_path(
                ErrorCode::FrequencyOutOfRange,
                format!(
                    "binaural_frequency_hz must be in [{}, {}], got {}",
                    MIN_BEAT_HZ, MAX_BEAT_HZ, hz
                ),
                "binaural_frequency_hz",
            ));
        }
    }

    if !(MIN_REPETITIONS..=MAX_REPETITIONS).contains(&config.repetitions) {
        result.add_error(ValidationError::with_path(
            ErrorCode::RepetitionsOutOfRange,
            format!(
                "repetitions must be in [{}, {}], got {}",
                MIN_REPETITIONS, MAX_REPETITIONS, config.repetitions
            ),
            "repetitions",
        ));
    }

    if let Some(ref title) = config.title {
        let chars = title.chars().count();
        if chars > MAX_TITLE_CHARS {
            result.add_error(ValidationError::with_path(
                ErrorCode::TitleTooLong,
                format!("title must be at most {} characters, got {}", MAX_TITLE_CHARS, chars),
                "title",
            ));
        }
    }
}

fn validate_levels(config: &GenerationConfig, result: &mut ValidationResult) {
    let levels = [
        ("affirmation_volume_db", config.affirmation_volume_db),
        ("binaural_volume_db", config.binaural_volume_db),
    ];

    for (name, db) in levels {
        if !db.is_finite() || !(MIN_VOLUME_DB..=MAX_VOLUME_DB).contains(&db) {
            result.add_error(ValidationError::with_path(
                ErrorCode::VolumeOutOfRange,
                format!(
                    "{} must be in [{}, {}], got {}",
                    name, MIN_VOLUME_DB, MAX_VOLUME_DB, db
                ),
                name,
            ));
        }
    }

    let cutoff = config.lowpass_filter.cutoff_hz;
    if config.lowpass_filter.enabled && !(MIN_CUTOFF_HZ..=MAX_CUTOFF_HZ).contains(&cutoff) {
        result.add_error(ValidationError::with_path(
            ErrorCode::CutoffOutOfRange,
            format!(
                "cutoff_hz must be in [{}, {}], got {}",
                MIN_CUTOFF_HZ, MAX_CUTOFF_HZ, cutoff
            ),
            "lowpass_filter.cutoff_hz",
        ));
    }
}

fn validate_voice(config: &GenerationConfig, result: &mut ValidationResult) {
    if config.voice_id.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyVoiceId,
            "voice_id must not be empty",
            "voice_id",
        ));
    }

    let tuning = &config.voice_settings;
    let values = [
        ("stability", tuning.stability),
        ("similarity_boost", tuning.similarity_boost),
        ("style", tuning.style),
    ];

    for (name, value) in values {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::VoiceTuningOutOfRange,
                format!("{} must be in [0, 1], got {}", name, value),
                format!("voice_settings.{}", name),
            ));
        }
    }
}

fn validate_audio(config: &GenerationConfig, result: &mut ValidationResult) {
    let sample_rate = config.audio.sample_rate;
    let carrier = config.audio.carrier_frequency_hz;

    if !carrier.is_finite() || carrier <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidCarrier,
            format!("carrier_frequency_hz must be positive, got {}", carrier),
            "audio.carrier_frequency_hz",
        ));
    }

    if sample_rate == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            "sample_rate must be positive",
            "audio.sample_rate",
        ));
        return;
    }

    let nyquist = sample_rate as f64 / 2.0;
    if config.lowpass_filter.enabled && config.lowpass_filter.cutoff_hz as f64 >= nyquist {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            format!(
                "sample_rate {} cannot represent a {} Hz cutoff (Nyquist is {} Hz)",
                sample_rate, config.lowpass_filter.cutoff_hz, nyquist
            ),
            "audio.sample_rate",
        ));
    }

    let right_ear = carrier + config.binaural_frequency_hz.unwrap_or(MAX_BEAT_HZ);
    if right_ear >= nyquist {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            format!(
                "sample_rate {} cannot represent a {} Hz tone (Nyquist is {} Hz)",
                sample_rate, right_ear, nyquist
            ),
            "audio.sample_rate",
        ));
    }
}

fn check_warnings(config: &GenerationConfig, result: &mut ValidationResult) {
    if let Some(ref preset) = config.binaural_preset {
        if !preset.is_recognized() && config.binaural_frequency_hz.is_none() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnrecognizedPreset,
                format!("unknown preset '{}', using theta (6 Hz)", preset),
                "binaural_preset",
            ));
        }
    }

    for (i, phrase) in config.affirmations.iter().enumerate() {
        if phrase.trim().is_empty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::BlankAffirmation,
                "affirmation is blank",
                format!("affirmations[{}]", i),
            ));
        }
    }

    let spacing = spacing_estimate(config);
    if spacing.is_truncated() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnderPlacement,
            format!(
                "about {} of {} affirmations fit at {:.1}s spacing; the rest are dropped",
                spacing.estimated_placements, spacing.total_entries, spacing.interval_seconds
            ),
            "repetitions",
        ));
    }
}
