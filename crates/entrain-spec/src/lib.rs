//! Entrain Generation Config Library
//!
//! This crate provides the types, preset resolution, and validation for Entrain
//! generation configs. A config describes one binaural affirmation track: the
//! phrases to speak, the voice, the beat band, and the mix levels.
//!
//! # Overview
//!
//! - **Config**: [`GenerationConfig`] is the immutable, serde-friendly input
//!   (JSON or YAML) with the same defaults the web form uses.
//! - **Resolution**: [`resolve`] turns a config into [`ResolvedParams`], the
//!   concrete numbers the audio backend consumes.
//! - **Validation**: [`validate_config`] checks field ranges and reports
//!   coded errors and warnings.
//!
//! # Example
//!
//! ```
//! use entrain_spec::{resolve, validate_config, BinauralPreset, GenerationConfig};
//!
//! let config = GenerationConfig::builder(["I am calm", "I am focused"])
//!     .duration_minutes(10)
//!     .preset(BinauralPreset::Alpha)
//!     .build();
//!
//! assert!(validate_config(&config).is_ok());
//!
//! let params = resolve(&config);
//! assert_eq!(params.beat_hz, 10.0);
//! assert_eq!(params.total_frames, 10 * 60 * 22050);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Config types and builder
//! - [`error`]: Error and warning types
//! - [`resolve`]: Preset resolution and spacing estimates
//! - [`validation`]: Range validation
//! - [`voices`]: Built-in voice name table

pub mod config;
pub mod error;
pub mod resolve;
pub mod validation;
pub mod voices;

pub use config::{
    AudioSettings, BinauralPreset, ConfigBuilder, GenerationConfig, LowpassSettings, VoiceTuning,
    DEFAULT_CARRIER_HZ, DEFAULT_SAMPLE_RATE,
};
pub use error::{
    BackendError, ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use resolve::{
    db_to_gain, preset_frequency, resolve, spacing_estimate, ResolvedParams, SpacingEstimate,
    EDGE_WINDOW_SECONDS, JITTER_SECONDS,
};
pub use validation::validate_config;
pub use voices::{resolve_voice_id, PresetVoice, PRESET_VOICES};
