//! Generation config types.
//!
//! A [`GenerationConfig`] is the immutable input of one generation run. Every
//! field except `affirmations` has a default, so a minimal document is just a
//! list of phrases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default working sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Default carrier tone frequency in Hz.
pub const DEFAULT_CARRIER_HZ: f64 = 200.0;

/// Named brainwave band used to pick a beat frequency.
///
/// Unknown names are kept verbatim as [`BinauralPreset::Unrecognized`] rather
/// than rejected; they resolve to the theta frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BinauralPreset {
    /// 0.5-4 Hz, deep sleep.
    Delta,
    /// 4-8 Hz, meditation.
    Theta,
    /// 8-13 Hz, relaxation.
    Alpha,
    /// 13-30 Hz, focus.
    Beta,
    /// Any other name.
    Unrecognized(String),
}

impl BinauralPreset {
    /// Parses a preset name. Never fails.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "delta" => Self::Delta,
            "theta" => Self::Theta,
            "alpha" => Self::Alpha,
            "beta" => Self::Beta,
            _ => Self::Unrecognized(name.to_string()),
        }
    }

    /// Returns the preset name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Delta => "delta",
            Self::Theta => "theta",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Unrecognized(name) => name,
        }
    }

    /// Returns true for the four known bands.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for BinauralPreset {
    fn default() -> Self {
        Self::Theta
    }
}

impl From<String> for BinauralPreset {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<BinauralPreset> for String {
    fn from(preset: BinauralPreset) -> Self {
        preset.as_str().to_string()
    }
}

impl fmt::Display for BinauralPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speech provider voice tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceTuning {
    /// Voice stability (0.0 to 1.0).
    pub stability: f64,
    /// Similarity to the reference voice (0.0 to 1.0).
    pub similarity_boost: f64,
    /// Style exaggeration (0.0 to 1.0).
    pub style: f64,
    /// Provider-side speaker boost.
    pub use_speaker_boost: bool,
}

impl Default for VoiceTuning {
    fn default() -> Self {
        Self {
            stability: 0.8,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

/// Low-pass filter settings applied to each spoken phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowpassSettings {
    /// Whether the filter runs at all.
    pub enabled: bool,
    /// Cutoff frequency in Hz (2000 to 8000).
    pub cutoff_hz: u32,
}

impl Default for LowpassSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            cutoff_hz: 3750,
        }
    }
}

/// Working sample rate and carrier tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Carrier frequency in Hz (left ear).
    pub carrier_frequency_hz: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            carrier_frequency_hz: DEFAULT_CARRIER_HZ,
        }
    }
}

fn default_voice_id() -> String {
    "Rachel".to_string()
}

fn default_duration_minutes() -> u32 {
    40
}

fn default_preset() -> Option<BinauralPreset> {
    Some(BinauralPreset::Theta)
}

fn default_affirmation_volume_db() -> f64 {
    -15.0
}

fn default_binaural_volume_db() -> f64 {
    -12.0
}

fn default_repetitions() -> u32 {
    1
}

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Phrases to speak, in the order given (they are shuffled at schedule time).
    pub affirmations: Vec<String>,

    /// Optional display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Voice name from the built-in table, or a raw provider voice ID.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// Track length in minutes.
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    /// Beat band, used when no explicit frequency is set.
    #[serde(default = "default_preset")]
    pub binaural_preset: Option<BinauralPreset>,

    /// Explicit beat frequency in Hz; overrides the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binaural_frequency_hz: Option<f64>,

    /// Affirmation level in dB.
    #[serde(default = "default_affirmation_volume_db")]
    pub affirmation_volume_db: f64,

    /// Binaural tone level in dB.
    #[serde(default = "default_binaural_volume_db")]
    pub binaural_volume_db: f64,

    /// Speech provider tuning.
    #[serde(default)]
    pub voice_settings: VoiceTuning,

    /// Per-phrase low-pass filter.
    #[serde(default)]
    pub lowpass_filter: LowpassSettings,

    /// How many times each phrase is scheduled.
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    /// Sample rate and carrier.
    #[serde(default)]
    pub audio: AudioSettings,
}

impl GenerationConfig {
    /// Creates a builder with the given phrases and default settings.
    pub fn builder<I, S>(affirmations: I) -> ConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConfigBuilder::new(affirmations)
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of scheduled entries before truncation (affirmations x repetitions).
    pub fn total_entries(&self) -> usize {
        self.affirmations.len() * self.repetitions as usize
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: GenerationConfig,
}

impl ConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new<I, S>(affirmations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config: GenerationConfig {
                affirmations: affirmations.into_iter().map(Into::into).collect(),
                title: None,
                voice_id: default_voice_id(),
                duration_minutes: default_duration_minutes(),
                binaural_preset: default_preset(),
                binaural_frequency_hz: None,
                affirmation_volume_db: default_affirmation_volume_db(),
                binaural_volume_db: default_binaural_volume_db(),
                voice_settings: VoiceTuning::default(),
                lowpass_filter: LowpassSettings::default(),
                repetitions: default_repetitions(),
                audio: AudioSettings::default(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn voice(mut self, voice_id: impl Into<String>) -> Self {
        self.config.voice_id = voice_id.into();
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.config.duration_minutes = minutes;
        self
    }

    pub fn preset(mut self, preset: BinauralPreset) -> Self {
        self.config.binaural_preset = Some(preset);
        self
    }

    pub fn frequency_hz(mut self, hz: f64) -> Self {
        self.config.binaural_frequency_hz = Some(hz);
        self
    }

    pub fn affirmation_volume_db(mut self, db: f64) -> Self {
        self.config.affirmation_volume_db = db;
        self
    }

    pub fn binaural_volume_db(mut self, db: f64) -> Self {
        self.config.binaural_volume_db = db;
        self
    }

    pub fn voice_settings(mut self, tuning: VoiceTuning) -> Self {
        self.config.voice_settings = tuning;
        self
    }

    /// Enables the low-pass filter at the given cutoff.
    pub fn lowpass(mut self, cutoff_hz: u32) -> Self {
        self.config.lowpass_filter = LowpassSettings {
            enabled: true,
            cutoff_hz,
        };
        self
    }

    pub fn no_lowpass(mut self) -> Self {
        self.config.lowpass_filter.enabled = false;
        self
    }

    pub fn repetitions(mut self, repetitions: u32) -> Self {
        self.config.repetitions = repetitions;
        self
    }

    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.config.audio.sample_rate = sample_rate;
        self
    }

    pub fn carrier_hz(mut self, hz: f64) -> Self {
        self.config.audio.carrier_frequency_hz = hz;
        self
    }

    pub fn build(self) -> GenerationConfig {
        self.config
    }
}
