//! Error types for config validation and loading.

use thiserror::Error;

/// Error codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: No affirmations supplied
    NoAffirmations,
    /// E002: Duration outside 5-40 minutes
    DurationOutOfRange,
    /// E003: Explicit beat frequency outside 0.5-30 Hz
    FrequencyOutOfRange,
    /// E004: Volume outside -30..0 dB
    VolumeOutOfRange,
    /// E005: Voice tuning value outside 0.0-1.0
    VoiceTuningOutOfRange,
    /// E006: Low-pass cutoff outside 2000-8000 Hz
    CutoffOutOfRange,
    /// E007: Repetitions outside 1-10
    RepetitionsOutOfRange,
    /// E008: Title longer than 100 characters
    TitleTooLong,
    /// E009: Sample rate is zero or cannot represent the configured frequencies
    InvalidSampleRate,
    /// E010: Carrier frequency is not positive
    InvalidCarrier,
    /// E011: Voice identifier is empty
    EmptyVoiceId,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoAffirmations => "E001",
            ErrorCode::DurationOutOfRange => "E002",
            ErrorCode::FrequencyOutOfRange => "E003",
            ErrorCode::VolumeOutOfRange => "E004",
            ErrorCode::VoiceTuningOutOfRange => "E005",
            ErrorCode::CutoffOutOfRange => "E006",
            ErrorCode::RepetitionsOutOfRange => "E007",
            ErrorCode::TitleTooLong => "E008",
            ErrorCode::InvalidSampleRate => "E009",
            ErrorCode::InvalidCarrier => "E010",
            ErrorCode::EmptyVoiceId => "E011",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Preset name is not one of the known bands
    UnrecognizedPreset,
    /// W002: Not every affirmation will fit before the trail window
    UnderPlacement,
    /// W003: An affirmation is blank
    BlankAffirmation,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnrecognizedPreset => "W001",
            WarningCode::UnderPlacement => "W002",
            WarningCode::BlankAffirmation => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "voice_settings.stability").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Errors raised while loading a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported config format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of config validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so callers can record a
/// stable code and category against the originating request.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001". These codes are stable and
    /// can be used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_with_path() {
        let err = ValidationError::with_path(
            ErrorCode::CutoffOutOfRange,
            "cutoff_hz must be in [2000, 8000], got 9000",
            "lowpass_filter.cutoff_hz",
        );
        assert_eq!(
            err.to_string(),
            "E006: cutoff_hz must be in [2000, 8000], got 9000 (at lowpass_filter.cutoff_hz)"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ValidationWarning::new(WarningCode::UnderPlacement, "only 12 of 40 fit");
        assert_eq!(warning.to_string(), "W002: only 12 of 40 fit");
    }

    #[test]
    fn test_validation_result_add_error_flips_ok() {
        let mut result = ValidationResult::default();
        assert!(result.is_ok());
        result.add_warning(ValidationWarning::new(WarningCode::BlankAffirmation, "blank"));
        assert!(result.is_ok());
        result.add_error(ValidationError::new(ErrorCode::NoAffirmations, "empty"));
        assert!(!result.is_ok());
        assert!(result.into_result().is_err());
    }
}
