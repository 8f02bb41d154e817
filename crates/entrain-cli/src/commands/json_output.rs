//! JSON output types for machine-readable CLI output.
//!
//! Every command that takes `--json` prints exactly one of these documents to
//! stdout.

use entrain_spec::{ConfigError, SpacingEstimate, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Format: CLI_XXX for CLI-level errors; validation (`E0xx`) and backend
/// (`AUDIO_0xx`) codes pass through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown config extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON or YAML parse error
    pub const CONFIG_PARSE: &str = "CLI_003";
    /// Speech provider could not be set up
    pub const SPEECH_SETUP: &str = "CLI_004";
    /// Output extension names no supported encoder
    pub const UNSUPPORTED_OUTPUT: &str = "CLI_005";
    /// Output file could not be staged or moved into place
    pub const OUTPUT_WRITE: &str = "CLI_006";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "AUDIO_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Config field at fault (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W002")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Config field at fault (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Spacing summary in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpacingInfo {
    pub total_entries: usize,
    pub duration_seconds: u32,
    pub interval_seconds: f64,
    pub estimated_placements: usize,
    pub truncated: bool,
}

impl From<&SpacingEstimate> for SpacingInfo {
    fn from(estimate: &SpacingEstimate) -> Self {
        Self {
            total_entries: estimate.total_entries,
            duration_seconds: estimate.duration_seconds,
            interval_seconds: estimate.interval_seconds,
            estimated_placements: estimate.estimated_placements,
            truncated: estimate.is_truncated(),
        }
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the config is valid
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingInfo>,
}

/// Summary of a finished generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResultInfo {
    pub output_path: String,
    pub file_size_bytes: u64,
    pub placements: usize,
    pub total_entries: usize,
    pub sample_rate: u32,
    pub num_frames: usize,
    pub pcm_hash: String,
    /// Seed used for shuffle and jitter
    pub seed: u64,
    pub duration_ms: u64,
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResultInfo>,
}

impl GenerateOutput {
    pub fn success(result: GenerateResultInfo, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// Converts a validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    JsonError {
        code: error.code.to_string(),
        message: error.message.clone(),
        path: error.path.clone(),
    }
}

/// Converts a validation warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Converts a config load failure.
pub fn config_error_to_json(error: &ConfigError) -> JsonError {
    let code = match error {
        ConfigError::Io(_) => error_codes::FILE_READ,
        ConfigError::UnsupportedFormat(_) => error_codes::UNKNOWN_EXTENSION,
        ConfigError::JsonParse(_) | ConfigError::YamlParse(_) => error_codes::CONFIG_PARSE,
    };
    JsonError::new(code, error.to_string())
}

/// Prints a document as pretty JSON.
pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrain_spec::{ErrorCode, WarningCode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error_keeps_code_and_path() {
        let error = ValidationError::with_path(
            ErrorCode::CutoffOutOfRange,
            "cutoff must be 2000-8000 Hz",
            "lowpass_filter.cutoff_hz",
        );
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, "E006");
        assert_eq!(json.path.as_deref(), Some("lowpass_filter.cutoff_hz"));
    }

    #[test]
    fn test_warning_conversion() {
        let warning = ValidationWarning::new(WarningCode::UnderPlacement, "only 160 of 200 fit");
        let json = validation_warning_to_json(&warning);
        assert_eq!(json.code, "W002");
        assert_eq!(json.path, None);
    }

    #[test]
    fn test_config_error_codes() {
        let err = ConfigError::UnsupportedFormat("toml".to_string());
        assert_eq!(config_error_to_json(&err).code, error_codes::UNKNOWN_EXTENSION);

        let err = ConfigError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(config_error_to_json(&err).code, error_codes::FILE_READ);
    }

    #[test]
    fn test_failure_output_omits_result() {
        let output = GenerateOutput::failure(vec![JsonError::new("AUDIO_001", "boom")], vec![]);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
        assert_eq!(value["errors"][0]["code"], "AUDIO_001");
    }
}
