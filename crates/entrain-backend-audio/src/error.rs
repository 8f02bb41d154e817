//! Error types for audio backend.

use std::fmt;
use std::path::PathBuf;

use entrain_spec::BackendError;
use thiserror::Error;

use crate::speech::SpeechError;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Base tone synthesis.
    Binaural,
    /// Speech synthesis call.
    Synthesis,
    /// Per-clip low-pass filtering.
    Filter,
    /// Gain and overlay passes.
    Mix,
    /// File encoding.
    Encode,
}

impl Stage {
    /// Returns the stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Binaural => "binaural",
            Stage::Synthesis => "synthesis",
            Stage::Filter => "filter",
            Stage::Mix => "mix",
            Stage::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during track generation.
///
/// Every error is fatal to the run; nothing is retried.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The speech provider failed for a placement.
    #[error("speech synthesis failed for affirmation {index} ('{phrase}'): {source}")]
    Synthesis {
        /// 0-indexed position in the schedule.
        index: usize,
        /// Phrase being spoken.
        phrase: String,
        /// Provider error.
        #[source]
        source: SpeechError,
    },

    /// Output directory or file could not be created or written.
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The encoder rejected the stream.
    #[error("encoding error: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}' in {stage} stage: {message}")]
    InvalidParameter {
        /// Stage that rejected the value.
        stage: Stage,
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(stage: Stage, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            stage,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a filesystem error for a path.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the stage this error originated from.
    pub fn stage(&self) -> Stage {
        match self {
            AudioError::Synthesis { .. } => Stage::Synthesis,
            AudioError::Filesystem { .. } | AudioError::Encoding { .. } => Stage::Encode,
            AudioError::InvalidParameter { stage, .. } => *stage,
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Synthesis { .. } => "AUDIO_001",
            AudioError::Filesystem { .. } => "AUDIO_002",
            AudioError::Encoding { .. } => "AUDIO_003",
            AudioError::InvalidParameter { .. } => "AUDIO_004",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
