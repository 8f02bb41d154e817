//! Speech synthesis boundary.
//!
//! The backend never talks to a provider directly. Callers supply a
//! [`SpeechSynthesizer`] that turns phrase text into mono 16-bit samples at the
//! pipeline sample rate.

use entrain_spec::VoiceTuning;
use thiserror::Error;

/// One phrase to speak.
#[derive(Debug, Clone, Copy)]
pub struct SpeechRequest<'a> {
    /// Phrase text.
    pub text: &'a str,
    /// Provider voice ID.
    pub voice_id: &'a str,
    /// Provider voice tuning.
    pub tuning: &'a VoiceTuning,
    /// Sample rate the returned samples must use.
    pub sample_rate: u32,
}

/// Provider, network, or quota failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SpeechError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SpeechError {
    /// Creates an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Converts phrase text to mono PCM.
///
/// Calls are blocking and are issued one at a time in schedule order. Any
/// error aborts the whole generation.
pub trait SpeechSynthesizer {
    /// Speaks one phrase, returning mono samples at `request.sample_rate`.
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError>;
}

impl<S: SpeechSynthesizer + ?Sized> SpeechSynthesizer for &mut S {
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        (**self).synthesize(request)
    }
}

impl<S: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Box<S> {
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        (**self).synthesize(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    struct Echo;

    impl SpeechSynthesizer for Echo {
        fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
            Ok(vec![1; request.text.len()])
        }
    }

    #[test]
    fn test_boxed_synthesizer_forwards() {
        let mut boxed: Box<dyn SpeechSynthesizer> = Box::new(Echo);
        let tuning = VoiceTuning::default();
        let request = SpeechRequest {
            text: "abc",
            voice_id: "v",
            tuning: &tuning,
            sample_rate: 22050,
        };
        assert_eq!(boxed.synthesize(&request).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_error_source_is_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = SpeechError::with_source("request failed", io);
        assert_eq!(err.message(), "request failed");
        assert!(err.source().is_some());
    }
}
