//! ElevenLabs speech client.
//!
//! Requests raw 16-bit little-endian mono PCM (`output_format=pcm_<rate>`) so
//! the response can be mixed without decoding. Only the rates the API offers
//! for PCM output are accepted.

use std::time::Duration;

use entrain_backend_audio::{SpeechError, SpeechRequest, SpeechSynthesizer};
use entrain_spec::VoiceTuning;
use serde::{Deserialize, Serialize};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Speech model used for every phrase.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Sample rates available as raw PCM output.
pub const PCM_SAMPLE_RATES: &[u32] = &[16000, 22050, 24000, 44100];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Text-to-speech request body.
#[derive(Debug, Serialize)]
struct TtsBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceTuning,
}

/// Subset of the voice metadata response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VoiceInfo {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Blocking ElevenLabs client.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl ElevenLabsClient {
    /// Creates a client against the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SpeechError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against another API root.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SpeechError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SpeechError::with_source("failed to build HTTP client", e))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        })
    }

    /// Reads the API key from `--api-key` or the environment.
    pub fn from_key_or_env(api_key: Option<&str>) -> Result<Self, SpeechError> {
        let key = match api_key {
            Some(key) => key.to_string(),
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                SpeechError::new(format!("no API key: pass --api-key or set {API_KEY_ENV}"))
            })?,
        };
        if key.trim().is_empty() {
            return Err(SpeechError::new("API key is empty"));
        }
        Self::new(key)
    }

    /// Fetches metadata for one voice.
    pub fn voice_info(&self, voice_id: &str) -> Result<VoiceInfo, SpeechError> {
        let url = format!("{}/v1/voices/{}", self.base_url, voice_id);
        let response = self
            .http
            .get(&url)
            .header("xi-api-key", &self.api_key)
            .send()
            .map_err(|e| SpeechError::with_source(format!("voice lookup for {voice_id} failed"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::new(format!(
                "voice lookup for {voice_id} returned {status}"
            )));
        }

        response
            .json()
            .map_err(|e| SpeechError::with_source("malformed voice response", e))
    }
}

/// Maps a sample rate to its PCM output format name.
pub fn output_format(sample_rate: u32) -> Result<String, SpeechError> {
    if PCM_SAMPLE_RATES.contains(&sample_rate) {
        Ok(format!("pcm_{sample_rate}"))
    } else {
        Err(SpeechError::new(format!(
            "sample rate {sample_rate} Hz has no PCM output (supported: {PCM_SAMPLE_RATES:?})"
        )))
    }
}

/// Decodes 16-bit little-endian PCM. A trailing odd byte is dropped.
pub fn decode_pcm16le(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

impl SpeechSynthesizer for ElevenLabsClient {
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        let format = output_format(request.sample_rate)?;
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, request.voice_id);
        let body = TtsBody {
            text: request.text,
            model_id: &self.model_id,
            voice_settings: request.tuning,
        };

        log::debug!("requesting speech for {:?} ({format})", request.text);

        let response = self
            .http
            .post(&url)
            .query(&[("output_format", format.as_str())])
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| SpeechError::with_source("speech request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(SpeechError::new(format!(
                "speech provider returned {status}: {}",
                detail.trim()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| SpeechError::with_source("failed to read speech response", e))?;
        Ok(decode_pcm16le(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_format_for_supported_rates() {
        assert_eq!(output_format(22050).unwrap(), "pcm_22050");
        assert_eq!(output_format(44100).unwrap(), "pcm_44100");
        assert!(output_format(48000).is_err());
    }

    #[test]
    fn test_decode_pcm16le() {
        assert_eq!(
            decode_pcm16le(&[0x01, 0x00, 0xff, 0x7f, 0x00, 0x80, 0x42]),
            vec![1, i16::MAX, i16::MIN]
        );
        assert!(decode_pcm16le(&[]).is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let tuning = VoiceTuning::default();
        let body = TtsBody {
            text: "I am calm",
            model_id: DEFAULT_MODEL_ID,
            voice_settings: &tuning,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "I am calm");
        assert_eq!(json["model_id"], "eleven_multilingual_v2");
        assert_eq!(json["voice_settings"]["stability"], 0.8);
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.75);
        assert_eq!(json["voice_settings"]["use_speaker_boost"], true);
    }

    #[test]
    fn test_voice_info_tolerates_missing_fields() {
        let info: VoiceInfo = serde_json::from_str(r#"{"voice_id": "abc", "labels": {}}"#).unwrap();
        assert_eq!(info.voice_id, "abc");
        assert_eq!(info.preview_url, None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ElevenLabsClient::with_base_url("key", "http://localhost:1234/").unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }

    #[test]
    fn test_explicit_empty_key_is_rejected() {
        assert!(ElevenLabsClient::from_key_or_env(Some("  ")).is_err());
    }
}
