//! Entrain Audio Backend
//!
//! This crate renders binaural affirmation tracks: a continuous two-tone
//! binaural beat with spoken phrases overlaid at jittered positions, encoded
//! to a lossless file.
//!
//! # Pipeline
//!
//! 1. [`binaural`] fills a full-length stereo [`AudioTrack`] in 30-second chunks.
//! 2. [`mixer::apply_gain`] scales the tone to the configured level.
//! 3. [`schedule`] shuffles the repeated phrase list and walks a jittered cursor
//!    from the 30-second lead-in to the 30-second trail window.
//! 4. Each placement is spoken by a [`SpeechSynthesizer`], low-passed by
//!    [`filter::LowpassStage`], and overlaid by [`mixer::overlay`].
//! 5. A [`TrackEncoder`] writes the final buffer (FLAC by default).
//!
//! # Determinism
//!
//! All randomness goes through the RNG passed to [`generate()`]. Given the same
//! seed and the same speech output, the PCM hash in [`GenerateResult`] is
//! identical across runs.
//!
//! # Example
//!
//! ```ignore
//! use entrain_backend_audio::{generate, rng::create_rng, FlacEncoder};
//! use entrain_spec::GenerationConfig;
//!
//! let config = GenerationConfig::from_yaml(&std::fs::read_to_string("config.yaml")?)?;
//! let mut rng = create_rng(42);
//! let result = generate(
//!     &config,
//!     "out/meditation.flac".as_ref(),
//!     &mut speech,
//!     &FlacEncoder::default(),
//!     &mut rng,
//!     (),
//! )?;
//! println!("{} bytes, {} placements", result.file_size_bytes, result.placements);
//! ```

pub mod binaural;
pub mod encode;
pub mod error;
pub mod filter;
pub mod generate;
pub mod mixer;
pub mod progress;
pub mod rng;
pub mod schedule;
pub mod speech;
pub mod track;

// Re-export main types at crate root
pub use encode::{encoder_for_path, FlacEncoder, TrackEncoder, WavEncoder};
pub use error::{AudioError, AudioResult, Stage};
pub use generate::{generate, generate_with_params, GenerateResult};
pub use progress::{Progress, ProgressSink};
pub use schedule::{AffirmationScheduler, Placement, PlacementSchedule};
pub use speech::{SpeechError, SpeechRequest, SpeechSynthesizer};
pub use track::AudioTrack;
