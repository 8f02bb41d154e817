//! Main entry point for track generation.
//!
//! Resolves a config, renders the binaural bed, speaks and overlays every
//! scheduled affirmation, and hands the finished buffer to an encoder.

use std::path::{Path, PathBuf};

use entrain_spec::{resolve, GenerationConfig, ResolvedParams};
use rand::Rng;

use crate::binaural::BinauralSynth;
use crate::encode::TrackEncoder;
use crate::error::{AudioError, AudioResult, Stage};
use crate::filter::LowpassStage;
use crate::mixer;
use crate::progress::{affirmation_percent, Progress, ProgressSink};
use crate::schedule::AffirmationScheduler;
use crate::speech::{SpeechRequest, SpeechSynthesizer};
use crate::track::AudioTrack;

/// Result of track generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateResult {
    /// File that was written.
    pub path: PathBuf,
    /// Final file size in bytes.
    pub file_size_bytes: u64,
    /// Affirmations actually mixed.
    pub placements: usize,
    /// Affirmations x repetitions requested.
    pub total_entries: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub num_frames: usize,
    /// BLAKE3 hash of the interleaved PCM.
    pub pcm_hash: String,
}

/// Generates a track from a config.
///
/// # Arguments
/// * `config` - Validated generation config
/// * `output` - Destination file; parent directories are created
/// * `speech` - Speech provider
/// * `encoder` - Output format
/// * `rng` - Source of shuffle and jitter randomness
/// * `progress` - Progress sink, `()` to discard
///
/// # Returns
/// Output path, size, and placement summary
pub fn generate<S, E, R, P>(
    config: &GenerationConfig,
    output: &Path,
    speech: S,
    encoder: &E,
    rng: &mut R,
    progress: P,
) -> AudioResult<GenerateResult>
where
    S: SpeechSynthesizer,
    E: TrackEncoder + ?Sized,
    R: Rng + ?Sized,
    P: ProgressSink,
{
    let params = resolve(config);
    generate_with_params(
        &params,
        &config.affirmations,
        output,
        speech,
        encoder,
        rng,
        progress,
    )
}

/// Generates a track from resolved parameters.
///
/// Any speech failure aborts the run; a partially written file is left for
/// the caller to remove.
pub fn generate_with_params<S, E, R, P>(
    params: &ResolvedParams,
    phrases: &[String],
    output: &Path,
    mut speech: S,
    encoder: &E,
    rng: &mut R,
    progress: P,
) -> AudioResult<GenerateResult>
where
    S: SpeechSynthesizer,
    E: TrackEncoder + ?Sized,
    R: Rng + ?Sized,
    P: ProgressSink,
{
    check_params(params)?;
    let lowpass = LowpassStage::new(params.lowpass_cutoff_hz, params.sample_rate)?;
    let mut progress = Progress::new(progress);

    log::info!(
        "rendering {} s at {} Hz: carrier {} Hz, beat {} Hz, {} byte buffer",
        params.duration_seconds,
        params.sample_rate,
        params.carrier_hz,
        params.beat_hz,
        params.track_bytes()
    );
    progress.report(5, "Generating binaural beat background...");

    let mut track = AudioTrack::silent(params.total_frames, params.sample_rate);
    BinauralSynth::new(params.carrier_hz, params.beat_hz).fill(&mut track);
    mixer::apply_gain(&mut track, params.binaural_gain);

    progress.report(30, "Binaural beat generated, adding affirmations...");

    let schedule = AffirmationScheduler::new(params.total_frames, params.sample_rate).schedule(
        phrases,
        params.repetitions,
        rng,
    );
    let total = schedule.total_entries();
    log::info!("scheduled {} of {} affirmations", schedule.len(), total);

    for placement in &schedule {
        progress.report(
            affirmation_percent(placement.index, total),
            &format!("Processing affirmation {}/{}", placement.index + 1, total),
        );

        let request = SpeechRequest {
            text: placement.phrase,
            voice_id: &params.voice_id,
            tuning: &params.tuning,
            sample_rate: params.sample_rate,
        };
        let clip = speech
            .synthesize(&request)
            .map_err(|source| AudioError::Synthesis {
                index: placement.index,
                phrase: placement.phrase.to_string(),
                source,
            })?;

        let clip = lowpass.apply(clip);
        let mixed = mixer::overlay(
            &mut track,
            placement.start_frame,
            &clip,
            params.affirmation_gain,
        );
        log::debug!(
            "affirmation {} at frame {}: {}/{} frames mixed",
            placement.index + 1,
            placement.start_frame,
            mixed,
            clip.len()
        );
    }

    progress.report(95, &format!("Exporting to {}...", encoder.label()));

    let pcm_hash = track.pcm_hash();
    let file_size_bytes = encoder.encode(&track, output)?;
    log::info!("wrote {} ({} bytes)", output.display(), file_size_bytes);

    progress.report(100, "Complete");

    Ok(GenerateResult {
        path: output.to_path_buf(),
        file_size_bytes,
        placements: schedule.len(),
        total_entries: total,
        sample_rate: params.sample_rate,
        num_frames: track.num_frames(),
        pcm_hash,
    })
}

fn check_params(params: &ResolvedParams) -> AudioResult<()> {
    if params.sample_rate == 0 {
        return Err(AudioError::invalid_param(
            Stage::Binaural,
            "sample_rate",
            "must be positive",
        ));
    }
    if !params.carrier_hz.is_finite() || params.carrier_hz <= 0.0 {
        return Err(AudioError::invalid_param(
            Stage::Binaural,
            "carrier_hz",
            format!("must be a positive frequency, got {}", params.carrier_hz),
        ));
    }
    if !params.beat_hz.is_finite() {
        return Err(AudioError::invalid_param(
            Stage::Binaural,
            "beat_hz",
            "must be finite",
        ));
    }
    if !params.binaural_gain.is_finite() || !params.affirmation_gain.is_finite() {
        return Err(AudioError::invalid_param(
            Stage::Mix,
            "volume_db",
            "gain must be finite",
        ));
    }
    Ok(())
}
