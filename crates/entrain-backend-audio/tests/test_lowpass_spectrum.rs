//! Spectral checks for the per-clip low-pass stage.

use std::cell::RefCell;
use std::path::Path;

use entrain_backend_audio::filter::LowpassStage;
use entrain_backend_audio::rng::create_rng;
use entrain_backend_audio::{
    generate, AudioResult, AudioTrack, SpeechError, SpeechRequest, SpeechSynthesizer,
    TrackEncoder,
};
use entrain_spec::GenerationConfig;
use rand::Rng;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

const SR: u32 = 22050;
const WINDOW: usize = 8192;

/// Uniform noise, a stand-in for broadband speech.
struct NoiseVoice {
    len: usize,
}

impl SpeechSynthesizer for NoiseVoice {
    fn synthesize(&mut self, _: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        let mut rng = create_rng(1234);
        Ok((0..self.len).map(|_| rng.gen_range(-8000..=8000)).collect())
    }
}

#[derive(Default)]
struct CaptureEncoder {
    track: RefCell<Option<AudioTrack>>,
}

impl TrackEncoder for CaptureEncoder {
    fn encode(&self, track: &AudioTrack, _: &Path) -> AudioResult<u64> {
        *self.track.borrow_mut() = Some(track.clone());
        Ok(0)
    }

    fn extension(&self) -> &'static str {
        "pcm"
    }

    fn label(&self) -> &'static str {
        "PCM"
    }
}

/// Energy at or above `cutoff_hz` in a window of mono samples.
fn energy_above(samples: &[f64], cutoff_hz: f64) -> f64 {
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    FftPlanner::new()
        .plan_fft_forward(buffer.len())
        .process(&mut buffer);

    let bin_hz = SR as f64 / buffer.len() as f64;
    let first = (cutoff_hz / bin_hz).ceil() as usize;
    buffer[first..buffer.len() / 2]
        .iter()
        .map(|c| c.norm_sqr())
        .sum()
}

fn render(cutoff: Option<u32>) -> AudioTrack {
    let builder = GenerationConfig::builder(["Calm"]).duration_minutes(5);
    let config = match cutoff {
        Some(hz) => builder.lowpass(hz),
        None => builder.no_lowpass(),
    }
    .build();

    let encoder = CaptureEncoder::default();
    let result = generate(
        &config,
        Path::new("spectrum.pcm"),
        NoiseVoice { len: WINDOW },
        &encoder,
        &mut create_rng(8),
        (),
    )
    .unwrap();
    assert_eq!(result.num_frames, 300 * SR as usize);

    let track = encoder.track.borrow_mut().take();
    track.unwrap()
}

fn clip_window(track: &AudioTrack) -> Vec<f64> {
    let start = 30 * SR as usize;
    track.frames()[start..start + WINDOW]
        .iter()
        .map(|f| f[0] as f64)
        .collect()
}

#[test]
fn test_lowpass_removes_high_band_energy() {
    let filtered = clip_window(&render(Some(3750)));
    let unfiltered = clip_window(&render(None));

    let high_filtered = energy_above(&filtered, 3750.0);
    let high_unfiltered = energy_above(&unfiltered, 3750.0);

    assert!(
        high_filtered < high_unfiltered * 0.1,
        "filtered {high_filtered:e} vs unfiltered {high_unfiltered:e}"
    );
}

#[test]
fn test_lowpass_keeps_clip_length() {
    let stage = LowpassStage::new(Some(3750.0), SR).unwrap();
    let mut rng = create_rng(2);
    let clip: Vec<i16> = (0..12_345).map(|_| rng.gen_range(-1000..=1000)).collect();
    assert_eq!(stage.apply(clip).len(), 12_345);
}
