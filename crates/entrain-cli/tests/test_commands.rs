//! End-to-end command tests with an offline speech provider.

use std::path::Path;
use std::process::ExitCode;

use entrain_backend_audio::{SpeechError, SpeechRequest, SpeechSynthesizer};
use entrain_cli::commands::{generate, spacing, validate};

/// Returns a half-second tone for every phrase.
struct Tone;

impl SpeechSynthesizer for Tone {
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        let len = request.sample_rate as usize / 2;
        Ok((0..len)
            .map(|i| if (i / 20) % 2 == 0 { 4000 } else { -4000 })
            .collect())
    }
}

struct Broken;

impl SpeechSynthesizer for Broken {
    fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
        Err(SpeechError::new(format!("quota exceeded for '{}'", request.text)))
    }
}

fn write_config(dir: &Path) -> String {
    let path = dir.join("session.json");
    std::fs::write(
        &path,
        r#"{
  "title": "Evening",
  "affirmations": ["I am calm", "I am rested", "I let go"],
  "duration_minutes": 5,
  "binaural_preset": "alpha",
  "audio": { "sample_rate": 8000 }
}"#,
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_validate_and_spacing_accept_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    assert_eq!(validate::run(&config, true).unwrap(), ExitCode::SUCCESS);
    assert_eq!(spacing::run(&config, true).unwrap(), ExitCode::SUCCESS);
}

#[test]
fn test_generate_wav_has_expected_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = dir.path().join("session.wav");

    let code = generate::run_with(&config, &output.to_string_lossy(), Some(3), true, |_| {
        Ok(Tone)
    })
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let reader = hound::WavReader::open(&output).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 5 * 60 * 8000);
}

#[test]
fn test_generate_flac_writes_stream_marker() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = dir.path().join("session.flac");

    let code = generate::run_with(&config, &output.to_string_lossy(), Some(3), true, |_| {
        Ok(Tone)
    })
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"fLaC");
}

#[test]
fn test_synthesis_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = dir.path().join("session.wav");

    let code = generate::run_with(&config, &output.to_string_lossy(), Some(3), true, |_| {
        Ok(Broken)
    })
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!output.exists());
}

#[test]
fn test_failed_run_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = dir.path().join("keep.wav");
    std::fs::write(&output, b"previous render").unwrap();

    let code = generate::run_with(&config, &output.to_string_lossy(), Some(3), true, |_| {
        Ok(Broken)
    })
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous render");

    // No staging file is left behind
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 2, "unexpected files: {names:?}");
}

#[test]
fn test_successful_run_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = dir.path().join("session.wav");
    std::fs::write(&output, b"stale").unwrap();

    let code = generate::run_with(&config, &output.to_string_lossy(), Some(3), true, |_| {
        Ok(Tone)
    })
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.duration(), 5 * 60 * 8000);
}

#[test]
fn test_same_seed_renders_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let first = dir.path().join("a.wav");
    let second = dir.path().join("b.wav");

    for output in [&first, &second] {
        let code = generate::run_with(&config, &output.to_string_lossy(), Some(11), true, |_| {
            Ok(Tone)
        })
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}
