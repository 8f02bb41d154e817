//! Generate command implementation
//!
//! Loads and validates a config, then renders the track with the ElevenLabs
//! speech client and writes it to the requested path.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use entrain_backend_audio::rng::{create_rng, random_seed};
use entrain_backend_audio::{encoder_for_path, generate, SpeechError, SpeechSynthesizer};
use entrain_spec::{validate_config, BackendError, GenerationConfig};
use tempfile::NamedTempFile;

use super::json_output::{
    config_error_to_json, error_codes, print_json, validation_error_to_json,
    validation_warning_to_json, GenerateOutput, GenerateResultInfo, JsonError, JsonWarning,
};
use super::validate::print_validation_results;
use crate::elevenlabs::{output_format, ElevenLabsClient};
use crate::input::load_config;

/// Run the generate command
///
/// # Arguments
/// * `config_path` - Path to the config file (JSON or YAML)
/// * `output` - Output file; `.flac` or `.wav`
/// * `seed` - Seed for shuffle and jitter (random when absent)
/// * `api_key` - ElevenLabs key, falls back to `ELEVENLABS_API_KEY`
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    config_path: &str,
    output: &str,
    seed: Option<u64>,
    api_key: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    run_with(config_path, output, seed, json_output, |config| {
        output_format(config.audio.sample_rate)?;
        ElevenLabsClient::from_key_or_env(api_key)
    })
}

/// Runs generation with a caller-supplied speech provider.
///
/// The provider is only built once the config has validated and the output
/// format is known, and may reject the config before any audio is rendered.
///
/// The track is rendered into a temporary file beside `output` and moved over
/// it only on success, so a failed run leaves an existing file untouched.
pub fn run_with<S, F>(
    config_path: &str,
    output: &str,
    seed: Option<u64>,
    json_output: bool,
    make_speech: F,
) -> Result<ExitCode>
where
    S: SpeechSynthesizer,
    F: FnOnce(&GenerationConfig) -> Result<S, SpeechError>,
{
    let start = Instant::now();

    if !json_output {
        println!("{} {}", "Config:".cyan().bold(), config_path);
    }

    let loaded = match load_config(Path::new(config_path)) {
        Ok(loaded) => loaded,
        Err(e) => return fail(json_output, vec![config_error_to_json(&e)], Vec::new()),
    };
    let config = loaded.config;

    let validation = validate_config(&config);
    let warnings: Vec<JsonWarning> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    if !validation.is_ok() {
        if json_output {
            let errors = validation.errors.iter().map(validation_error_to_json).collect();
            print_json(&GenerateOutput::failure(errors, warnings))?;
        } else {
            print_validation_results(&validation);
            println!(
                "\n{} Config has {} error(s)",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(1));
    }
    if !json_output {
        print_validation_results(&validation);
    }

    let output_path = Path::new(output);
    let Some(encoder) = encoder_for_path(output_path) else {
        let error = JsonError::new(
            error_codes::UNSUPPORTED_OUTPUT,
            format!("unsupported output format: {} (expected .flac or .wav)", output),
        );
        return fail(json_output, vec![error], warnings);
    };

    let speech = match make_speech(&config) {
        Ok(speech) => speech,
        Err(e) => {
            let error = JsonError::new(error_codes::SPEECH_SETUP, e.to_string());
            return fail(json_output, vec![error], warnings);
        }
    };

    let seed = seed.unwrap_or_else(random_seed);
    log::info!("generating {} with seed {}", output_path.display(), seed);
    if !json_output {
        println!(
            "{} {} ({}, seed {})",
            "Output:".dimmed(),
            output,
            encoder.label(),
            seed
        );
    }

    let mut rng = create_rng(seed);
    let progress = move |percent: u8, message: &str| {
        if !json_output {
            println!("  [{:>3}%] {}", percent, message);
        }
    };

    let staging = match stage_output(output_path, encoder.extension()) {
        Ok(staging) => staging,
        Err(e) => {
            let error = JsonError::new(
                error_codes::OUTPUT_WRITE,
                format!("cannot create output next to {}: {}", output, e),
            );
            return fail(json_output, vec![error], warnings);
        }
    };
    log::debug!("rendering into {}", staging.path().display());

    let result = match generate(
        &config,
        staging.path(),
        speech,
        encoder.as_ref(),
        &mut rng,
        progress,
    ) {
        Ok(result) => result,
        Err(e) => {
            let error = JsonError::new(e.code(), e.to_string());
            return fail(json_output, vec![error], warnings);
        }
    };

    if let Err(e) = staging.persist(output_path) {
        let error = JsonError::new(
            error_codes::OUTPUT_WRITE,
            format!("failed to move render into {}: {}", output, e.error),
        );
        return fail(json_output, vec![error], warnings);
    }

    let duration_ms = start.elapsed().as_millis() as u64;

    if json_output {
        let info = GenerateResultInfo {
            output_path: output_path.to_string_lossy().into_owned(),
            file_size_bytes: result.file_size_bytes,
            placements: result.placements,
            total_entries: result.total_entries,
            sample_rate: result.sample_rate,
            num_frames: result.num_frames,
            pcm_hash: result.pcm_hash,
            seed,
            duration_ms,
        };
        print_json(&GenerateOutput::success(info, warnings))?;
    } else {
        println!(
            "\n{} {} affirmation(s) placed of {}",
            "Placed:".dimmed(),
            result.placements,
            result.total_entries
        );
        println!("{} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16]);
        println!(
            "\n{} Wrote {} ({} bytes, {}ms)",
            "SUCCESS".green().bold(),
            output_path.display(),
            result.file_size_bytes,
            duration_ms
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Creates an empty hidden file in the output's directory to render into.
///
/// Dropping it without persisting deletes it.
fn stage_output(output_path: &Path, extension: &str) -> std::io::Result<NamedTempFile> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let suffix = format!(".{extension}");
    let mut builder = tempfile::Builder::new();
    builder.prefix(".entrain-").suffix(&suffix);
    // Temp files default to owner-only; a finished track gets normal file mode
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir)
}

fn fail(
    json_output: bool,
    errors: Vec<JsonError>,
    warnings: Vec<JsonWarning>,
) -> Result<ExitCode> {
    if json_output {
        print_json(&GenerateOutput::failure(errors, warnings))?;
    } else {
        for error in &errors {
            println!("  {} [{}]: {}", "x".red(), error.code.red(), error.message);
        }
        println!("\n{} Generation failed", "FAILED".red().bold());
    }
    Ok(ExitCode::from(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entrain_backend_audio::SpeechRequest;

    struct Hum;

    impl SpeechSynthesizer for Hum {
        fn synthesize(&mut self, request: &SpeechRequest<'_>) -> Result<Vec<i16>, SpeechError> {
            Ok(vec![2000; request.sample_rate as usize / 2])
        }
    }

    fn write_config(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("session.yaml");
        std::fs::write(
            &path,
            "affirmations: [I am calm, I am safe]\nduration_minutes: 5\naudio:\n  sample_rate: 8000\n",
        )
        .unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_generate_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);
        let output = dir.path().join("out/session.wav");

        let code = run_with(&config, &output.to_string_lossy(), Some(7), true, |_| Ok(Hum)).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.is_file());
    }

    #[test]
    fn test_unsupported_output_fails_before_speech() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);

        let code = run_with(&config, "out.mp3", Some(1), false, |_| -> Result<Hum, _> {
            panic!("speech must not be built")
        })
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_speech_setup_failure_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);
        let output = dir.path().join("session.flac");

        let code = run_with(&config, &output.to_string_lossy(), None, true, |_| {
            Err::<Hum, _>(SpeechError::new("no API key"))
        })
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.exists());
    }

    #[test]
    fn test_unservable_sample_rate_is_rejected_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir);
        let output = dir.path().join("session.wav");

        // 8000 Hz has no PCM output format, so the client is never built
        let code = run(&config, &output.to_string_lossy(), Some(1), Some("key"), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!output.exists());
    }

    #[test]
    fn test_staged_output_lives_beside_target_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/session.flac");

        let staging = stage_output(&target, "flac").unwrap();
        let staged = staging.path().to_path_buf();
        assert_eq!(staged.parent(), target.parent());
        assert_eq!(staged.extension().and_then(|e| e.to_str()), Some("flac"));
        assert!(staged.is_file());

        drop(staging);
        assert!(!staged.exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"affirmations": ["x"], "repetitions": 50}"#).unwrap();

        let code = run_with(&path.to_string_lossy(), "out.wav", None, false, |_| Ok(Hum)).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
