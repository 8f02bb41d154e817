//! Voices command implementation
//!
//! Lists the built-in voices with their preview URLs, served from the voice
//! catalog cache when it is fresh.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use entrain_spec::PRESET_VOICES;
use serde::Serialize;

use crate::elevenlabs::ElevenLabsClient;
use crate::voice_cache::{CacheStatus, VoiceCache, VoiceEntry};

/// JSON output for the `voices` command.
#[derive(Debug, Serialize)]
struct VoicesOutput<'a> {
    cache: CacheStatus,
    voices: &'a [VoiceEntry],
}

/// Run the voices command
///
/// # Arguments
/// * `refresh` - Ignore a fresh cache and refetch
/// * `clear_cache` - Delete the cache file and exit without listing
/// * `ttl_secs` - Cache time-to-live in seconds
/// * `api_key` - ElevenLabs key, falls back to `ELEVENLABS_API_KEY`
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    refresh: bool,
    clear_cache: bool,
    ttl_secs: u64,
    api_key: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let path = VoiceCache::default_path().context("Failed to determine cache directory")?;
    let cache = VoiceCache::new(path, ttl_secs);

    if clear_cache {
        return clear(&cache, json_output);
    }

    let (voices, status) = cache.get_or_fetch(Utc::now(), refresh, || {
        let client = ElevenLabsClient::from_key_or_env(api_key)?;
        Ok(fetch_catalog(|id| {
            client.voice_info(id).map(|info| info.preview_url)
        }))
    })?;

    if json_output {
        let json = serde_json::to_string_pretty(&VoicesOutput {
            cache: status,
            voices: &voices,
        })?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let source = match status {
        CacheStatus::Hit => "cached",
        CacheStatus::Fetched => "fetched",
    };
    println!(
        "{} ({}, {})",
        "Voices".cyan().bold(),
        source,
        cache.path().display()
    );
    for voice in &voices {
        let preview = voice
            .preview_url
            .as_deref()
            .map(|u| u.dimmed().to_string())
            .unwrap_or_else(|| "no preview".yellow().to_string());
        println!("  {:<8} {}  {}", voice.name.bold(), voice.voice_id, preview);
    }

    Ok(ExitCode::SUCCESS)
}

fn clear(cache: &VoiceCache, json_output: bool) -> Result<ExitCode> {
    let removed = cache.clear()?;
    if json_output {
        println!("{}", serde_json::json!({ "cleared": removed }));
    } else if removed {
        println!("{} {}", "Cleared".green().bold(), cache.path().display());
    } else {
        println!("{} no cache at {}", "Nothing to clear:".dimmed(), cache.path().display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Builds the catalog for the built-in voices.
///
/// A failed lookup leaves that voice without a preview rather than failing
/// the listing.
pub fn fetch_catalog<F, E>(mut lookup: F) -> Vec<VoiceEntry>
where
    F: FnMut(&str) -> Result<Option<String>, E>,
    E: std::fmt::Display,
{
    PRESET_VOICES
        .iter()
        .map(|voice| {
            let preview_url = match lookup(voice.id) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("failed to fetch voice {} ({}): {e}", voice.name, voice.id);
                    None
                }
            };
            VoiceEntry {
                name: voice.name.to_string(),
                voice_id: voice.id.to_string(),
                preview_url,
            }
        })
        .collect()
}
