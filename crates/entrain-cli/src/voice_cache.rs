//! Time-limited cache of the voice catalog.
//!
//! Preview URLs come from the speech provider and change rarely, so the
//! catalog is kept as a JSON file in the user cache directory and refetched
//! once it is older than the TTL. The cache is an owned value; nothing about it
//! is process-global.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default time-to-live in seconds.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEntry {
    /// Display name.
    pub name: String,
    /// Provider voice ID.
    pub voice_id: String,
    /// Sample clip URL, if the provider returned one.
    pub preview_url: Option<String>,
}

/// On-disk cache document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheFile {
    fetched_at: DateTime<Utc>,
    voices: Vec<VoiceEntry>,
}

/// Where a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from a fresh cache file.
    Hit,
    /// Fetched because the cache was missing, stale, or bypassed.
    Fetched,
}

/// Voice catalog cache backed by a JSON file.
#[derive(Debug)]
pub struct VoiceCache {
    path: PathBuf,
    ttl: Duration,
}

impl VoiceCache {
    /// Creates a cache at `path` with a TTL in seconds.
    pub fn new(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        let secs = ttl_secs.min(i64::MAX as u64 / 1000) as i64;
        Self {
            path: path.into(),
            ttl: Duration::seconds(secs),
        }
    }

    /// Default cache file location (XDG-compatible).
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("entrain").join("voices.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<CacheFile> {
        let text = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("ignoring unreadable voice cache {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Returns cached entries if they are younger than the TTL at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<Vec<VoiceEntry>> {
        let file = self.read()?;
        let age = now.signed_duration_since(file.fetched_at);
        if age < Duration::zero() || age >= self.ttl {
            log::debug!("voice cache is stale ({}s old)", age.num_seconds());
            return None;
        }
        Some(file.voices)
    }

    /// Writes entries stamped with `now`.
    pub fn store(&self, voices: &[VoiceEntry], now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let file = CacheFile {
            fetched_at: now,
            voices: voices.to_vec(),
        };
        let json =
            serde_json::to_string_pretty(&file).context("Failed to serialize voice cache")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write voice cache: {}", self.path.display()))
    }

    /// Returns fresh cached entries, or calls `fetch` and stores its result.
    ///
    /// `refresh` skips the lookup. A failed write is logged and does not fail
    /// the call.
    pub fn get_or_fetch<F>(
        &self,
        now: DateTime<Utc>,
        refresh: bool,
        fetch: F,
    ) -> Result<(Vec<VoiceEntry>, CacheStatus)>
    where
        F: FnOnce() -> Result<Vec<VoiceEntry>>,
    {
        if !refresh {
            if let Some(voices) = self.get(now) {
                return Ok((voices, CacheStatus::Hit));
            }
        }

        let voices = fetch()?;
        if let Err(e) = self.store(&voices, now) {
            log::warn!("{e:#}");
        }
        Ok((voices, CacheStatus::Fetched))
    }

    /// Deletes the cache file, returning whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove voice cache: {}", self.path.display()))?;
        Ok(true)
    }
}
