//! Config loading from JSON or YAML sources.
//!
//! Dispatches by file extension and returns the parsed config together with
//! its source provenance.

use std::path::Path;

use entrain_spec::{ConfigError, GenerationConfig};
use serde::{Deserialize, Serialize};

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Recognized YAML extensions.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Identifies the source format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Json,
    Yaml,
}

impl SourceKind {
    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Json => "json",
            SourceKind::Yaml => "yaml",
        }
    }

    /// Detects the format from a path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if JSON_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Json)
        } else if YAML_EXTENSIONS.contains(&ext.as_str()) {
            Some(SourceKind::Yaml)
        } else {
            None
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of loading a config file.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed config.
    pub config: GenerationConfig,
    /// Source format.
    pub source_kind: SourceKind,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Loads a config from a JSON or YAML file.
pub fn load_config(path: &Path) -> Result<LoadResult, ConfigError> {
    let source_kind = SourceKind::from_path(path).ok_or_else(|| {
        ConfigError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )
    })?;

    let content = std::fs::read_to_string(path)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let config = match source_kind {
        SourceKind::Json => GenerationConfig::from_json(&content)?,
        SourceKind::Yaml => GenerationConfig::from_yaml(&content)?,
    };

    log::debug!(
        "loaded {} config from {} ({})",
        source_kind,
        path.display(),
        &source_hash[..16]
    );

    Ok(LoadResult {
        config,
        source_kind,
        source_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_kind_from_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a.json")), Some(SourceKind::Json));
        assert_eq!(SourceKind::from_path(Path::new("a.YML")), Some(SourceKind::Yaml));
        assert_eq!(SourceKind::from_path(Path::new("a.yaml")), Some(SourceKind::Yaml));
        assert_eq!(SourceKind::from_path(Path::new("a.toml")), None);
        assert_eq!(SourceKind::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(
            &path,
            "affirmations:\n  - I am calm\n  - I am focused\nduration_minutes: 10\nbinaural_preset: alpha\n",
        )
        .unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.source_kind, SourceKind::Yaml);
        assert_eq!(loaded.source_hash.len(), 64);
        assert_eq!(loaded.config.affirmations.len(), 2);
        assert_eq!(loaded.config.duration_minutes, 10);
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"affirmations": ["Relax"], "repetitions": 3}"#).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.source_kind, SourceKind::Json);
        assert_eq!(loaded.config.repetitions, 3);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_config(Path::new("session.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref ext) if ext == "toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
