//! Build configuration.
//!
//! Configuration is resolved in three layers, later layers winning:
//! - defaults
//! - `COURSE_SOURCE`, `COURSE_OUTPUT`, `COURSE_MANIFEST`, `COURSE_HOME` environment variables
//!   (via [`BuildConfig::from_env`]) or a JSON file (via [`BuildConfig::load`])
//! - command line flags

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_SOURCE: &str = "content";
const DEFAULT_OUTPUT: &str = "out";
const DEFAULT_MANIFEST: &str = "manifest";
const DEFAULT_HOME: &str = "home.md";

/// Everything the root [`crate::tree::ContentNode`] needs to resolve a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory holding the Markdown sources and the root manifest.
    pub source_root: PathBuf,
    /// Directory that is wiped and regenerated on every build.
    pub output_root: PathBuf,
    /// Reserved file name of the per-directory manifest.
    pub manifest_filename: String,
    /// Reserved file name of the optional per-directory landing page.
    pub home_filename: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(DEFAULT_SOURCE),
            output_root: PathBuf::from(DEFAULT_OUTPUT),
            manifest_filename: DEFAULT_MANIFEST.to_string(),
            home_filename: DEFAULT_HOME.to_string(),
        }
    }
}

impl BuildConfig {
    pub fn new(source_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source_root: std::env::var("COURSE_SOURCE")
                .map(PathBuf::from)
                .unwrap_or(defaults.source_root),
            output_root: std::env::var("COURSE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_root),
            manifest_filename: std::env::var("COURSE_MANIFEST")
                .unwrap_or(defaults.manifest_filename),
            home_filename: std::env::var("COURSE_HOME").unwrap_or(defaults.home_filename),
        }
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    pub fn with_manifest_filename(mut self, name: impl Into<String>) -> Self {
        self.manifest_filename = name.into();
        self
    }

    pub fn with_home_filename(mut self, name: impl Into<String>) -> Self {
        self.home_filename = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        fs::write(&path, r#"{"source_root": "lessons", "home_filename": "README.md"}"#).unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.source_root, PathBuf::from("lessons"));
        assert_eq!(config.output_root, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.manifest_filename, DEFAULT_MANIFEST);
        assert_eq!(config.home_filename, "README.md");
    }

    #[test]
    fn test_load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        fs::write(&path, "not json").unwrap();

        let err = BuildConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
