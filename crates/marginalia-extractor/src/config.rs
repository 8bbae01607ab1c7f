//! Configuration for archive loading

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Archive location used when none is configured
pub const DEFAULT_ARCHIVE_PATH: &str = "~/Documents/Evernote";

/// Extension of export files inside the archive
pub const DEFAULT_EXTENSION: &str = "enex";

/// Configuration for loading a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding the export files (a leading `~` is expanded)
    pub archive_path: String,

    /// Stop after this many notes have been recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_notes: Option<usize>,

    /// Extension of export files, without the dot
    pub extension: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            archive_path: DEFAULT_ARCHIVE_PATH.to_string(),
            max_notes: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl CorpusConfig {
    /// Configuration for a specific archive directory
    pub fn with_archive_path(mut self, path: impl Into<String>) -> Self {
        self.archive_path = path.into();
        self
    }

    /// Limit the number of notes loaded
    pub fn with_max_notes(mut self, max_notes: Option<usize>) -> Self {
        self.max_notes = max_notes;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.archive_path.trim().is_empty() {
            return Err("archive_path must not be empty".to_string());
        }
        if self.max_notes == Some(0) {
            return Err("max_notes must be greater than 0 when set".to_string());
        }
        if self.extension.is_empty() {
            return Err("extension must not be empty".to_string());
        }
        if self.extension.contains(['/', '\\', '*', '?', '.']) {
            return Err(format!(
                "extension '{}' must be a bare extension such as 'enex'",
                self.extension
            ));
        }
        Ok(())
    }

    /// Archive path with `~` expanded
    pub fn expanded_archive_path(&self) -> PathBuf {
        expand_home(self.archive_path.trim())
    }

    /// Expanded archive path, checked to be an existing directory
    pub fn resolve_archive_dir(&self) -> Result<PathBuf, ExtractorError> {
        let path = self.expanded_archive_path();
        if path.is_dir() {
            Ok(path)
        } else {
            Err(ExtractorError::ArchiveNotFound(path))
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractorError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents).map_err(ExtractorError::Config)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }
}

/// Expand a leading `~` to the home directory
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
