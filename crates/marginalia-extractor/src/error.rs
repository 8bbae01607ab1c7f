//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or exporting an archive
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Archive directory does not exist or is not a directory
    #[error("Archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// File discovery pattern could not be built
    #[error("Invalid archive pattern: {0}")]
    Pattern(String),

    /// Source document could not be parsed
    #[error("Malformed document {path}: {reason}")]
    MalformedDocument {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A single note could not be walked
    #[error("Malformed note: {0}")]
    MalformedNote(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Json(e.to_string())
    }
}

/// Errors raised inside the markup normalization pipeline
///
/// These never reach callers of [`crate::normalize`]; they trigger the
/// minimal fallback instead.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// A rewrite pattern failed to compile
    #[error("Pattern for stage '{stage}' failed to compile: {reason}")]
    Pattern {
        /// Stage that owns the pattern
        stage: &'static str,
        /// Compiler message
        reason: String,
    },

    /// A stage rejected its input
    #[error("Stage '{stage}' failed: {reason}")]
    Stage {
        /// Stage that failed
        stage: &'static str,
        /// Failure description
        reason: String,
    },

    /// A stage panicked
    #[error("Pipeline panicked: {0}")]
    Panic(String),
}
