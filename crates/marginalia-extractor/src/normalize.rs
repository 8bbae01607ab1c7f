//! Markup-to-text normalization
//!
//! The normalizer runs two tiers. The full pipeline applies every stage in
//! [`STANDARD_STAGES`] inside an error boundary that catches both stage
//! errors and panics. If anything goes wrong, a minimal pipeline strips tag
//! syntax without regexes and trims the result. Callers always get a
//! string back, never an error, and never the raw input verbatim.

use crate::error::NormalizeError;
use crate::stages::{Stage, STANDARD_STAGES};
use once_cell::sync::Lazy;
use std::panic::{self, AssertUnwindSafe};
use tracing::{trace, warn};

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalize a markup body with the standard pipeline
///
/// # Examples
///
/// ```
/// use marginalia_extractor::normalize;
///
/// assert_eq!(normalize("<b>bold</b> and <i>ital</i>"), "**bold** and *ital*");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Normalize an optional markup body; `None` maps to an empty string
pub fn normalize_opt(raw: Option<&str>) -> String {
    DEFAULT_NORMALIZER.normalize_opt(raw)
}

/// Ordered pipeline of rewrite stages with a tag-stripping fallback
#[derive(Debug, Clone)]
pub struct Normalizer {
    stages: Vec<Stage>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            stages: STANDARD_STAGES.to_vec(),
        }
    }
}

impl Normalizer {
    /// Create a normalizer with the standard pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom pipeline
    pub fn with_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Stages in application order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Reduce markup to plain text. Never fails.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        match self.try_normalize(raw) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    error = %e,
                    input_len = raw.len(),
                    "Markup normalization failed, falling back to tag stripping"
                );
                minimal_normalize(raw)
            }
        }
    }

    /// Same as [`Normalizer::normalize`], treating `None` as empty input
    pub fn normalize_opt(&self, raw: Option<&str>) -> String {
        raw.map(|r| self.normalize(r)).unwrap_or_default()
    }

    /// Run the full pipeline, surfacing the first failure
    ///
    /// Panics inside a stage are converted into [`NormalizeError::Panic`].
    pub fn try_normalize(&self, raw: &str) -> Result<String, NormalizeError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run_stages(raw)))
            .map_err(|payload| NormalizeError::Panic(panic_message(payload.as_ref())))?
    }

    fn run_stages(&self, raw: &str) -> Result<String, NormalizeError> {
        let mut text = raw.to_string();
        for stage in &self.stages {
            text = stage.run(&text)?;
            trace!(stage = stage.name, len = text.len(), "Stage applied");
        }
        Ok(text)
    }
}

/// Fallback pipeline: strip tag syntax and trim
///
/// Uses the same notion of a tag as the full pipeline (`<`, at least one
/// character that is not `>`, then `>`), scanned by hand so it cannot fail.
pub fn minimal_normalize(raw: &str) -> String {
    strip_tag_syntax(raw).trim().to_string()
}

fn strip_tag_syntax(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('>') {
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
