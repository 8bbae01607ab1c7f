//! Note identifier module

use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "note_";

/// Sequential identifier for a note within a loaded corpus
///
/// Identifiers are assigned in source order to every successfully extracted
/// note and render as `note_` followed by a zero-padded six digit counter.
/// Ordering matches the order notes were encountered in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(usize);

impl NoteId {
    /// Create a NoteId from its sequence number
    ///
    /// # Examples
    ///
    /// ```
    /// use marginalia_domain::NoteId;
    ///
    /// let id = NoteId::new(7);
    /// assert_eq!(id.to_string(), "note_000007");
    /// ```
    pub fn new(sequence: usize) -> Self {
        Self(sequence)
    }

    /// Get the sequence number
    pub fn sequence(&self) -> usize {
        self.0
    }

    /// The identifier that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Parse a NoteId from its display form
    ///
    /// Accepts the padded form (`note_000012`) and, for convenience on the
    /// command line, a bare sequence number (`12`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Invalid note id: '{}'", s));
        }

        digits
            .parse::<usize>()
            .map(Self)
            .map_err(|e| format!("Invalid note id '{}': {}", s, e))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:06}", PREFIX, self.0)
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
