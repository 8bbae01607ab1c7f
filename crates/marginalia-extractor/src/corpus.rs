//! Corpus: every note of an archive, extracted and normalized

use crate::analysis::MarkupStats;
use crate::archive;
use crate::config::CorpusConfig;
use crate::error::ExtractorError;
use crate::export;
use crate::normalize::Normalizer;
use crate::record;
use marginalia_domain::{NoteId, NoteRecord};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters from one [`Corpus::load`] run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Export files opened
    pub files_scanned: usize,

    /// Export files skipped as unreadable or malformed
    pub files_skipped: usize,

    /// Notes recorded
    pub notes_loaded: usize,

    /// Notes skipped as malformed
    pub notes_skipped: usize,

    /// Whether loading stopped early at the note limit
    pub truncated: bool,
}

/// Notes of one archive keyed by sequential id
///
/// # Example
///
/// ```no_run
/// use marginalia_extractor::{Corpus, CorpusConfig};
///
/// # fn example() -> Result<(), marginalia_extractor::ExtractorError> {
/// let config = CorpusConfig::default()
///     .with_archive_path("~/Documents/Evernote")
///     .with_max_notes(Some(100));
///
/// let mut corpus = Corpus::new(config);
/// let summary = corpus.load()?;
/// println!("Loaded {} notes", summary.notes_loaded);
///
/// for (id, note) in corpus.iter() {
///     println!("{} -> {}", id, note.title());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    config: CorpusConfig,
    normalizer: Normalizer,
    notes: BTreeMap<NoteId, NoteRecord>,
}

impl Corpus {
    /// Create an empty corpus for the configured archive
    pub fn new(config: CorpusConfig) -> Self {
        info!("Initialized corpus with archive path: {}", config.archive_path);
        Self {
            config,
            normalizer: Normalizer::default(),
            notes: BTreeMap::new(),
        }
    }

    /// Use a custom normalizer for note bodies
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Load every note of the archive, replacing anything loaded before
    ///
    /// Unreadable or malformed files and malformed notes are logged and
    /// skipped. Loading stops once `max_notes` notes have been recorded: no
    /// further file is opened, and `truncated` is set whenever a note or an
    /// export file was left unread.
    ///
    /// # Errors
    /// - Returns an error when the configuration is invalid.
    /// - Returns an error when the archive directory does not exist.
    pub fn load(&mut self) -> Result<LoadSummary, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;
        let dir = self.config.resolve_archive_dir()?;

        self.notes.clear();
        let mut summary = LoadSummary::default();
        let mut next_id = NoteId::new(0);

        let files = archive::discover_files(&dir, &self.config.extension)?;
        info!("Found {} export file(s) in {}", files.len(), dir.display());

        'files: for path in files {
            if self.limit_reached() {
                debug!("Note limit reached, not opening {}", display_name(&path));
                summary.truncated = true;
                break;
            }

            summary.files_scanned += 1;
            info!("Processing {}", display_name(&path));

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    summary.files_skipped += 1;
                    continue;
                }
            };

            let doc = match archive::parse_document(&path, &text) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!("Failed to parse {}", e);
                    summary.files_skipped += 1;
                    continue;
                }
            };

            for note in archive::note_nodes(&doc) {
                if self.limit_reached() {
                    summary.truncated = true;
                    break 'files;
                }

                match record::extract_note(&note, &self.normalizer) {
                    Some(note_record) => {
                        debug!("Recorded {} ({})", next_id, note_record.title());
                        self.notes.insert(next_id, note_record);
                        next_id = next_id.next();
                    }
                    None => summary.notes_skipped += 1,
                }
            }
        }

        summary.notes_loaded = self.notes.len();
        info!(
            notes = summary.notes_loaded,
            skipped_notes = summary.notes_skipped,
            skipped_files = summary.files_skipped,
            truncated = summary.truncated,
            "Loaded {} notes into corpus",
            summary.notes_loaded
        );

        Ok(summary)
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_notes
            .is_some_and(|max| self.notes.len() >= max)
    }

    /// All loaded notes keyed by id
    pub fn notes(&self) -> &BTreeMap<NoteId, NoteRecord> {
        &self.notes
    }

    /// Look up one note
    pub fn get(&self, id: &NoteId) -> Option<&NoteRecord> {
        self.notes.get(id)
    }

    /// Iterate notes in source order
    pub fn iter(&self) -> impl Iterator<Item = (&NoteId, &NoteRecord)> {
        self.notes.iter()
    }

    /// Number of loaded notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether no notes are loaded
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Markup statistics over the loaded bodies
    pub fn markup_stats(&self) -> MarkupStats {
        MarkupStats::from_records(self.notes.values())
    }

    /// Pretty JSON of every loaded note keyed by id
    pub fn to_json(&self) -> Result<String, ExtractorError> {
        export::corpus_to_json(&self.notes)
    }

    /// Write the JSON export; returns bytes written
    pub fn export_json(&self, path: &Path) -> Result<u64, ExtractorError> {
        let bytes = export::write_json(path, &self.notes)?;
        info!("Exported {} notes to {} ({} bytes)", self.notes.len(), path.display(), bytes);
        Ok(bytes)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
