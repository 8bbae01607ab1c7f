//! Marginalia Extractor
//!
//! Turns an offline note export archive (ENEX) into structured records with
//! a plain-text rendering of each note body.
//!
//! # Overview
//!
//! For every note in the archive, the record extractor collects each child
//! element into an open, ordered field mapping. The markup normalizer then
//! reduces the note's markup body to clean text, which is attached to the
//! record as `cleaned_text`.
//!
//! # Architecture
//!
//! ```text
//! Archive → discover *.enex → parse XML → <note> → Record → normalize(content) → Corpus → JSON
//! ```
//!
//! # Key Features
//!
//! - **Schema-less Records**: every child element becomes a field; repeated
//!   elements (tags) become ordered sequences
//! - **Staged Normalization**: nine named rewrite stages, each testable on
//!   its own, with a tag-stripping fallback that never fails
//! - **Partial Failure**: malformed files and notes are skipped, not fatal
//! - **Note Limit**: optional cap on the number of notes loaded
//! - **Export and Analysis**: JSON export and markup statistics
//!
//! # Example Usage
//!
//! ```no_run
//! use marginalia_extractor::{Corpus, CorpusConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CorpusConfig::default().with_archive_path("/data/evernote");
//! let mut corpus = Corpus::new(config);
//!
//! let summary = corpus.load()?;
//! println!("Loaded: {} notes", summary.notes_loaded);
//! println!("Skipped: {} notes", summary.notes_skipped);
//!
//! corpus.export_json(std::path::Path::new("notes_export.json"))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod stages;
mod normalize;
mod record;
mod archive;
mod export;
mod analysis;
mod corpus;


pub use error::{ExtractorError, NormalizeError};
pub use config::{expand_home, CorpusConfig, DEFAULT_ARCHIVE_PATH, DEFAULT_EXTENSION};
pub use stages::{
    convert_blocks, convert_emphasis, convert_lists, decode_entities, normalize_whitespace,
    strip_preamble, strip_root, strip_tags, unwrap_links, Stage, StageFn, STANDARD_STAGES,
};
pub use normalize::{minimal_normalize, normalize, normalize_opt, Normalizer};
pub use record::{attach_cleaned_text, build_record, extract_note, extract_record};
pub use archive::{discover_files, note_nodes, parse_document, EnexNote};
pub use export::{corpus_to_json, record_to_json, write_json, CorpusView, RecordView};
pub use analysis::MarkupStats;
pub use corpus::{Corpus, LoadSummary};
