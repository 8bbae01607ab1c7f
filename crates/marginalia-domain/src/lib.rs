//! Marginalia Domain Layer
//!
//! This crate contains the domain model for Marginalia, a note archive
//! extractor. It has ZERO external dependencies and defines the value
//! objects and trait interfaces the extractor and CLI build upon.
//!
//! ## Key Concepts
//!
//! - **Note Record**: an open, ordered mapping from field name to value.
//!   There is no fixed schema; fields are discovered from the archive.
//! - **Field Value**: either a single string or the ordered sequence of
//!   every occurrence of a repeated field.
//! - **Note Id**: human-readable sequential identifier (`note_000042`).
//! - **Note Node**: the boundary trait an archive reader implements to
//!   expose one note's child elements.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod note_id;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use note_id::NoteId;
pub use record::{FieldValue, NoteRecord, BODY_FIELD, CLEANED_TEXT_FIELD, TITLE_FIELD, UNTITLED};
pub use traits::{ChildField, NoteNode};
