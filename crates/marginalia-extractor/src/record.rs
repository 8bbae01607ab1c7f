//! Record extraction from one note subtree

use crate::normalize::Normalizer;
use marginalia_domain::{
    FieldValue, NoteNode, NoteRecord, BODY_FIELD, CLEANED_TEXT_FIELD, TITLE_FIELD, UNTITLED,
};
use std::fmt::Display;
use tracing::{debug, error};

/// Build a record from every direct child of a note
///
/// Each child's tag name becomes a field and its text (empty when absent)
/// the value. Repeated children collect into a sequence. A missing title is
/// filled with [`UNTITLED`].
pub fn build_record<N: NoteNode>(node: &N) -> Result<NoteRecord, N::Error> {
    let mut record = NoteRecord::new();

    for child in node.child_fields()? {
        record.record(child.name, child.text.unwrap_or_default());
    }

    record.set_default(TITLE_FIELD, UNTITLED);
    Ok(record)
}

/// Build a record, logging and skipping the note on failure
pub fn extract_record<N>(node: &N) -> Option<NoteRecord>
where
    N: NoteNode,
    N::Error: Display,
{
    match build_record(node) {
        Ok(record) => Some(record),
        Err(e) => {
            error!("Error parsing note: {}", e);
            None
        }
    }
}

/// Normalize the body of a record and attach it as `cleaned_text`
///
/// A repeated body is normalized occurrence by occurrence and the non-empty
/// results are joined by a blank line. A record without a body gets an
/// empty `cleaned_text`.
///
/// The derived field takes precedence: a source child that is itself named
/// `cleaned_text` is replaced in place, keeping its position.
pub fn attach_cleaned_text(record: &mut NoteRecord, normalizer: &Normalizer) {
    let cleaned = match record.get(BODY_FIELD) {
        Some(FieldValue::Scalar(body)) => normalizer.normalize(body),
        Some(FieldValue::Sequence(bodies)) => bodies
            .iter()
            .map(|body| normalizer.normalize(body))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        None => String::new(),
    };

    if record.contains(CLEANED_TEXT_FIELD) {
        debug!("Replacing source field '{}' with derived text", CLEANED_TEXT_FIELD);
    }
    record.set(CLEANED_TEXT_FIELD, cleaned);
}

/// Extract a note and attach its cleaned text
pub fn extract_note<N>(node: &N, normalizer: &Normalizer) -> Option<NoteRecord>
where
    N: NoteNode,
    N::Error: Display,
{
    let mut record = extract_record(node)?;
    attach_cleaned_text(&mut record, normalizer);
    Some(record)
}
