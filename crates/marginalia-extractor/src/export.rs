//! JSON export of loaded records
//!
//! Records serialize as objects in field order: scalars as strings,
//! repeated fields as arrays. The corpus serializes as an object keyed by
//! note id.

use crate::error::ExtractorError;
use marginalia_domain::{FieldValue, NoteId, NoteRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serializable view of one record
pub struct RecordView<'a>(pub &'a NoteRecord);

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0.iter() {
            match value {
                FieldValue::Scalar(text) => map.serialize_entry(name, text)?,
                FieldValue::Sequence(values) => map.serialize_entry(name, values)?,
            }
        }
        map.end()
    }
}

/// Serializable view of a whole corpus
pub struct CorpusView<'a>(pub &'a BTreeMap<NoteId, NoteRecord>);

impl Serialize for CorpusView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in self.0 {
            map.serialize_entry(&id.to_string(), &RecordView(record))?;
        }
        map.end()
    }
}

/// Pretty JSON for one record
pub fn record_to_json(record: &NoteRecord) -> Result<String, ExtractorError> {
    Ok(serde_json::to_string_pretty(&RecordView(record))?)
}

/// Pretty JSON for a set of records keyed by note id
pub fn corpus_to_json(notes: &BTreeMap<NoteId, NoteRecord>) -> Result<String, ExtractorError> {
    Ok(serde_json::to_string_pretty(&CorpusView(notes))?)
}

/// Write the JSON export to `path`, creating parent directories
///
/// Returns the number of bytes written.
pub fn write_json(path: &Path, notes: &BTreeMap<NoteId, NoteRecord>) -> Result<u64, ExtractorError> {
    let json = corpus_to_json(notes)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &json)?;

    Ok(json.len() as u64)
}
