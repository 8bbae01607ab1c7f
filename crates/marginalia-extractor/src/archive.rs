//! ENEX archive access: file discovery and the XML note adapter

use crate::error::ExtractorError;
use marginalia_domain::{ChildField, NoteNode};
use roxmltree::{Document, Node, ParsingOptions};
use std::path::{Path, PathBuf};
use tracing::warn;

const NOTE_ELEMENT: &str = "note";

/// Find export files with the given extension directly inside `dir`
///
/// Results are sorted by path so loading order is stable across platforms.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, ExtractorError> {
    let dir_str = dir.to_str().ok_or_else(|| {
        ExtractorError::Pattern(format!("archive path is not valid UTF-8: {}", dir.display()))
    })?;

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(dir_str),
        glob::Pattern::escape(extension)
    );

    let entries = glob::glob(&pattern).map_err(|e| ExtractorError::Pattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable archive entry: {}", e),
        }
    }

    files.sort();
    Ok(files)
}

/// Parse one export file
///
/// DTDs are allowed because every ENEX file starts with a doctype.
pub fn parse_document<'input>(
    path: &Path,
    text: &'input str,
) -> Result<Document<'input>, ExtractorError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    Document::parse_with_options(text, options).map_err(|e| ExtractorError::MalformedDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// `<note>` children of the document root, in document order
pub fn note_nodes<'a, 'input>(doc: &'a Document<'input>) -> Vec<EnexNote<'a, 'input>> {
    doc.root_element()
        .children()
        .filter(|node| node.is_element() && node.has_tag_name(NOTE_ELEMENT))
        .map(EnexNote::new)
        .collect()
}

/// One `<note>` element of a parsed export file
#[derive(Debug, Clone, Copy)]
pub struct EnexNote<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> EnexNote<'a, 'input> {
    /// Wrap a parsed node
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }
}

impl NoteNode for EnexNote<'_, '_> {
    type Error = ExtractorError;

    fn child_fields(&self) -> Result<Vec<ChildField>, Self::Error> {
        if !self.node.is_element() {
            return Err(ExtractorError::MalformedNote(format!(
                "expected an element at byte {}, found {:?}",
                self.node.range().start,
                self.node.node_type()
            )));
        }

        Ok(self
            .node
            .children()
            .filter(Node::is_element)
            .map(|child| ChildField::new(child.tag_name().name(), child.text().map(str::to_string)))
            .collect())
    }
}
