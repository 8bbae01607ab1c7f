//! Trait definitions for external interactions
//!
//! These traits define the boundary between record extraction and the
//! archive format. Implementations live in other crates.

/// A direct child element of a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildField {
    /// Tag name of the child element
    pub name: String,

    /// Text content, if the element has any
    pub text: Option<String>,
}

impl ChildField {
    /// Create a child field
    pub fn new(name: impl Into<String>, text: Option<String>) -> Self {
        Self {
            name: name.into(),
            text,
        }
    }
}

/// One note's parsed document subtree
///
/// Implemented by the archive reader (marginalia-extractor)
pub trait NoteNode {
    /// Error type for walking the subtree
    type Error;

    /// Direct child elements of the note, in document order
    fn child_fields(&self) -> Result<Vec<ChildField>, Self::Error>;
}
