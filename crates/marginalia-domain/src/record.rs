//! Note record module - the open field mapping produced for one note

/// Field that every extracted record carries
pub const TITLE_FIELD: &str = "title";

/// Field holding the raw markup body of a note
pub const BODY_FIELD: &str = "content";

/// Derived field holding the plain-text rendering of the body
pub const CLEANED_TEXT_FIELD: &str = "cleaned_text";

/// Title used when a note has no title element
pub const UNTITLED: &str = "Untitled";

/// Value of a single record field
///
/// A field seen once is a scalar. A field seen more than once holds every
/// occurrence in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Single occurrence
    Scalar(String),

    /// Repeated occurrences, in source order
    Sequence(Vec<String>),
}

impl FieldValue {
    /// Get the value if it is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::Sequence(_) => None,
        }
    }

    /// First occurrence of the field
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            FieldValue::Sequence(values) => values.first().map(String::as_str),
        }
    }

    /// All occurrences, in source order
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Scalar(value) => vec![value.as_str()],
            FieldValue::Sequence(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Scalar(_) => 1,
            FieldValue::Sequence(values) => values.len(),
        }
    }

    /// Whether this is a sequence with no occurrences
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the field was repeated
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldValue::Sequence(_))
    }

    /// Append another occurrence, promoting a scalar to a sequence
    fn push(&mut self, value: String) {
        match self {
            FieldValue::Scalar(existing) => {
                let first = std::mem::take(existing);
                *self = FieldValue::Sequence(vec![first, value]);
            }
            FieldValue::Sequence(values) => values.push(value),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Sequence(values)
    }
}

/// Open mapping from field name to value for one note
///
/// Fields keep the order of their first appearance. Records are small
/// (a dozen or so fields), so lookups scan the entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRecord {
    fields: Vec<(String, FieldValue)>,
}

impl NoteRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a field
    ///
    /// The first occurrence is stored as a scalar. Any later occurrence turns
    /// the field into a sequence and appends; nothing is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use marginalia_domain::{FieldValue, NoteRecord};
    ///
    /// let mut record = NoteRecord::new();
    /// record.record("tag", "a");
    /// record.record("tag", "b");
    ///
    /// assert_eq!(
    ///     record.get("tag"),
    ///     Some(&FieldValue::Sequence(vec!["a".to_string(), "b".to_string()]))
    /// );
    /// ```
    pub fn record(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(idx) => self.fields[idx].1.push(value),
            None => self.fields.push((name, FieldValue::Scalar(value))),
        }
    }

    /// Set a field, replacing any existing value in place
    ///
    /// Used for derived fields; extraction goes through [`NoteRecord::record`].
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(idx) => self.fields[idx].1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Insert a field only if it is absent. Returns true if inserted.
    pub fn set_default(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        if self.contains(name) {
            return false;
        }
        self.fields.push((name.to_string(), value.into()));
        true
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.position(name).map(|idx| &self.fields[idx].1)
    }

    /// Whether the record has a field
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Note title, falling back to the untitled sentinel
    pub fn title(&self) -> &str {
        self.get(TITLE_FIELD)
            .and_then(FieldValue::first)
            .unwrap_or(UNTITLED)
    }

    /// Plain-text rendering of the body, if it has been attached
    pub fn cleaned_text(&self) -> Option<&str> {
        self.get(CLEANED_TEXT_FIELD).and_then(FieldValue::first)
    }

    /// Iterate fields in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in first-appearance order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_occurrence_is_scalar() {
        let mut record = NoteRecord::new();
        record.record("created", "20240101T000000Z");

        assert_eq!(
            record.get("created"),
            Some(&FieldValue::Scalar("20240101T000000Z".to_string()))
        );
    }

    #[test]
    fn test_collision_keeps_every_value_in_order() {
        let mut record = NoteRecord::new();
        record.record("tag", "a");
        record.record("tag", "b");
        record.record("tag", "c");

        let tags = record.get("tag").unwrap();
        assert!(tags.is_sequence());
        assert_eq!(tags.values(), vec!["a", "b", "c"]);
        assert_eq!(tags.first(), Some("a"));
    }

    #[test]
    fn test_field_order_is_first_appearance() {
        let mut record = NoteRecord::new();
        record.record("title", "T");
        record.record("tag", "x");
        record.record("content", "<en-note/>");
        record.record("tag", "y");

        assert_eq!(record.field_names(), vec!["title", "tag", "content"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = NoteRecord::new();
        record.record("title", "T");
        record.set(CLEANED_TEXT_FIELD, "first");
        record.record("updated", "u");
        record.set(CLEANED_TEXT_FIELD, "second");

        assert_eq!(record.cleaned_text(), Some("second"));
        assert_eq!(record.field_names(), vec!["title", "cleaned_text", "updated"]);
    }

    #[test]
    fn test_set_default_does_not_overwrite() {
        let mut record = NoteRecord::new();
        record.record(TITLE_FIELD, "");

        assert!(!record.set_default(TITLE_FIELD, UNTITLED));
        assert_eq!(record.get(TITLE_FIELD).and_then(FieldValue::as_scalar), Some(""));
    }

    #[test]
    fn test_title_falls_back_to_untitled() {
        let record = NoteRecord::new();
        assert_eq!(record.title(), UNTITLED);
        assert!(record.cleaned_text().is_none());
    }

    #[test]
    fn test_title_uses_first_of_repeated() {
        let mut record = NoteRecord::new();
        record.record(TITLE_FIELD, "One");
        record.record(TITLE_FIELD, "Two");
        assert_eq!(record.title(), "One");
    }

    #[test]
    fn test_empty_sequence() {
        let value = FieldValue::from(Vec::<String>::new());
        assert!(value.is_empty());
        assert_eq!(value.first(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: recording N values under one name keeps all N, in order
        #[test]
        fn test_repeated_field_keeps_all_values(values in proptest::collection::vec("[a-z]{0,8}", 1..16)) {
            let mut record = NoteRecord::new();
            for value in &values {
                record.record("tag", value.clone());
            }

            let stored = record.get("tag").unwrap();
            prop_assert_eq!(stored.len(), values.len());
            let expected: Vec<&str> = values.iter().map(String::as_str).collect();
            prop_assert_eq!(stored.values(), expected);
            prop_assert_eq!(record.len(), 1);
        }
    }
}
