//! Markup statistics over raw note bodies

use marginalia_domain::{NoteRecord, BODY_FIELD};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::warn;

static TAG_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"<[^>]+>"));
static TAG_NAME_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^</?(\w[\w-]*)"));

/// How much of the raw bodies is markup, and which tags dominate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupStats {
    /// Notes with a non-empty body
    pub notes_analyzed: usize,

    /// Characters across all bodies
    pub content_chars: usize,

    /// Characters inside tags across all bodies
    pub markup_chars: usize,

    /// Occurrences per tag name
    pub tag_counts: BTreeMap<String, usize>,
}

impl MarkupStats {
    /// Analyze the bodies of the given records
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NoteRecord>,
    {
        let mut stats = Self::default();
        for record in records {
            let Some(body) = record.get(BODY_FIELD) else {
                continue;
            };
            let mut analyzed = false;
            for text in body.values().into_iter().filter(|text| !text.is_empty()) {
                stats.add_body(text);
                analyzed = true;
            }
            if analyzed {
                stats.notes_analyzed += 1;
            }
        }
        stats
    }

    fn add_body(&mut self, body: &str) {
        self.content_chars += body.chars().count();

        let (tag_re, name_re) = match (&*TAG_RE, &*TAG_NAME_RE) {
            (Ok(tag_re), Ok(name_re)) => (tag_re, name_re),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Tag pattern failed to compile, markup not counted: {}", e);
                return;
            }
        };

        for tag in tag_re.find_iter(body) {
            let tag = tag.as_str();
            self.markup_chars += tag.chars().count();
            if let Some(name) = name_re.captures(tag).and_then(|c| c.get(1)) {
                *self
                    .tag_counts
                    .entry(name.as_str().to_ascii_lowercase())
                    .or_insert(0) += 1;
            }
        }
    }

    /// Share of body characters spent on markup, in percent
    pub fn overhead_percent(&self) -> Option<f64> {
        if self.content_chars == 0 {
            return None;
        }
        Some(self.markup_chars as f64 / self.content_chars as f64 * 100.0)
    }

    /// The `n` most common tags, by count then name
    pub fn top_tags(&self, n: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .tag_counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_with_body(body: &str) -> NoteRecord {
        let mut record = NoteRecord::new();
        record.record("title", "T");
        record.record(BODY_FIELD, body);
        record
    }

    #[test]
    fn test_tag_patterns_compile() {
        assert!(TAG_RE.is_ok());
        assert!(TAG_NAME_RE.is_ok());
    }

    #[test]
    fn test_counts_tags_and_markup() {
        let records = vec![
            note_with_body("<en-note><div>ab</div><div><br/></div></en-note>"),
            note_with_body("<div>c</div>"),
        ];

        let stats = MarkupStats::from_records(&records);
        assert_eq!(stats.notes_analyzed, 2);
        assert_eq!(stats.tag_counts["div"], 6);
        assert_eq!(stats.tag_counts["en-note"], 2);
        assert_eq!(stats.tag_counts["br"], 1);

        let body_chars = records
            .iter()
            .map(|r| r.get(BODY_FIELD).unwrap().first().unwrap().len())
            .sum::<usize>();
        assert_eq!(stats.content_chars, body_chars);
        assert_eq!(stats.markup_chars, body_chars - 3);
    }

    #[test]
    fn test_preamble_is_markup_without_a_name() {
        let stats = MarkupStats::from_records(&[note_with_body("<?xml version=\"1.0\"?>x")]);
        assert!(stats.tag_counts.is_empty());
        assert_eq!(stats.markup_chars, 21);
    }

    #[test]
    fn test_notes_without_body_are_ignored() {
        let mut no_body = NoteRecord::new();
        no_body.record("title", "T");

        let stats = MarkupStats::from_records(&[no_body, note_with_body("")]);
        assert_eq!(stats.notes_analyzed, 0);
        assert_eq!(stats.overhead_percent(), None);
    }

    #[test]
    fn test_overhead_percent() {
        let stats = MarkupStats::from_records(&[note_with_body("<b>xx</b>")]);
        // 7 of 9 characters are tags
        let overhead = stats.overhead_percent().unwrap();
        assert!((overhead - 77.777).abs() < 0.01);
    }

    #[test]
    fn test_top_tags_ordering() {
        let stats = MarkupStats::from_records(&[note_with_body("<p></p><b></b><b></b><a></a><a></a>")]);
        let top = stats.top_tags(2);
        assert_eq!(top, vec![("a", 4), ("b", 4)]);
    }
}
