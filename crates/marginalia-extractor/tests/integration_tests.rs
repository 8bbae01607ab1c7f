//! Integration tests for marginalia-extractor
//!
//! These tests drive the public API end to end: configuration file, archive
//! loading, normalization and JSON export.

use marginalia_domain::{ChildField, NoteId, NoteNode};
use marginalia_extractor::{extract_note, normalize, Corpus, CorpusConfig, Normalizer};
use std::fs;

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE en-export SYSTEM "http://xml.evernote.com/pub/evernote-export3.dtd">
<en-export export-date="20240315T101500Z" application="Evernote" version="10.80">
  <note>
    <title>Reading list</title>
    <created>20240301T080000Z</created>
    <tag>books</tag>
    <tag>2024</tag>
    <content><![CDATA[<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">
<en-note><h1>Spring</h1><div><ol><li><i>Middlemarch</i></li><li>Dune &amp; sequels</li></ol></div><p>See <a href="https://example.com/list">the list</a>.</p></en-note>]]></content>
    <note-attributes><source>desktop.mac</source></note-attributes>
  </note>
  <note>
    <title></title>
    <content><![CDATA[<en-note><div>Call back &lt;today&gt;</div><div><br/></div><div>ok</div></en-note>]]></content>
  </note>
</en-export>"#;

#[test]
fn test_normalize_examples() {
    assert_eq!(normalize("<b>bold</b> and <i>ital</i>"), "**bold** and *ital*");
    assert_eq!(normalize("<ul><li>one</li><li>two</li></ul>"), "• one\n• two");
    assert_eq!(normalize("<a href=\"https://x\">click</a>"), "click");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_archive_from_config_file() {
    let archive = tempfile::tempdir().unwrap();
    fs::write(archive.path().join("books.enex"), EXPORT).unwrap();

    let config_path = archive.path().join("marginalia.toml");
    fs::write(
        &config_path,
        format!("archive_path = {:?}\n", archive.path().to_string_lossy()),
    )
    .unwrap();

    let config = CorpusConfig::from_file(&config_path).unwrap();
    let mut corpus = Corpus::new(config);
    let summary = corpus.load().unwrap();
    assert_eq!(summary.notes_loaded, 2);
    assert_eq!(summary.files_scanned, 1);

    let reading = corpus.get(&NoteId::new(0)).unwrap();
    assert_eq!(reading.title(), "Reading list");
    assert_eq!(
        reading.cleaned_text(),
        Some("Spring\n• *Middlemarch*\n• Dune & sequels\n\nSee the list.")
    );
    assert_eq!(
        reading.get("note-attributes").and_then(|v| v.as_scalar()),
        Some("")
    );

    // An empty title element is kept as an empty title
    let call = corpus.get(&NoteId::new(1)).unwrap();
    assert_eq!(call.title(), "");
    assert_eq!(call.cleaned_text(), Some("Call back <today>\n\nok"));

    let json = corpus.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["note_000000"]["tag"], serde_json::json!(["books", "2024"]));
    assert_eq!(value["note_000001"]["title"], "");
}

struct InMemoryNote(Vec<ChildField>);

impl NoteNode for InMemoryNote {
    type Error = std::convert::Infallible;

    fn child_fields(&self) -> Result<Vec<ChildField>, Self::Error> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_note_source() {
    let note = InMemoryNote(vec![
        ChildField::new("title", Some("Standup".to_string())),
        ChildField::new("content", Some("<en-note><b>done</b></en-note>".to_string())),
    ]);

    let record = extract_note(&note, &Normalizer::default()).unwrap();
    assert_eq!(record.cleaned_text(), Some("**done**"));
}
