//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use marginalia_domain::{FieldValue, NoteId, NoteRecord, BODY_FIELD, CLEANED_TEXT_FIELD};
use marginalia_extractor::{corpus_to_json, record_to_json, LoadSummary, MarkupStats};
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const CELL_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a listing of notes.
    pub fn format_notes(&self, notes: &BTreeMap<NoteId, NoteRecord>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(corpus_to_json(notes)?),
            OutputFormat::Table => Ok(self.format_notes_table(notes)),
            OutputFormat::Quiet => Ok(notes.keys().map(NoteId::to_string).collect::<Vec<_>>().join("\n")),
        }
    }

    fn format_notes_table(&self, notes: &BTreeMap<NoteId, NoteRecord>) -> String {
        if notes.is_empty() {
            return self.colorize("No notes found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Tags", "Characters"]);

        for (id, note) in notes {
            let tags = note.get("tag").map(FieldValue::len).unwrap_or(0);
            let chars = note.cleaned_text().map(|t| t.chars().count()).unwrap_or(0);
            builder.push_record([
                id.to_string(),
                truncate(note.title()),
                tags.to_string(),
                chars.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a single note with its fields and cleaned text.
    pub fn format_note(&self, id: &NoteId, note: &NoteRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(record_to_json(note)?),
            OutputFormat::Quiet => Ok(note.cleaned_text().unwrap_or_default().to_string()),
            OutputFormat::Table => Ok(self.format_note_table(id, note)),
        }
    }

    fn format_note_table(&self, id: &NoteId, note: &NoteRecord) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (name, value) in note.iter() {
            if name == BODY_FIELD || name == CLEANED_TEXT_FIELD {
                continue;
            }
            builder.push_record([name.to_string(), truncate(&value.values().join(", "))]);
        }

        let raw_len = note
            .get(BODY_FIELD)
            .map(|body| body.values().iter().map(|v| v.chars().count()).sum::<usize>())
            .unwrap_or(0);
        let cleaned = note.cleaned_text().unwrap_or_default();
        let cleaned_len = cleaned.chars().count();
        builder.push_record(["raw length".to_string(), raw_len.to_string()]);
        builder.push_record(["cleaned length".to_string(), cleaned_len.to_string()]);
        builder.push_record([
            "size reduction".to_string(),
            reduction_percent(raw_len, cleaned_len)
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string()),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}\n\n{}",
            self.colorize(&id.to_string(), "cyan"),
            table,
            cleaned
        )
    }

    /// Format markup statistics.
    pub fn format_stats(&self, stats: &MarkupStats, top: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let top_tags: Vec<serde_json::Value> = stats
                    .top_tags(top)
                    .into_iter()
                    .map(|(name, count)| serde_json::json!({ "tag": name, "count": count }))
                    .collect();
                let value = serde_json::json!({
                    "notes_analyzed": stats.notes_analyzed,
                    "content_chars": stats.content_chars,
                    "markup_chars": stats.markup_chars,
                    "overhead_percent": stats.overhead_percent(),
                    "top_tags": top_tags,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(stats
                .overhead_percent()
                .map(|p| format!("{:.1}", p))
                .unwrap_or_default()),
            OutputFormat::Table => Ok(self.format_stats_table(stats, top)),
        }
    }

    fn format_stats_table(&self, stats: &MarkupStats, top: usize) -> String {
        if stats.notes_analyzed == 0 {
            return self.colorize("No note bodies to analyze.", "yellow");
        }

        let overhead = stats
            .overhead_percent()
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "-".to_string());

        let mut summary = Builder::default();
        summary.push_record(["Metric", "Value"]);
        summary.push_record(["Notes analyzed".to_string(), stats.notes_analyzed.to_string()]);
        summary.push_record(["Content characters".to_string(), stats.content_chars.to_string()]);
        summary.push_record(["Markup characters".to_string(), stats.markup_chars.to_string()]);
        summary.push_record(["Markup overhead".to_string(), overhead]);

        let mut tags = Builder::default();
        tags.push_record(["Tag", "Count"]);
        for (name, count) in stats.top_tags(top) {
            tags.push_record([name.to_string(), count.to_string()]);
        }

        let mut summary = summary.build();
        summary
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        let mut tags = tags.build();
        tags.with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", summary, tags)
    }

    /// Format a load summary line.
    pub fn load_summary(&self, summary: &LoadSummary) -> String {
        let mut msg = format!(
            "Loaded {} note(s) from {} file(s)",
            summary.notes_loaded, summary.files_scanned
        );
        if summary.notes_skipped > 0 || summary.files_skipped > 0 {
            msg.push_str(&format!(
                " ({} note(s), {} file(s) skipped)",
                summary.notes_skipped, summary.files_skipped
            ));
        }
        if summary.truncated {
            msg.push_str(" [note limit reached]");
        }
        self.success(&msg)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Percentage by which the cleaned text is shorter than the raw body.
pub fn reduction_percent(raw_len: usize, cleaned_len: usize) -> Option<f64> {
    if raw_len == 0 {
        return None;
    }
    Some((1.0 - cleaned_len as f64 / raw_len as f64) * 100.0)
}

/// First line of `text`, cut to the table cell width.
fn truncate(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() <= CELL_WIDTH && line.len() == text.len() {
        return line.to_string();
    }
    let cut: String = line.chars().take(CELL_WIDTH).collect();
    format!("{}…", cut)
}
