//! Export command implementation.

use crate::cli::ExportArgs;
use crate::commands::load_corpus;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;
use marginalia_domain::NoteId;
use std::path::Path;

const SAMPLE_IDS: usize = 3;

/// Execute the export command.
pub fn execute_export(args: ExportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (corpus, _) = load_corpus(config)?;
    let path = Path::new(&args.output);
    let bytes = corpus.export_json(path)?;

    if formatter.format() == OutputFormat::Quiet {
        println!("{}", path.display());
        return Ok(());
    }

    println!(
        "{}",
        formatter.success(&format!(
            "Exported {} note(s) to {} ({:.1} KB)",
            corpus.len(),
            path.display(),
            bytes as f64 / 1024.0
        ))
    );

    let sample: Vec<String> = corpus
        .notes()
        .keys()
        .take(SAMPLE_IDS)
        .map(NoteId::to_string)
        .collect();
    if !sample.is_empty() {
        println!("{}", formatter.info(&format!("Sample ids: {}", sample.join(", "))));
    }

    Ok(())
}
