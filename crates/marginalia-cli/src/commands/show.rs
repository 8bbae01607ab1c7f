//! Show command implementation.

use crate::cli::ShowArgs;
use crate::commands::load_corpus;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use marginalia_domain::NoteId;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let id = parse_id(&args.id)?;
    let (corpus, _) = load_corpus(config)?;

    let note = corpus
        .get(&id)
        .ok_or_else(|| CliError::NoteNotFound(id.to_string()))?;
    println!("{}", formatter.format_note(&id, note)?);

    Ok(())
}

fn parse_id(raw: &str) -> Result<NoteId> {
    NoteId::parse(raw)
        .map_err(|e| CliError::InvalidInput(format!("{} (expected e.g. note_000012 or 12)", e)))
}
