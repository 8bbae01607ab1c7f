//! Load command implementation.

use crate::commands::load_corpus;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the load command.
pub fn execute_load(config: &Config, formatter: &Formatter) -> Result<()> {
    let (corpus, summary) = load_corpus(config)?;

    if formatter.format() == OutputFormat::Table {
        println!("{}", formatter.load_summary(&summary));
    }
    println!("{}", formatter.format_notes(corpus.notes())?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::CliError;

    #[test]
    fn test_load_archive() {
        let (_dir, config) = fixtures::archive();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert!(execute_load(&config, &formatter).is_ok());
    }

    #[test]
    fn test_load_missing_archive() {
        let (dir, mut config) = fixtures::archive();
        config.corpus.archive_path = dir.path().join("absent").to_string_lossy().into_owned();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_load(&config, &formatter);
        assert!(matches!(result, Err(CliError::Extractor(_))));
    }
}
