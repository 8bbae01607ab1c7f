//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::load_corpus;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.top == 0 {
        return Err(CliError::InvalidInput("--top must be at least 1".to_string()));
    }

    let (corpus, _) = load_corpus(config)?;
    let stats = corpus.markup_stats();
    println!("{}", formatter.format_stats(&stats, args.top)?);

    Ok(())
}
