//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Marginalia CLI - Extract and clean notes from an offline export archive.
#[derive(Debug, Parser)]
#[command(name = "marginalia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MARGINALIA_CONFIG")]
    pub config: Option<String>,

    /// Archive directory (overrides the configured one)
    #[arg(short, long, global = true, env = "MARGINALIA_ARCHIVE")]
    pub archive: Option<String>,

    /// Stop after this many notes
    #[arg(short = 'n', long, global = true)]
    pub max_notes: Option<usize>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the archive and list its notes
    Load,

    /// Show one note with its cleaned text
    Show(ShowArgs),

    /// Export every note to JSON
    Export(ExportArgs),

    /// Report markup statistics over the archive
    Analyze(AnalyzeArgs),

    /// Inspect or write the configuration file
    Config(ConfigArgs),
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Note id (e.g. note_000012 or 12)
    pub id: String,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Output file
    #[arg(short, long, default_value = "notes_export.json")]
    pub output: String,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Number of tag names to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with the effective settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
