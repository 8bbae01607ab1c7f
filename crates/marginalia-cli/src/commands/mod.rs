//! Command implementations.

pub mod analyze;
pub mod config;
pub mod export;
pub mod load;
pub mod show;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::export::execute_export;
pub use self::load::execute_load;
pub use self::show::execute_show;

use crate::config::Config;
use crate::error::Result;
use marginalia_extractor::{Corpus, LoadSummary};

/// Load the configured archive.
pub fn load_corpus(config: &Config) -> Result<(Corpus, LoadSummary)> {
    let mut corpus = Corpus::new(config.corpus.clone());
    let summary = corpus.load()?;
    Ok((corpus, summary))
}
