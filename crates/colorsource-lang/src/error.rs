use colorsource_core::GrammarError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while resolving a language name to a grammar.
pub enum LoadError {
    #[error("unknown language '{0}'")]
    /// No grammar is known under this name.
    UnknownLanguage(String),

    #[error("failed to read grammar file {path}: {source}")]
    /// A grammar file was found but could not be read.
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    #[error("invalid grammar '{name}': {source}")]
    /// A grammar definition failed to parse or compile.
    Grammar {
        /// Language name being loaded.
        name: String,
        /// The underlying grammar error.
        source: GrammarError,
    },
}
