use colorsource_core::HighlightError;
use colorsource_lang::LoadError;
use colorsource_tree::{HtmlError, ReconcileError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Any failure of a highlighting call.
pub enum Error {
    #[error(transparent)]
    /// The language could not be resolved (unknown name, unreadable or invalid grammar).
    Load(#[from] LoadError),

    #[error(transparent)]
    /// The grammar is defective.
    Highlight(#[from] HighlightError),

    #[error(transparent)]
    /// Merging with the existing markup failed.
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    /// Writing the result as HTML failed.
    Html(#[from] HtmlError),

    #[error("invalid options: {0}")]
    /// Options could not be parsed.
    Config(#[from] serde_yaml::Error),
}
