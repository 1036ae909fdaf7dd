#![warn(missing_docs)]
//! Tree reconciliation for `colorsource`.
//!
//! A highlighted element keeps its existing markup. The reconciler flattens the element's
//! children into text plus structural tags ([`extract`]), interleaves those with the tokenizer's
//! highlight tags ([`merge`]), and grows a new child list from the result ([`rebuild`]).
//! Highlight runs that would straddle existing markup are split, never the other way round.

mod error;
mod extract;
mod html;
mod merge;
mod node;
mod rebuild;

pub use error::{HtmlError, ReconcileError};
pub use extract::{ExtractOptions, Extracted, extract};
pub use html::fragment_to_html;
pub use merge::merge;
pub use node::{ElementNode, Node};
pub use rebuild::rebuild;

use colorsource_core::Tag;

/// Merge `highlight` into `extracted` and rebuild the resulting child list.
pub fn reconcile(extracted: Extracted, highlight: &[Tag]) -> Result<Vec<Node>, ReconcileError> {
    let merged = merge(&extracted.tags, highlight)?;
    rebuild(merged, &extracted.text)
}
