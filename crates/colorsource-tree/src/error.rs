use colorsource_core::NestingError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while writing a tree as HTML.
pub enum HtmlError {
    #[error("HTML serialization failed: {0}")]
    /// The serializer reported a write error.
    Io(#[from] std::io::Error),

    #[error("serialized HTML is not valid UTF-8: {0}")]
    /// The serializer produced invalid UTF-8.
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Internal defects detected while merging tags or rebuilding a tree.
///
/// Valid input never produces these; they exist so a broken sequence fails loudly instead
/// of yielding a malformed tree.
pub enum ReconcileError {
    #[error("highlight tags are not flat start/end pairs (at offset {offset})")]
    /// The highlight sequence is not what the tokenizer produces.
    MalformedHighlight {
        /// Offset of the first offending tag.
        offset: usize,
    },

    #[error("merged tags are not properly nested: {0}")]
    /// The merged sequence failed the nesting check.
    Nesting(#[from] NestingError),

    #[error("end tag at offset {offset} has no open element")]
    /// An end tag would move above the root.
    DanglingEndTag {
        /// Offset of the end tag.
        offset: usize,
    },

    #[error("element <{name}> was never closed")]
    /// Tags ran out while an element was still open.
    UnclosedElement {
        /// Name of the innermost open element.
        name: String,
    },

    #[error("tag offset {offset} is outside the text (length {len}) or not on a char boundary")]
    /// A tag points past the text or into the middle of a character.
    TagOutOfBounds {
        /// The offending offset.
        offset: usize,
        /// Text length in bytes.
        len: usize,
    },
}
