use crate::element::Element;
use crate::error::NestingError;

/// A start or end boundary at a byte offset of the flat text.
///
/// A start tag owns the element it opens; an end tag closes the innermost open element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Open `element` at `offset`.
    Start {
        /// Byte offset into the flat text.
        offset: usize,
        /// The element grafted into the output tree.
        element: Element,
    },
    /// Close the innermost open element at `offset`.
    End {
        /// Byte offset into the flat text.
        offset: usize,
    },
}

impl Tag {
    /// Create a start tag.
    pub fn start(offset: usize, element: Element) -> Self {
        Self::Start { offset, element }
    }

    /// Create an end tag.
    pub fn end(offset: usize) -> Self {
        Self::End { offset }
    }

    /// Byte offset of this boundary.
    pub fn offset(&self) -> usize {
        match self {
            Self::Start { offset, .. } | Self::End { offset } => *offset,
        }
    }

    /// The element opened by a start tag.
    pub fn element(&self) -> Option<&Element> {
        match self {
            Self::Start { element, .. } => Some(element),
            Self::End { .. } => None,
        }
    }

    /// Returns `true` for start tags.
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start { .. })
    }
}

/// Verify that `tags` is properly nested: offsets never decrease, every end tag closes an
/// open start tag, and nothing is left open.
pub fn check_nesting(tags: &[Tag]) -> Result<(), NestingError> {
    let mut depth = 0usize;
    let mut previous = 0usize;

    for tag in tags {
        let offset = tag.offset();
        if offset < previous {
            return Err(NestingError::OutOfOrder { offset, previous });
        }
        previous = offset;

        match tag {
            Tag::Start { .. } => depth += 1,
            Tag::End { .. } => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(NestingError::DanglingEnd { offset })?;
            }
        }
    }

    if depth > 0 {
        return Err(NestingError::Unclosed { open: depth });
    }
    Ok(())
}
