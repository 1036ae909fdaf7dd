use crate::error::ReconcileError;
use crate::node::{ElementNode, Node};
use colorsource_core::{NestingError, Tag};

/// Rebuild a node list from `text` and a properly nested tag sequence.
///
/// Text between consecutive tag offsets becomes a text node inside the innermost open element;
/// each start tag opens a new element (its element is moved into the tree) and each end tag
/// closes it.
#[tracing::instrument(level = "debug", skip_all, fields(tags = tags.len(), len = text.len()))]
pub fn rebuild(tags: Vec<Tag>, text: &str) -> Result<Vec<Node>, ReconcileError> {
    let mut stack: Vec<ElementNode> = Vec::new();
    let mut root: Vec<Node> = Vec::new();
    let mut pos = 0usize;

    for tag in tags {
        let offset = tag.offset();
        if offset < pos {
            return Err(NestingError::OutOfOrder {
                offset,
                previous: pos,
            }
            .into());
        }
        let chunk = text.get(pos..offset).ok_or(ReconcileError::TagOutOfBounds {
            offset,
            len: text.len(),
        })?;
        push_text(innermost(&mut stack, &mut root), chunk);
        pos = offset;

        match tag {
            Tag::Start { element, .. } => stack.push(ElementNode::new(element)),
            Tag::End { offset } => {
                let closed = stack.pop().ok_or(ReconcileError::DanglingEndTag { offset })?;
                innermost(&mut stack, &mut root).push(closed.into());
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ReconcileError::UnclosedElement {
            name: open.element.name,
        });
    }
    push_text(&mut root, &text[pos..]);
    Ok(root)
}

fn innermost<'a>(stack: &'a mut [ElementNode], root: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(open) => &mut open.children,
        None => root,
    }
}

fn push_text(children: &mut Vec<Node>, chunk: &str) {
    if !chunk.is_empty() {
        children.push(Node::text(chunk));
    }
}
