use crate::node::Node;
use colorsource_core::{LineBreak, Tag};

/// Options for [`extract`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Text written in place of each line-break element.
    pub line_break: LineBreak,
}

/// Flat text plus structural tags, as produced by [`extract`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Text of the tree in document order.
    pub text: String,
    /// One start/end pair per element (line breaks excepted), at byte offsets into `text`.
    pub tags: Vec<Tag>,
}

/// Flatten `nodes` into text and structural tags.
///
/// Each element becomes a start tag carrying a childless copy of it and a matching end tag.
/// Line-break elements become newline text instead.
pub fn extract(nodes: &[Node], options: &ExtractOptions) -> Extracted {
    let mut out = Extracted::default();
    extract_into(nodes, options.line_break.as_str(), &mut out);
    out
}

fn extract_into(nodes: &[Node], newline: &str, out: &mut Extracted) {
    for node in nodes {
        match node {
            Node::Text(text) => out.text.push_str(text),
            Node::Element(e) if e.element.is_line_break() => out.text.push_str(newline),
            Node::Element(e) => {
                out.tags.push(Tag::start(out.text.len(), e.element.clone()));
                extract_into(&e.children, newline, out);
                out.tags.push(Tag::end(out.text.len()));
            }
        }
    }
}
