use colorsource_core::Element;

/// A node of a markup tree: an element with children, or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element and its children.
    Element(ElementNode),
    /// Literal text.
    Text(String),
}

/// An element together with its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// The element itself (name and attributes).
    pub element: Element,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an element node.
    pub fn element(element: Element, children: Vec<Node>) -> Self {
        Self::Element(ElementNode { element, children })
    }

    /// Create a line-break element node.
    pub fn line_break() -> Self {
        Self::element(Element::line_break(), Vec::new())
    }

    /// Concatenated text of this node and its descendants. Line breaks contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(t) => out.push_str(t),
            Self::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

impl ElementNode {
    /// Create an element node without children.
    pub fn new(element: Element) -> Self {
        Self {
            element,
            children: Vec::new(),
        }
    }

    /// Builder-style children setter.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.children.iter().for_each(|c| c.collect_text(&mut out));
        out
    }
}

impl From<ElementNode> for Node {
    fn from(node: ElementNode) -> Self {
        Self::Element(node)
    }
}
