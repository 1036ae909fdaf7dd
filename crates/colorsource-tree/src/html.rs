//! HTML serialization of node trees.
//!
//! Trees are converted into an `RcDom` and written with `html5ever`'s serializer, which takes
//! care of escaping and of void elements (`br`, `img`, `hr`, ...).

use crate::error::HtmlError;
use crate::node::{ElementNode, Node};
use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use html5ever::{Attribute, LocalName, QualName, ns};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

impl Node {
    /// Serialize this node (and its descendants) as HTML.
    pub fn to_html(&self) -> Result<String, HtmlError> {
        fragment_to_html(std::slice::from_ref(self))
    }
}

impl ElementNode {
    /// Serialize this element (and its descendants) as HTML.
    pub fn to_html(&self) -> Result<String, HtmlError> {
        serialize_handle(&element_handle(self), TraversalScope::IncludeNode)
    }

    /// Serialize only the children, without this element's own tags.
    pub fn inner_html(&self) -> Result<String, HtmlError> {
        fragment_to_html(&self.children)
    }
}

/// Serialize a list of sibling nodes as HTML.
pub fn fragment_to_html(nodes: &[Node]) -> Result<String, HtmlError> {
    let container = create_element("div", Vec::new());
    container
        .children
        .borrow_mut()
        .extend(nodes.iter().map(node_handle));
    serialize_handle(&container, TraversalScope::ChildrenOnly(None))
}

fn serialize_handle(handle: &Handle, scope: TraversalScope) -> Result<String, HtmlError> {
    let opts = SerializeOpts {
        traversal_scope: scope,
        ..Default::default()
    };
    let mut output = Vec::new();
    serialize(&mut output, &SerializableHandle::from(handle.clone()), opts)?;
    Ok(String::from_utf8(output)?)
}

fn node_handle(node: &Node) -> Handle {
    match node {
        Node::Text(text) => create_text(text),
        Node::Element(element) => element_handle(element),
    }
}

fn element_handle(node: &ElementNode) -> Handle {
    // Attributes come out in name order (the map is sorted).
    let attrs = node
        .element
        .attributes
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let handle = create_element(&node.element.name.to_ascii_lowercase(), attrs);
    handle
        .children
        .borrow_mut()
        .extend(node.children.iter().map(node_handle));
    handle
}

fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(markup5ever_rcdom::Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(markup5ever_rcdom::Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorsource_core::Element;

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let node = Node::element(
            Element::new("a")
                .with_attribute("title", "say \"hi\" & bye")
                .with_attribute("class", "sh_url"),
            vec![Node::text("x < y && \"z\"")],
        );
        assert_eq!(
            node.to_html().unwrap(),
            "<a class=\"sh_url\" title=\"say &quot;hi&quot; &amp; bye\">x &lt; y &amp;&amp; \"z\"</a>"
        );
    }

    #[test]
    fn test_line_break_is_void() {
        let pre = ElementNode::new(Element::new("pre")).with_children(vec![
            Node::text("a"),
            Node::line_break(),
            Node::text("b"),
        ]);
        assert_eq!(pre.to_html().unwrap(), "<pre>a<br>b</pre>");
        assert_eq!(pre.inner_html().unwrap(), "a<br>b");
    }

    #[test]
    fn test_void_elements_get_no_end_tag() {
        let nodes = vec![
            Node::element(Element::new("img").with_attribute("src", "x.png"), Vec::new()),
            Node::element(Element::new("HR"), Vec::new()),
            Node::text("a"),
            Node::element(Element::new("wbr"), Vec::new()),
            Node::text("b"),
        ];
        assert_eq!(
            fragment_to_html(&nodes).unwrap(),
            "<img src=\"x.png\"><hr>a<wbr>b"
        );
    }

    #[test]
    fn test_text_content_skips_markup() {
        let node = Node::element(
            Element::new("b"),
            vec![
                Node::text("fo"),
                Node::element(Element::span("kw"), vec![Node::text("o")]),
                Node::line_break(),
            ],
        );
        assert_eq!(node.text_content(), "foo");
        let Node::Element(element) = &node else {
            panic!("expected an element");
        };
        assert_eq!(element.text_content(), "foo");
    }
}
