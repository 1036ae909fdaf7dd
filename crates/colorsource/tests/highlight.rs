use colorsource::{
    Element, ElementNode, Error, GrammarRegistry, GrammarTable, HighlightOptions, LoadError, Node,
    highlight_element, highlight_source, highlight_text,
};
use pretty_assertions::assert_eq;
use std::borrow::Cow;

fn pre(children: Vec<Node>) -> ElementNode {
    ElementNode::new(Element::new("pre")).with_children(children)
}

#[test]
fn test_email_link_gets_mailto_destination() {
    let registry = GrammarRegistry::new();
    let mut element = pre(vec![Node::text("mail <user@example.com> now")]);
    let out = highlight_source(&mut element, "url", &registry, &HighlightOptions::default()).unwrap();
    assert_eq!(
        out.to_html().unwrap(),
        "<pre class=\"sh_sourceCode\">mail <a class=\"sh_url\" href=\"mailto:user@example.com\">\
         &lt;user@example.com&gt;</a> now</pre>"
    );
}

#[test]
fn test_in_place_highlight_borrows_the_input() {
    let registry = GrammarRegistry::new();
    let mut element = pre(vec![Node::text("-gone\n+here")]);
    let out = highlight_source(&mut element, "diff", &registry, &HighlightOptions::default()).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    drop(out);

    assert_eq!(
        element.inner_html().unwrap(),
        "<span class=\"sh_oldfile\">-gone</span>\n<span class=\"sh_newfile\">+here</span>"
    );
}

#[test]
fn test_clone_input_leaves_the_input_untouched() {
    let registry = GrammarRegistry::new();
    let original = pre(vec![Node::text("-gone")]);
    let mut element = original.clone();
    let options = HighlightOptions::default().with_clone_input(true);

    let out = highlight_source(&mut element, "diff", &registry, &options).unwrap();
    let Cow::Owned(copy) = out else {
        panic!("expected an owned copy");
    };
    assert_eq!(
        copy.to_html().unwrap(),
        "<pre class=\"sh_sourceCode\"><span class=\"sh_oldfile\">-gone</span></pre>"
    );
    assert_eq!(element, original);
}

#[test]
fn test_unknown_language_leaves_element_unchanged() {
    let registry = GrammarRegistry::new();
    let original = pre(vec![Node::text("x")]);
    let mut element = original.clone();

    let err = highlight_source(&mut element, "klingon", &registry, &HighlightOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::UnknownLanguage(ref n)) if n == "klingon"));
    assert_eq!(element, original);
}

#[test]
fn test_class_prefix_applies_to_every_class() {
    let registry = GrammarRegistry::new();
    let mut element = ElementNode::new(Element::new("pre").with_attribute("class", "code"))
        .with_children(vec![Node::text("+x")]);
    let options = HighlightOptions::default().with_class_prefix("light-");

    highlight_source(&mut element, "diff", &registry, &options).unwrap();
    assert_eq!(
        element.to_html().unwrap(),
        "<pre class=\"code light-sh_sourceCode\"><span class=\"light-sh_newfile\">+x</span></pre>"
    );
}

#[test]
fn test_source_code_class_is_not_duplicated() {
    let grammar = GrammarTable::from_yaml_str("states: [[['z', sh_z, -1, true]]]").unwrap();
    let mut element = ElementNode::new(Element::new("pre").with_attribute("class", "SH_SOURCECODE"))
        .with_children(vec![Node::text("abc")]);

    highlight_element(&mut element, &grammar, &HighlightOptions::default()).unwrap();
    assert_eq!(element.element.class(), Some("SH_SOURCECODE"));
}

#[test]
fn test_existing_markup_and_line_breaks_survive() {
    let registry = GrammarRegistry::new();
    let mut element = pre(vec![
        Node::text("int a;"),
        Node::line_break(),
        Node::element(Element::new("b"), vec![Node::text("int")]),
        Node::text(" b;"),
    ]);
    highlight_source(&mut element, "c", &registry, &HighlightOptions::default()).unwrap();
    assert_eq!(
        element.inner_html().unwrap(),
        "<span class=\"sh_type\">int</span> a<span class=\"sh_symbol\">;</span>\n\
         <b><span class=\"sh_type\">int</span></b> b<span class=\"sh_symbol\">;</span>"
    );
}

#[test]
fn test_highlight_text_wraps_in_pre() {
    let grammar = GrammarTable::from_yaml_str("states: [[['[0-9]+', sh_number, -1, true]]]").unwrap();
    let element = highlight_text("x = 42", &grammar, &HighlightOptions::default()).unwrap();
    assert_eq!(
        element.to_html().unwrap(),
        "<pre class=\"sh_sourceCode\">x = <span class=\"sh_number\">42</span></pre>"
    );
}

#[test]
fn test_grammar_defect_is_reported() {
    let grammar = GrammarTable::from_yaml_str("states: [[['a', sh_a, 5, false]]]").unwrap();
    let err = highlight_text("a", &grammar, &HighlightOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Highlight(_)));
}
