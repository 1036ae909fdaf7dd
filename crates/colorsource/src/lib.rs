#![warn(missing_docs)]
//! `colorsource`: syntax highlighting for markup trees.
//!
//! An element holding source code (typically a `pre`) is highlighted in four steps: its
//! children are flattened to text plus structural tags, the text is tokenized against a
//! grammar, the two tag sequences are merged, and a new child list is rebuilt. Markup already
//! inside the element (emphasis, links, line breaks) survives.
//!
//! ```no_run
//! use colorsource::{Element, ElementNode, GrammarRegistry, HighlightOptions, Node};
//!
//! let registry = GrammarRegistry::new();
//! let mut pre = ElementNode::new(Element::new("pre"))
//!     .with_children(vec![Node::text("int x = 42;")]);
//! let html = colorsource::highlight_source(&mut pre, "c", &registry, &HighlightOptions::default())?
//!     .to_html()?;
//! println!("{html}");
//! # Ok::<(), colorsource::Error>(())
//! ```

mod error;
mod options;

pub use colorsource_core::{Element, GrammarTable, LineBreak};
pub use colorsource_lang::{GrammarRegistry, GrammarSource, LoadError};
pub use colorsource_tree::{ElementNode, HtmlError, Node, fragment_to_html};
pub use error::Error;
pub use options::HighlightOptions;

use colorsource_core::highlight;
use colorsource_tree::{ExtractOptions, extract, reconcile};
use std::borrow::Cow;

/// Class added to every highlighted element (after the class prefix).
pub const SOURCE_CODE_CLASS: &str = "sh_sourceCode";

/// Highlight `element` in place with `grammar`.
///
/// The element gains the class `prefix + "sh_sourceCode"` and its children are replaced by the
/// highlighted tree. On error the element is left unchanged.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(element = %element.element.name, grammar = grammar.name.as_deref().unwrap_or_default())
)]
pub fn highlight_element(
    element: &mut ElementNode,
    grammar: &GrammarTable,
    options: &HighlightOptions,
) -> Result<(), Error> {
    let extracted = extract(
        &element.children,
        &ExtractOptions {
            line_break: options.line_break,
        },
    );
    let tags = highlight(&extracted.text, grammar, &options.class_prefix)?;
    let children = reconcile(extracted, &tags)?;

    element
        .element
        .add_class(&format!("{}{SOURCE_CODE_CLASS}", options.class_prefix));
    element.children = children;
    Ok(())
}

/// Resolve `language` through `source` and highlight `element` with it.
///
/// The grammar is resolved before anything is touched, so an unknown language leaves no
/// partial output. With [`HighlightOptions::clone_input`] a highlighted copy is returned and
/// `element` stays as it was; otherwise `element` is highlighted in place and handed back.
pub fn highlight_source<'a, S>(
    element: &'a mut ElementNode,
    language: &str,
    source: &S,
    options: &HighlightOptions,
) -> Result<Cow<'a, ElementNode>, Error>
where
    S: GrammarSource + ?Sized,
{
    let grammar = source.load(language)?;
    if options.clone_input {
        let mut copy = element.clone();
        highlight_element(&mut copy, &grammar, options)?;
        Ok(Cow::Owned(copy))
    } else {
        highlight_element(element, &grammar, options)?;
        Ok(Cow::Borrowed(element))
    }
}

/// Highlight plain `text` into a new `pre` element.
pub fn highlight_text(
    text: &str,
    grammar: &GrammarTable,
    options: &HighlightOptions,
) -> Result<ElementNode, Error> {
    let mut pre = ElementNode::new(Element::new("pre")).with_children(vec![Node::text(text)]);
    highlight_element(&mut pre, grammar, options)?;
    Ok(pre)
}
