use std::collections::BTreeMap;

/// Element name used for ordinary style runs.
pub const SPAN: &str = "span";
/// Element name used for link-target style runs.
pub const ANCHOR: &str = "a";
/// Element name that flattens to a newline instead of a start/end pair.
pub const LINE_BREAK: &str = "br";

/// A childless markup element: a name plus attributes.
///
/// Start tags own one `Element` each. Cloning produces an independent value, so two tree
/// fragments never share the same element instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// Element name (e.g. `span`, `b`, `pre`).
    pub name: String,
    /// Attributes, kept sorted by name.
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    /// Create an element without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a `span` carrying a single class.
    pub fn span(class: impl Into<String>) -> Self {
        Self::new(SPAN).with_attribute("class", class)
    }

    /// Create an `a` carrying a single class. Its `href` is filled in once the run closes.
    pub fn anchor(class: impl Into<String>) -> Self {
        Self::new(ANCHOR).with_attribute("class", class)
    }

    /// Create a line-break element.
    pub fn line_break() -> Self {
        Self::new(LINE_BREAK)
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set (or replace) an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `class` attribute, if any.
    pub fn class(&self) -> Option<&str> {
        self.attribute("class")
    }

    /// The `href` attribute, if any.
    pub fn href(&self) -> Option<&str> {
        self.attribute("href")
    }

    /// Iterate the whitespace-separated class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class().unwrap_or_default().split_whitespace()
    }

    /// Append a class name unless an equal one (ignoring ASCII case) is already present.
    pub fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.classes().any(|c| c.eq_ignore_ascii_case(class)) {
            return;
        }
        let mut classes: Vec<&str> = self.classes().collect();
        classes.push(class);
        let joined = classes.join(" ");
        self.set_attribute("class", joined);
    }

    /// Whether this element stands for a line break.
    pub fn is_line_break(&self) -> bool {
        self.name.eq_ignore_ascii_case(LINE_BREAK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_class_appends_and_deduplicates() {
        let mut pre = Element::new("pre").with_attribute("class", "  code  listing ");
        pre.add_class("sh_sourceCode");
        pre.add_class("SH_SOURCECODE");
        pre.add_class("");
        assert_eq!(pre.class(), Some("code listing sh_sourceCode"));
    }

    #[test]
    fn test_line_break_is_case_insensitive() {
        assert!(Element::new("BR").is_line_break());
        assert!(Element::line_break().is_line_break());
        assert!(!Element::span("sh_keyword").is_line_break());
    }
}
