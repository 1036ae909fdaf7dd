use crate::Error;
use colorsource_core::LineBreak;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Options for [`highlight_element`](crate::highlight_element) and
/// [`highlight_source`](crate::highlight_source).
///
/// ```yaml
/// class_prefix: "light-"
/// clone_input: true
/// line_break: crlf
/// ```
pub struct HighlightOptions {
    /// Prepended to every emitted class name, including `sh_sourceCode`.
    pub class_prefix: String,
    /// Highlight a copy and leave the input element untouched.
    pub clone_input: bool,
    /// Text substituted for line-break elements before tokenizing.
    pub line_break: LineBreak,
}

impl HighlightOptions {
    /// Parse options from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Builder-style class prefix setter.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Builder-style copy/in-place setter.
    pub fn with_clone_input(mut self, clone_input: bool) -> Self {
        self.clone_input = clone_input;
        self
    }
}
