use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or compiling a grammar definition.
pub enum GrammarError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    /// JSON parsing failed.
    Json(#[from] serde_json::Error),

    #[error("grammar has no lexical states")]
    /// A grammar needs at least the root state (index 0).
    EmptyGrammar,

    #[error("invalid transition code {code} in state {state}, rule {rule}")]
    /// A negative transition code other than -1/-2/-3.
    InvalidTransition {
        /// The offending code.
        code: i64,
        /// State index of the rule.
        state: usize,
        /// Rule index within the state.
        rule: usize,
    },

    #[error("rule {rule} in state {state} declares more than one transition")]
    /// A mapping-form rule combined `push`, `pop` and/or `pop_all`.
    ConflictingTransitions {
        /// State index of the rule.
        state: usize,
        /// Rule index within the state.
        rule: usize,
    },

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A regex pattern failed to compile.
    RegexCompile {
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}

#[derive(Debug, Error)]
/// Errors produced by the tokenizer at highlight time.
///
/// Both variants point at a defect in the grammar data; plain text that matches no rule
/// is never an error.
pub enum HighlightError {
    #[error("transition into unknown state {state} (grammar has {states} states)")]
    /// A `PUSH` targeted a state index outside the table.
    UnknownState {
        /// The requested state index.
        state: usize,
        /// Number of states in the grammar.
        states: usize,
    },

    #[error("highlighting made no progress on line {line} (zero-width match loop)")]
    /// Zero-width matches kept the tokenizer from advancing.
    NoProgress {
        /// Zero-based physical line number.
        line: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A tag sequence that is not properly nested.
pub enum NestingError {
    #[error("tag at offset {offset} goes backwards (previous offset {previous})")]
    /// Offsets must be non-decreasing.
    OutOfOrder {
        /// Offset of the offending tag.
        offset: usize,
        /// Offset of the tag before it.
        previous: usize,
    },

    #[error("end tag at offset {offset} has no open start tag")]
    /// An end tag closes nothing.
    DanglingEnd {
        /// Offset of the end tag.
        offset: usize,
    },

    #[error("{open} start tag(s) never closed")]
    /// The sequence ends with open start tags.
    Unclosed {
        /// Number of open start tags.
        open: usize,
    },
}
