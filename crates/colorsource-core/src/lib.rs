#![warn(missing_docs)]
//! `colorsource-core` - a line-oriented lexical highlighting engine.
//!
//! A [`GrammarTable`] is a list of lexical states, each a prioritized list of regex rules.
//! [`highlight`] walks the text one physical line at a time, keeps a stack of nested
//! contexts (e.g. a string inside a comment), and returns a minimal, flat sequence of
//! [`Tag`]s marking where style runs start and end.
//!
//! The tags are independent of any document tree; `colorsource-tree` merges them with
//! existing markup and rebuilds the nested result.

mod cache;
mod definition;
mod element;
mod engine;
mod error;
mod grammar;
mod line_ending;
mod link;
mod tag;

pub use definition::{GrammarDefinition, RuleDefinition, RuleMapping, StyleValue};
pub use element::{ANCHOR, Element, LINE_BREAK, SPAN};
pub use engine::highlight;
pub use error::{GrammarError, HighlightError, NestingError};
pub use grammar::{
    GrammarTable, LexicalState, Matcher, PatternRule, RuleKind, RuleMatch, StyleSpec, Transition,
};
pub use line_ending::{LineBreak, PhysicalLine, PhysicalLines, physical_lines};
pub use link::{LINK_STYLE, link_destination};
pub use tag::{Tag, check_nesting};
