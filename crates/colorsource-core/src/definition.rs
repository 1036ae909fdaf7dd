//! Serialized grammar definitions.
//!
//! A definition lists lexical states; each state lists rules. A rule is written either as
//! the compact tuple `[regex, style, transition_code, is_state]` or as a mapping:
//!
//! ```yaml
//! name: braces
//! states:
//!   - - ["\\{", "sh_cbracket", 1, false]
//!   - - { match: "\\}", style: sh_cbracket, pop: true }
//!     - { match: "\\{", style: sh_cbracket, push: 1 }
//! ```

use crate::error::GrammarError;
use crate::grammar::{GrammarTable, LexicalState, PatternRule, RuleKind, StyleSpec, Transition};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
/// Raw grammar definition, as read from YAML or JSON.
pub struct GrammarDefinition {
    #[serde(default)]
    /// Optional language name.
    pub name: Option<String>,
    /// Lexical states; index 0 is the root state.
    pub states: Vec<Vec<RuleDefinition>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// A single rule in either of the supported spellings.
pub enum RuleDefinition {
    /// `[regex, style, transition_code, is_state]`.
    Tuple(String, StyleValue, i64, bool),
    /// `[regex, style, transition_code]`; the rule is an environment.
    ShortTuple(String, StyleValue, i64),
    /// `{ match, style, push | pop | pop_all, state }`.
    Mapping(RuleMapping),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// A style name, or one optional style name per capture group.
pub enum StyleValue {
    /// One style for the whole match.
    Single(String),
    /// One entry per capture group; `null` leaves the group unstyled.
    PerGroup(Vec<Option<String>>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// Mapping spelling of a rule.
pub struct RuleMapping {
    #[serde(rename = "match")]
    /// Regex source.
    pub regex: String,
    /// Style(s) for the match.
    pub style: StyleValue,
    #[serde(default)]
    /// State index to push.
    pub push: Option<usize>,
    #[serde(default)]
    /// Leave the innermost context.
    pub pop: bool,
    #[serde(default)]
    /// Clear the whole context stack.
    pub pop_all: bool,
    #[serde(default)]
    /// `true` for a plain state, `false` (default) for an environment.
    pub state: bool,
}

impl From<StyleValue> for StyleSpec {
    fn from(value: StyleValue) -> Self {
        match value {
            StyleValue::Single(s) => Self::Single(s),
            StyleValue::PerGroup(v) => Self::PerGroup(v),
        }
    }
}

impl GrammarDefinition {
    /// Parse a YAML definition.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GrammarError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON definition.
    pub fn from_json_str(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile regexes and decode transitions into a [`GrammarTable`].
    pub fn compile(self) -> Result<GrammarTable, GrammarError> {
        let states = self
            .states
            .into_iter()
            .enumerate()
            .map(|(state, rules)| {
                rules
                    .into_iter()
                    .enumerate()
                    .map(|(rule, def)| compile_rule(def, state, rule))
                    .collect::<Result<Vec<_>, _>>()
                    .map(LexicalState::new)
            })
            .collect::<Result<Vec<_>, _>>()?;

        GrammarTable::new(self.name, states)
    }
}

impl GrammarTable {
    /// Parse and compile a YAML grammar definition.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GrammarError> {
        GrammarDefinition::from_yaml_str(yaml)?.compile()
    }

    /// Parse and compile a JSON grammar definition.
    pub fn from_json_str(json: &str) -> Result<Self, GrammarError> {
        GrammarDefinition::from_json_str(json)?.compile()
    }
}

fn compile_rule(
    def: RuleDefinition,
    state: usize,
    rule: usize,
) -> Result<PatternRule, GrammarError> {
    let (regex, style, transition, is_state) = match def {
        RuleDefinition::Tuple(regex, style, code, is_state) => {
            (regex, style, decode(code, state, rule)?, is_state)
        }
        RuleDefinition::ShortTuple(regex, style, code) => {
            (regex, style, decode(code, state, rule)?, false)
        }
        RuleDefinition::Mapping(m) => {
            let transition = match (m.push, m.pop, m.pop_all) {
                (None, false, false) => Transition::Continue,
                (Some(target), false, false) => Transition::Push(target),
                (None, true, false) => Transition::Pop,
                (None, false, true) => Transition::PopAll,
                _ => return Err(GrammarError::ConflictingTransitions { state, rule }),
            };
            (m.regex, m.style, transition, m.state)
        }
    };

    let kind = if is_state {
        RuleKind::State
    } else {
        RuleKind::Environment
    };
    PatternRule::new(&regex, style.into(), transition, kind)
}

fn decode(code: i64, state: usize, rule: usize) -> Result<Transition, GrammarError> {
    Transition::from_code(code).ok_or(GrammarError::InvalidTransition { code, state, rule })
}
