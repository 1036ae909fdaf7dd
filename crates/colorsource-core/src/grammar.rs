use crate::error::GrammarError;
use onig::{Region, SearchOptions};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// An immutable grammar table: an ordered list of lexical states.
///
/// State 0 is the root state, active whenever the context stack is empty.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    /// Optional language name, for diagnostics.
    pub name: Option<String>,
    states: Vec<LexicalState>,
}

/// One lexical state: an ordered list of pattern rules. Declaration order is priority.
#[derive(Debug, Clone, Default)]
pub struct LexicalState {
    /// Rules in priority order.
    pub rules: Vec<PatternRule>,
}

/// A regex-driven rule inside a lexical state.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Matcher searched from the current position of the line.
    pub matcher: Matcher,
    /// Style(s) applied to the matched text.
    pub style: StyleSpec,
    /// Stack operation applied after a match.
    pub transition: Transition,
    /// Whether a context pushed by this rule lends its style to untagged inner text.
    pub kind: RuleKind,
}

/// What style a rule applies to its match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSpec {
    /// The whole match gets one style.
    Single(String),
    /// Capture group `i + 1` gets style `i`; `None` leaves that group unstyled.
    PerGroup(Vec<Option<String>>),
}

impl StyleSpec {
    /// The style an environment lends to its untagged content.
    pub fn inherited(&self) -> Option<&str> {
        match self {
            Self::Single(style) => Some(style.as_str()),
            Self::PerGroup(_) => None,
        }
    }
}

/// Stack operation applied after a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stay in the current state (code `-1`).
    Continue,
    /// Leave the innermost context (code `-2`).
    Pop,
    /// Clear the whole context stack (code `-3`).
    PopAll,
    /// Enter the given state, remembering this rule (code `n >= 0`).
    Push(usize),
}

impl Transition {
    /// Decode a numeric transition code.
    ///
    /// Returns `None` for negative codes other than -1, -2 and -3.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Continue),
            -2 => Some(Self::Pop),
            -3 => Some(Self::PopAll),
            n if n >= 0 => usize::try_from(n).ok().map(Self::Push),
            _ => None,
        }
    }
}

/// Distinguishes plain states from environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleKind {
    /// Untagged text inside the pushed context stays unstyled.
    State,
    /// Untagged text inside the pushed context inherits the rule's style.
    #[default]
    Environment,
}

/// A compiled regex that can be searched from an arbitrary offset of a line.
#[derive(Clone)]
pub struct Matcher {
    source: String,
    regex: Arc<onig::Regex>,
}

/// A successful search: the whole match plus capture group ranges (byte offsets in the line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Range of the whole match.
    pub range: Range<usize>,
    /// Range of capture group `i + 1`, or `None` if it did not participate.
    pub groups: Vec<Option<Range<usize>>>,
}

impl RuleMatch {
    /// Start of the whole match.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// End of the whole match.
    pub fn end(&self) -> usize {
        self.range.end
    }
}

impl Matcher {
    /// Compile a regex source.
    pub fn new(source: &str) -> Result<Self, GrammarError> {
        let regex = onig::Regex::new(source).map_err(|e| GrammarError::RegexCompile {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex: Arc::new(regex),
        })
    }

    /// The regex source this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Find the first match in `line` starting at or after byte offset `from`.
    ///
    /// The whole line stays visible to the regex, so anchors and look-behind see the text
    /// before `from`.
    pub fn find_at(&self, line: &str, from: usize) -> Option<RuleMatch> {
        if from > line.len() {
            return None;
        }
        let mut region = Region::new();
        self.regex.search_with_options(
            line,
            from,
            line.len(),
            SearchOptions::SEARCH_OPTION_NONE,
            Some(&mut region),
        )?;

        let (start, end) = region.pos(0)?;
        let groups = (1..region.len())
            .map(|i| region.pos(i).map(|(s, e)| s..e))
            .collect();
        Some(RuleMatch {
            range: start..end,
            groups,
        })
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.source).finish()
    }
}

impl GrammarTable {
    /// Build a grammar from its states. At least the root state is required.
    pub fn new(name: Option<String>, states: Vec<LexicalState>) -> Result<Self, GrammarError> {
        if states.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }
        Ok(Self { name, states })
    }

    /// Number of lexical states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: construction rejects empty grammars.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Look up a state by index.
    pub fn state(&self, index: usize) -> Option<&LexicalState> {
        self.states.get(index)
    }

    /// All states in declaration order.
    pub fn states(&self) -> &[LexicalState] {
        &self.states
    }
}

impl LexicalState {
    /// Create a state from its rules.
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }
}

impl PatternRule {
    /// Compile a rule.
    pub fn new(
        regex: &str,
        style: StyleSpec,
        transition: Transition,
        kind: RuleKind,
    ) -> Result<Self, GrammarError> {
        Ok(Self {
            matcher: Matcher::new(regex)?,
            style,
            transition,
            kind,
        })
    }
}
