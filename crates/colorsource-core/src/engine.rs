use crate::cache::MatchCache;
use crate::element::Element;
use crate::error::HighlightError;
use crate::grammar::{
    GrammarTable, LexicalState, PatternRule, RuleKind, RuleMatch, StyleSpec, Transition,
};
use crate::line_ending::physical_lines;
use crate::link::{LINK_STYLE, link_destination};
use crate::tag::Tag;

/// Highlight `text` with `grammar`, returning style-run boundaries.
///
/// - Offsets are **byte offsets** into `text` and always fall on char boundaries.
/// - The result is flat: every start tag is followed by its end tag before the next start.
/// - Runs never cross a line delimiter; the delimiter itself is never covered.
/// - `class_prefix` is prepended to every style name written into a `class` attribute.
///
/// Text that no rule matches is plain text, not an error. Errors only report grammar
/// defects (a push into a missing state, or zero-width matches that never advance).
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len(), states = grammar.len()))]
pub fn highlight(
    text: &str,
    grammar: &GrammarTable,
    class_prefix: &str,
) -> Result<Vec<Tag>, HighlightError> {
    let mut engine = Highlighter::new(text, grammar, class_prefix);
    engine.run()?;
    tracing::debug!(
        tags = engine.tags.len(),
        searches = engine.cache.searches(),
        "highlight complete"
    );
    Ok(engine.tags)
}

/// A pushed context: the rule that pushed it and the state it entered.
#[derive(Debug, Clone, Copy)]
struct Activation<'g> {
    rule: &'g PatternRule,
    state: usize,
}

/// The style run currently open, if any.
#[derive(Debug, Clone, Copy)]
struct OpenRun<'g> {
    style: &'g str,
    start: usize,
    tag_index: usize,
}

struct Highlighter<'g, 't> {
    grammar: &'g GrammarTable,
    text: &'t str,
    class_prefix: &'t str,
    stack: Vec<Activation<'g>>,
    cache: MatchCache,
    tags: Vec<Tag>,
    pos: usize,
    run: Option<OpenRun<'g>>,
}

impl<'g, 't> Highlighter<'g, 't> {
    fn new(text: &'t str, grammar: &'g GrammarTable, class_prefix: &'t str) -> Self {
        Self {
            grammar,
            text,
            class_prefix,
            stack: Vec::new(),
            cache: MatchCache::default(),
            tags: Vec::new(),
            pos: 0,
            run: None,
        }
    }

    fn run(&mut self) -> Result<(), HighlightError> {
        let text = self.text;
        for (line_no, line) in physical_lines(text).enumerate() {
            self.cache.reset();
            self.pos = line.content.start;
            self.highlight_line(line_no, &text[line.content.clone()])?;

            // Runs end with the line; only the context stack carries over.
            self.close_run();
            self.pos = line.next_start;
        }
        Ok(())
    }

    fn highlight_line(&mut self, line_no: usize, line: &str) -> Result<(), HighlightError> {
        let base = self.pos;
        let max_steps = (line.len() + 1).saturating_mul(32).max(128);
        let mut steps = 0usize;

        loop {
            steps += 1;
            if steps > max_steps {
                return Err(HighlightError::NoProgress { line: line_no });
            }

            let within = self.pos - base;
            let (state_index, state) = self.active_state()?;

            let Some((rule, found)) = self.best_match(state_index, state, line, within) else {
                self.emit(line.len() - within, None);
                return Ok(());
            };

            if found.start() > within {
                self.emit(found.start() - within, None);
            }
            self.emit_match(rule, &found);

            if found.range.is_empty() && rule.transition == Transition::Continue {
                // Nothing consumed and nothing changed: step over one char as filler.
                let Some(c) = line[found.end()..].chars().next() else {
                    return Ok(());
                };
                self.emit(c.len_utf8(), None);
                continue;
            }

            self.apply_transition(rule)?;
        }
    }

    fn active_state(&self) -> Result<(usize, &'g LexicalState), HighlightError> {
        let index = self.stack.last().map_or(0, |a| a.state);
        let state = self
            .grammar
            .state(index)
            .ok_or(HighlightError::UnknownState {
                state: index,
                states: self.grammar.len(),
            })?;
        Ok((index, state))
    }

    /// Arbitrate between the rules of `state`: the earliest match wins, and a match at the
    /// current position ends the search, so declaration order breaks ties there.
    fn best_match(
        &mut self,
        state_index: usize,
        state: &'g LexicalState,
        line: &str,
        within: usize,
    ) -> Option<(&'g PatternRule, RuleMatch)> {
        let mut best: Option<(&'g PatternRule, RuleMatch)> = None;

        for (rule_index, rule) in state.rules.iter().enumerate() {
            let Some(found) = self
                .cache
                .find((state_index, rule_index), &rule.matcher, line, within)
            else {
                continue;
            };

            if best
                .as_ref()
                .is_none_or(|(_, current)| found.start() < current.start())
            {
                let at_pos = found.start() == within;
                best = Some((rule, found.clone()));
                if at_pos {
                    break;
                }
            }
        }

        best
    }

    fn emit_match(&mut self, rule: &'g PatternRule, found: &RuleMatch) {
        match &rule.style {
            StyleSpec::Single(style) => self.emit(found.range.len(), Some(style.as_str())),
            StyleSpec::PerGroup(styles) => {
                let mut cursor = found.start();
                for (group, style) in found.groups.iter().zip(styles) {
                    let Some(range) = group else {
                        continue;
                    };
                    let start = range.start.max(cursor);
                    let end = range.end.min(found.end());
                    if end <= start {
                        continue;
                    }
                    if start > cursor {
                        self.emit(start - cursor, None);
                    }
                    self.emit(end - start, style.as_deref());
                    cursor = end;
                }
                if found.end() > cursor {
                    self.emit(found.end() - cursor, None);
                }
            }
        }
    }

    fn apply_transition(&mut self, rule: &'g PatternRule) -> Result<(), HighlightError> {
        match rule.transition {
            Transition::Continue => {}
            Transition::Pop => {
                self.stack.pop();
                tracing::trace!(depth = self.stack.len(), "pop");
            }
            Transition::PopAll => {
                self.stack.clear();
                tracing::trace!("pop all");
            }
            Transition::Push(state) => {
                if self.grammar.state(state).is_none() {
                    return Err(HighlightError::UnknownState {
                        state,
                        states: self.grammar.len(),
                    });
                }
                self.stack.push(Activation { rule, state });
                tracing::trace!(state, depth = self.stack.len(), "push");
            }
        }
        Ok(())
    }

    /// Style lent to untagged text by the innermost environment.
    fn inherited_style(&self) -> Option<&'g str> {
        let rule = self.stack.last()?.rule;
        match rule.kind {
            RuleKind::Environment => rule.style.inherited(),
            RuleKind::State => None,
        }
    }

    /// Advance over `len` bytes styled `style`, opening or closing runs only when the
    /// resolved style changes.
    fn emit(&mut self, len: usize, style: Option<&'g str>) {
        // Empty runs would become empty elements.
        if len == 0 {
            return;
        }

        let style = style.or_else(|| self.inherited_style());
        if self.run.map(|r| r.style) != style {
            self.close_run();
            if let Some(style) = style {
                self.open_run(style);
            }
        }
        self.pos += len;
    }

    fn open_run(&mut self, style: &'g str) {
        let class = format!("{}{}", self.class_prefix, style);
        let element = if style == LINK_STYLE {
            Element::anchor(class)
        } else {
            Element::span(class)
        };
        self.run = Some(OpenRun {
            style,
            start: self.pos,
            tag_index: self.tags.len(),
        });
        self.tags.push(Tag::start(self.pos, element));
    }

    fn close_run(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.tags.push(Tag::end(self.pos));

        if run.style == LINK_STYLE {
            let href = link_destination(&self.text[run.start..self.pos]);
            if let Some(Tag::Start { element, .. }) = self.tags.get_mut(run.tag_index) {
                element.set_attribute("href", href);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::LexicalState;

    fn rule(regex: &str, style: &str, transition: Transition, kind: RuleKind) -> PatternRule {
        PatternRule::new(regex, StyleSpec::Single(style.to_string()), transition, kind).unwrap()
    }

    fn braces(kind: RuleKind) -> GrammarTable {
        let open = || rule(r"\{", "sh_cbracket", Transition::Push(1), kind);
        GrammarTable::new(
            None,
            vec![
                LexicalState::new(vec![open()]),
                LexicalState::new(vec![
                    open(),
                    rule(r"\}", "sh_cbracket", Transition::Pop, kind),
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_stack_depth_follows_braces_and_returns_to_root() {
        let grammar = braces(RuleKind::State);
        let text = "a{b{c";
        let mut engine = Highlighter::new(text, &grammar, "");
        engine.run().unwrap();
        assert_eq!(engine.stack.len(), 2);

        let text = "a{b{c}d}e";
        let mut engine = Highlighter::new(text, &grammar, "");
        engine.run().unwrap();
        assert!(engine.stack.is_empty());
        // One run per brace; plain text between them stays untagged.
        assert_eq!(engine.tags.len(), 8);
    }

    #[test]
    fn test_stack_persists_across_lines_but_runs_do_not() {
        let grammar = braces(RuleKind::Environment);
        let text = "{a\nb}";
        let mut engine = Highlighter::new(text, &grammar, "");
        engine.run().unwrap();
        assert!(engine.stack.is_empty());
        assert_eq!(
            engine.tags,
            vec![
                Tag::start(0, Element::span("sh_cbracket")),
                Tag::end(2),
                Tag::start(3, Element::span("sh_cbracket")),
                Tag::end(5),
            ]
        );
    }

    #[test]
    fn test_push_into_missing_state_fails_fast() {
        let grammar = GrammarTable::new(
            None,
            vec![LexicalState::new(vec![rule(
                "x",
                "s",
                Transition::Push(9),
                RuleKind::State,
            )])],
        )
        .unwrap();
        let err = highlight("ax", &grammar, "").unwrap_err();
        assert!(matches!(err, HighlightError::UnknownState { state: 9, states: 1 }));
    }

    #[test]
    fn test_zero_width_continue_steps_forward() {
        let grammar = GrammarTable::new(
            None,
            vec![LexicalState::new(vec![
                rule(r"\b", "sh_boundary", Transition::Continue, RuleKind::State),
                rule(r"\d+", "sh_number", Transition::Continue, RuleKind::State),
            ])],
        )
        .unwrap();
        // The boundary rule wins every tie, so only the last digit reaches `\d+`.
        let tags = highlight("é 12", &grammar, "").unwrap();
        assert_eq!(
            tags,
            vec![Tag::start(4, Element::span("sh_number")), Tag::end(5)]
        );
    }

    #[test]
    fn test_zero_width_push_pop_loop_is_reported() {
        let grammar = GrammarTable::new(
            None,
            vec![
                LexicalState::new(vec![rule("", "s", Transition::Push(1), RuleKind::State)]),
                LexicalState::new(vec![rule("", "s", Transition::Pop, RuleKind::State)]),
            ],
        )
        .unwrap();
        assert!(matches!(
            highlight("abc", &grammar, ""),
            Err(HighlightError::NoProgress { line: 0 })
        ));
    }
}
