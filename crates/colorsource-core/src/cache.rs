use crate::grammar::{Matcher, RuleMatch};
use std::collections::HashMap;

/// Per-line memo of matcher results, keyed by `(state index, rule index)`.
///
/// A remembered match that starts at or after the current position is still the first
/// match from that position, and a remembered miss stays a miss further right, so neither
/// needs the regex to run again. Offsets are relative to one line: call [`MatchCache::reset`]
/// before moving on to the next.
#[derive(Debug, Default)]
pub(crate) struct MatchCache {
    entries: HashMap<(usize, usize), Option<RuleMatch>>,
    searches: usize,
}

impl MatchCache {
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
    }

    /// First match of `matcher` in `line` at or after `pos`.
    pub(crate) fn find(
        &mut self,
        key: (usize, usize),
        matcher: &Matcher,
        line: &str,
        pos: usize,
    ) -> Option<&RuleMatch> {
        let fresh = match self.entries.get(&key) {
            Some(None) => false,
            Some(Some(cached)) => cached.start() < pos,
            None => true,
        };
        if fresh {
            self.searches += 1;
            self.entries.insert(key, matcher.find_at(line, pos));
        }
        self.entries.get(&key).and_then(Option::as_ref)
    }

    /// Number of regex searches actually run.
    pub(crate) fn searches(&self) -> usize {
        self.searches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_match_is_reused_until_passed() {
        let matcher = Matcher::new("x").unwrap();
        let mut cache = MatchCache::default();
        let line = "ab x cd x";

        assert_eq!(cache.find((0, 0), &matcher, line, 0).map(|m| m.start()), Some(3));
        assert_eq!(cache.find((0, 0), &matcher, line, 2).map(|m| m.start()), Some(3));
        assert_eq!(cache.find((0, 0), &matcher, line, 3).map(|m| m.start()), Some(3));
        assert_eq!(cache.searches(), 1);

        assert_eq!(cache.find((0, 0), &matcher, line, 4).map(|m| m.start()), Some(8));
        assert_eq!(cache.searches(), 2);
    }

    #[test]
    fn test_misses_are_remembered_and_reset_per_line() {
        let matcher = Matcher::new("z").unwrap();
        let mut cache = MatchCache::default();

        assert!(cache.find((1, 2), &matcher, "abc", 0).is_none());
        assert!(cache.find((1, 2), &matcher, "abc", 2).is_none());
        assert_eq!(cache.searches(), 1);

        cache.reset();
        assert_eq!(cache.find((1, 2), &matcher, "z", 0).map(|m| m.end()), Some(1));
        assert_eq!(cache.searches(), 2);
    }
}
