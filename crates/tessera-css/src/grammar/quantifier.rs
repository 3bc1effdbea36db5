//! [§ 2.3 Component value multipliers](https://www.w3.org/TR/css-values-4/#component-multipliers)
//!
//! "Every type, keyword, or bracketed group may be followed by one of the
//! following modifiers: `*` `+` `?` `{A}` `{A,}` `{A,B}` `#` `!`"

use std::collections::HashSet;
use std::sync::Arc;

use super::{MatchContext, Matcher, MatcherRef, consume_comma, push_unique};
use crate::diagnostics::DiagnosticCode;
use crate::parser::ComponentValue;

/// A repeated matcher.
///
/// Repetitions are greedy: the ends reached with more repetitions come first.
/// A repetition that consumes nothing ends the loop, so an unbounded
/// multiplier over a matcher that can match empty still terminates.
#[derive(Debug, Clone)]
pub struct Quantifier {
    inner: MatcherRef,
    min: usize,
    max: Option<usize>,
    commas: bool,
}

impl Quantifier {
    fn build(inner: MatcherRef, min: usize, max: Option<usize>, commas: bool) -> MatcherRef {
        Arc::new(Self {
            inner,
            min,
            max,
            commas,
        })
    }

    /// "A question mark (?) indicates that the preceding type, word, or group is
    /// optional (occurs zero or one times)."
    #[must_use]
    pub fn optional(inner: MatcherRef) -> MatcherRef {
        Self::build(inner, 0, Some(1), false)
    }

    /// "An asterisk (*) indicates that the preceding type, word, or group occurs
    /// zero or more times."
    #[must_use]
    pub fn star(inner: MatcherRef) -> MatcherRef {
        Self::build(inner, 0, None, false)
    }

    /// "A plus (+) indicates that the preceding type, word, or group occurs one or
    /// more times."
    #[must_use]
    pub fn plus(inner: MatcherRef) -> MatcherRef {
        Self::build(inner, 1, None, false)
    }

    /// "A single number in curly braces ({A}) ... A comma-separated pair of numbers
    /// in curly braces ({A,B}) indicates that the preceding type, word, or group
    /// occurs at least A and at most B times."
    #[must_use]
    pub fn count(inner: MatcherRef, min: usize, max: usize) -> MatcherRef {
        Self::build(inner, min, Some(max), false)
    }

    /// "A hash mark (#) indicates that the preceding type, word, or group occurs
    /// one or more times, separated by comma tokens (which may optionally be
    /// surrounded by white space and/or comments). It may optionally be followed
    /// by the curly brace forms, above, to indicate precisely how many times the
    /// repetition occurs, like `<length>#{1,4}`."
    #[must_use]
    pub fn hash(inner: MatcherRef, min: usize, max: usize) -> MatcherRef {
        Self::build(inner, min, Some(max), true)
    }

    /// `#` without an upper bound.
    #[must_use]
    pub fn hash_unbounded(inner: MatcherRef, min: usize) -> MatcherRef {
        Self::build(inner, min, None, true)
    }

    fn allows(&self, count: usize) -> bool {
        self.max.is_none_or(|max| count <= max)
    }
}

impl Matcher for Quantifier {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        // levels[n] holds the ends reachable with exactly n repetitions.
        let mut levels: Vec<Vec<usize>> = vec![vec![start]];
        // Positions where the inner matcher matched empty.
        let mut empty_repeats: Vec<usize> = Vec::new();
        // Once past the minimum with no maximum, the repetition count no longer
        // matters, so a position never needs expanding twice.
        let mut expanded: HashSet<usize> = HashSet::new();
        let mut furthest = start;

        let mut count = 0;
        while self.allows(count + 1) {
            let Some(current) = levels.last() else { break };
            let mut next = Vec::new();
            for &pos in current {
                if self.max.is_none() && count >= self.min && !expanded.insert(pos) {
                    continue;
                }
                let from = if self.commas && count > 0 {
                    match consume_comma(values, pos) {
                        Some(after) => after,
                        None => continue,
                    }
                } else {
                    pos
                };
                for end in self.inner.generate_matches(values, from, ctx) {
                    if end == pos {
                        empty_repeats.push(pos);
                    } else {
                        furthest = furthest.max(end);
                        push_unique(&mut next, end);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            levels.push(next);
            count += 1;
        }

        let mut ends = Vec::new();
        for (n, level) in levels.iter().enumerate().rev() {
            if n >= self.min {
                for &end in level {
                    push_unique(&mut ends, end);
                }
            }
        }
        // A zero-width repetition can be repeated until the minimum is met.
        for pos in empty_repeats {
            push_unique(&mut ends, pos);
        }

        let reached = levels.len() - 1;
        if ends.is_empty() && reached > 0 {
            ctx.hint(
                DiagnosticCode::MissingRequiredRepetition,
                furthest,
                format!(
                    "expected at least {} repetitions, found {reached}",
                    self.min
                ),
            );
        }
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{KeywordMatcher, MatchContext};
    use crate::token::CSSToken;

    fn words(n: usize) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        for i in 0..n {
            if i > 0 {
                values.push(ComponentValue::Token(CSSToken::Whitespace));
            }
            values.push(ComponentValue::Token(CSSToken::ident("a")));
        }
        values
    }

    #[test]
    fn test_optional_matches_empty() {
        let matcher = Quantifier::optional(KeywordMatcher::one("a"));
        let mut ctx = MatchContext::new();
        assert_eq!(matcher.generate_matches(&[], 0, &mut ctx), vec![0]);
        assert_eq!(matcher.generate_matches(&words(1), 0, &mut ctx), vec![1, 0]);
    }

    #[test]
    fn test_star_is_greedy() {
        let matcher = Quantifier::star(KeywordMatcher::one("a"));
        let mut ctx = MatchContext::new();
        assert_eq!(
            matcher.generate_matches(&words(3), 0, &mut ctx),
            vec![5, 3, 1, 0]
        );
    }

    #[test]
    fn test_plus_requires_one() {
        let matcher = Quantifier::plus(KeywordMatcher::one("a"));
        let mut ctx = MatchContext::new();
        assert!(matcher.generate_matches(&[], 0, &mut ctx).is_empty());
        assert!(matcher.matches_all(&words(4), &mut ctx));
    }

    #[test]
    fn test_count_bounds() {
        let matcher = Quantifier::count(KeywordMatcher::one("a"), 2, 3);
        let mut ctx = MatchContext::new();
        assert!(!matcher.matches_all(&words(1), &mut ctx));
        assert!(matcher.matches_all(&words(2), &mut ctx));
        assert!(matcher.matches_all(&words(3), &mut ctx));
        assert!(!matcher.matches_all(&words(4), &mut ctx));
    }

    #[test]
    fn test_missing_repetition_hint() {
        let matcher = Quantifier::count(KeywordMatcher::one("a"), 3, 3);
        let mut ctx = MatchContext::new();
        assert!(!matcher.matches_all(&words(2), &mut ctx));
        assert_eq!(ctx.hints().len(), 1);
        assert_eq!(
            ctx.hints()[0].code,
            DiagnosticCode::MissingRequiredRepetition
        );
        assert_eq!(ctx.hints()[0].offset, 3);
    }

    #[test]
    fn test_zero_width_inner_terminates() {
        let matcher = Quantifier::star(Quantifier::optional(KeywordMatcher::one("a")));
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&words(2), &mut ctx));
        assert!(matcher.matches_all(&[], &mut ctx));
        let at_least_two = Quantifier::count(Quantifier::optional(KeywordMatcher::one("a")), 2, 2);
        assert!(at_least_two.matches_all(&[], &mut ctx));
    }
}
