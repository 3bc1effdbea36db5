//! CSS value grammar matchers per
//! [CSS Values and Units Level 4 § 2](https://www.w3.org/TR/css-values-4/#value-defs).
//!
//! "Value definition syntax ... describes what values are valid for the
//! property." Each production of that syntax is a [`Matcher`]: keywords,
//! typed tokens, functions, blocks, and the combinators that compose them
//! (juxtaposition, `|`, `&&`, `||`, and the multipliers `?`, `*`, `+`,
//! `{A,B}`, and `#`).
//!
//! # Matching model
//!
//! A matcher is asked where it can stop, not whether it matches. Given a
//! component-value list and a start index it returns every end index it can
//! reach, most preferred first (greedy multipliers list their longest match
//! first). Returning every end is what lets a juxtaposition back off a greedy
//! multiplier when the next child would otherwise fail. End lists are
//! de-duplicated, which keeps the search polynomial: the only state a matcher
//! threads forward is a position.
//!
//! Whitespace is insignificant unless asked for: every matcher that consumes a
//! value skips whitespace before it, and a list matches in full when only
//! whitespace remains after the final end.
//!
//! ```text
//!   values:  [ 1px ][ ␠ ][ , ][ ␠ ][ 2px ]
//!   index:     0     1    2    3     4     5
//!
//!   Quantifier::hash(length, 2, 3) from 0 → ends [5]
//! ```

mod combinators;
mod factory;
mod nested;
mod quantifier;
mod tokens;
mod unordered;

use std::sync::Arc;

use crate::diagnostics::DiagnosticCode;
use crate::parser::ComponentValue;

pub use combinators::{Alternative, Juxtaposition};
pub use factory::{DefaultMatcherFactory, ExtendedMatcherFactory, MatcherFactory};
pub use nested::{BlockMatcher, FunctionMatcher};
pub use quantifier::Quantifier;
pub use tokens::{
    CustomPropertyMatcher, DelimMatcher, KeywordMatcher, NoWhitespace, TokenMatcher,
    TokenPredicate, WhitespaceMatcher,
};
pub use unordered::UnorderedGroup;

/// A shared, immutable grammar node.
///
/// Matcher trees are built once per property and reused by every run, from
/// any thread.
pub type MatcherRef = Arc<dyn Matcher>;

/// A production of the CSS value definition syntax.
pub trait Matcher: core::fmt::Debug + Send + Sync {
    /// Every index at which a match beginning at `start` can end, most
    /// preferred first, without duplicates. An empty list means no match.
    ///
    /// A match that consumes nothing (`start` itself in the list) is a
    /// success, not a failure.
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize>;

    /// The preferred end of a match beginning at `start`.
    fn match_at(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Option<usize> {
        self.generate_matches(values, start, ctx).first().copied()
    }

    /// Returns true if the matcher consumes the entire list (trailing
    /// whitespace aside).
    fn matches_all(&self, values: &[ComponentValue], ctx: &mut MatchContext) -> bool {
        self.generate_matches(values, 0, ctx)
            .into_iter()
            .any(|end| skip_whitespace(values, end) == values.len())
    }
}

/// A detail left behind by a matcher that failed in a specific, explainable way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHint {
    /// What kind of failure.
    pub code: DiagnosticCode,
    /// Index of the component value the hint refers to.
    pub offset: usize,
    /// Human-readable explanation.
    pub message: String,
}

/// Per-attempt state threaded through a match.
///
/// A context belongs to exactly one match attempt. It collects hints from
/// failed branches; only the hints at the furthest offset survive, since the
/// branch that got furthest is usually the one the author meant.
#[derive(Debug, Default)]
pub struct MatchContext {
    hints: Vec<MatchHint>,
}

impl MatchContext {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self { hints: Vec::new() }
    }

    /// Record a failure hint at `offset`.
    pub fn hint(&mut self, code: DiagnosticCode, offset: usize, message: impl Into<String>) {
        let furthest = self.hints.first().map(|h| h.offset);
        match furthest {
            Some(f) if offset < f => {}
            Some(f) if offset == f => {
                let message = message.into();
                if !self
                    .hints
                    .iter()
                    .any(|h| h.code == code && h.message == message)
                {
                    self.hints.push(MatchHint {
                        code,
                        offset,
                        message,
                    });
                }
            }
            _ => {
                self.hints.clear();
                self.hints.push(MatchHint {
                    code,
                    offset,
                    message: message.into(),
                });
            }
        }
    }

    /// Hints at the furthest failure offset, in recording order.
    #[must_use]
    pub fn hints(&self) -> &[MatchHint] {
        &self.hints
    }

    /// Consume the context, returning its hints.
    #[must_use]
    pub fn into_hints(self) -> Vec<MatchHint> {
        self.hints
    }
}

/// Index of the first non-whitespace value at or after `pos`.
#[must_use]
pub fn skip_whitespace(values: &[ComponentValue], pos: usize) -> usize {
    let mut pos = pos;
    while values.get(pos).is_some_and(ComponentValue::is_whitespace) {
        pos += 1;
    }
    pos
}

/// The next non-whitespace value at or after `pos`, with its index.
fn next_value(values: &[ComponentValue], pos: usize) -> Option<(usize, &ComponentValue)> {
    let index = skip_whitespace(values, pos);
    values.get(index).map(|value| (index, value))
}

/// Index just past a comma at `pos` (leading whitespace allowed).
fn consume_comma(values: &[ComponentValue], pos: usize) -> Option<usize> {
    match next_value(values, pos) {
        Some((index, value)) if value.is_comma() => Some(index + 1),
        _ => None,
    }
}

/// Append `end` unless already present.
fn push_unique(ends: &mut Vec<usize>, end: usize) {
    if !ends.contains(&end) {
        ends.push(end);
    }
}

/// Match a single non-whitespace value with `accept`.
fn match_one(
    values: &[ComponentValue],
    start: usize,
    accept: impl FnOnce(&ComponentValue) -> bool,
) -> Vec<usize> {
    match next_value(values, start) {
        Some((index, value)) if accept(value) => vec![index + 1],
        _ => Vec::new(),
    }
}
