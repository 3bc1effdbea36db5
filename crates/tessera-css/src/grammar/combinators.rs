//! Ordered combinators: alternation and juxtaposition.

use std::sync::Arc;

use super::{MatchContext, Matcher, MatcherRef, consume_comma, push_unique};
use crate::parser::ComponentValue;

/// [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
///
/// "A bar (|) separates two or more alternatives: exactly one of them must occur."
///
/// Alternatives are tried in order at the same start index. Order is
/// significant: put specific productions (a literal keyword) before general
/// fallbacks (a `var()` reference), since the first child's ends are preferred.
#[derive(Debug, Clone)]
pub struct Alternative {
    children: Vec<MatcherRef>,
}

impl Alternative {
    /// Match any one of `children`.
    #[must_use]
    pub fn of(children: impl IntoIterator<Item = MatcherRef>) -> MatcherRef {
        Arc::new(Self {
            children: children.into_iter().collect(),
        })
    }
}

impl Matcher for Alternative {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        let mut ends = Vec::new();
        for child in &self.children {
            for end in child.generate_matches(values, start, ctx) {
                push_unique(&mut ends, end);
            }
        }
        ends
    }
}

/// [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
///
/// "Juxtaposing components means that all of them must occur, in the given order."
///
/// With `commas`, exactly one comma (whitespace allowed on either side) must
/// separate successive children, as in `rotate3d( <number> , <number> , ... )`.
#[derive(Debug, Clone)]
pub struct Juxtaposition {
    children: Vec<MatcherRef>,
    commas: bool,
}

impl Juxtaposition {
    /// Match `children` in order.
    #[must_use]
    pub fn of(children: impl IntoIterator<Item = MatcherRef>) -> MatcherRef {
        Arc::new(Self {
            children: children.into_iter().collect(),
            commas: false,
        })
    }

    /// Match `children` in order, separated by commas.
    #[must_use]
    pub fn with_commas(children: impl IntoIterator<Item = MatcherRef>) -> MatcherRef {
        Arc::new(Self {
            children: children.into_iter().collect(),
            commas: true,
        })
    }
}

impl Matcher for Juxtaposition {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        // Every position reachable after the children matched so far. Each
        // child is tried from each of them, so a greedy earlier child whose
        // longest match starves a later child is backed off automatically.
        let mut frontier = vec![start];
        for (i, child) in self.children.iter().enumerate() {
            let mut next = Vec::new();
            for &pos in &frontier {
                let pos = if self.commas && i > 0 {
                    match consume_comma(values, pos) {
                        Some(after) => after,
                        None => continue,
                    }
                } else {
                    pos
                };
                for end in child.generate_matches(values, pos, ctx) {
                    push_unique(&mut next, end);
                }
            }
            if next.is_empty() {
                return next;
            }
            frontier = next;
        }
        frontier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{KeywordMatcher, Quantifier};
    use crate::token::CSSToken;

    fn idents(words: &str) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        for (i, word) in words.split(' ').enumerate() {
            if i > 0 {
                values.push(ComponentValue::Token(CSSToken::Whitespace));
            }
            if word == "," {
                values.push(ComponentValue::Token(CSSToken::Comma));
            } else {
                values.push(ComponentValue::Token(CSSToken::ident(word)));
            }
        }
        values
    }

    #[test]
    fn test_alternative_prefers_first_child() {
        let a = KeywordMatcher::one("a");
        let aa = Juxtaposition::of([a.clone(), a.clone()]);
        let matcher = Alternative::of([a, aa]);
        let values = idents("a a");
        let mut ctx = MatchContext::new();
        assert_eq!(matcher.generate_matches(&values, 0, &mut ctx), vec![1, 3]);
        assert!(matcher.matches_all(&values, &mut ctx));
    }

    #[test]
    fn test_juxtaposition_backtracks_greedy_child() {
        let a = KeywordMatcher::one("a");
        let matcher = Juxtaposition::of([Quantifier::star(a.clone()), a]);
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a a a"), &mut ctx));
        assert!(matcher.matches_all(&idents("a"), &mut ctx));
    }

    #[test]
    fn test_juxtaposition_order_matters() {
        let matcher = Juxtaposition::of([KeywordMatcher::one("a"), KeywordMatcher::one("b")]);
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a b"), &mut ctx));
        assert!(!matcher.matches_all(&idents("b a"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a"), &mut ctx));
    }

    #[test]
    fn test_juxtaposition_with_commas() {
        let matcher = Juxtaposition::with_commas([KeywordMatcher::one("a"), KeywordMatcher::one("b")]);
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a , b"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a b"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a , , b"), &mut ctx));
    }
}
