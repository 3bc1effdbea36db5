//! [§ 2.2 Component value combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
//!
//! "A double ampersand (&&) separates two or more components, all of which must
//! occur, in any order."
//!
//! "A double bar (||) separates two or more options: one or more of them must
//! occur, in any order."

use std::collections::HashSet;
use std::sync::Arc;

use super::{MatchContext, Matcher, MatcherRef, push_unique};
use crate::parser::ComponentValue;

/// Children that may appear in any order, each at most once.
///
/// The search state is a position plus the set of children already used,
/// held as a bit mask. Each state is expanded once.
#[derive(Debug, Clone)]
pub struct UnorderedGroup {
    children: Vec<MatcherRef>,
    all_required: bool,
}

impl UnorderedGroup {
    /// Children limit imposed by the `u64` used-set.
    pub const MAX_CHILDREN: usize = 64;

    fn build(children: impl IntoIterator<Item = MatcherRef>, all_required: bool) -> MatcherRef {
        let children: Vec<MatcherRef> = children.into_iter().collect();
        assert!(
            children.len() <= Self::MAX_CHILDREN,
            "unordered group limited to {} children",
            Self::MAX_CHILDREN
        );
        Arc::new(Self {
            children,
            all_required,
        })
    }

    /// `a || b || c`: one or more, any order.
    ///
    /// # Panics
    ///
    /// Panics with more than [`Self::MAX_CHILDREN`] children.
    #[must_use]
    pub fn some_of(children: impl IntoIterator<Item = MatcherRef>) -> MatcherRef {
        Self::build(children, false)
    }

    /// `a && b && c`: all of them, any order.
    ///
    /// # Panics
    ///
    /// Panics with more than [`Self::MAX_CHILDREN`] children.
    #[must_use]
    pub fn all_of(children: impl IntoIterator<Item = MatcherRef>) -> MatcherRef {
        Self::build(children, true)
    }

    /// Whether the search may stop at `pos` having used `used`.
    ///
    /// Unused children that can match empty count as present.
    fn can_stop(
        &self,
        values: &[ComponentValue],
        pos: usize,
        used: u64,
        ctx: &mut MatchContext,
    ) -> bool {
        let mut unused = self
            .children
            .iter()
            .enumerate()
            .filter(|&(i, _)| used & (1 << i) == 0)
            .map(|(_, child)| child);
        if self.all_required {
            unused.all(|child| child.generate_matches(values, pos, ctx).contains(&pos))
        } else {
            used != 0 || unused.any(|child| child.generate_matches(values, pos, ctx).contains(&pos))
        }
    }
}

impl Matcher for UnorderedGroup {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        let mut ends = Vec::new();
        let mut visited: HashSet<(usize, u64)> = HashSet::new();
        let mut stack = vec![(start, 0_u64)];

        while let Some((pos, used)) = stack.pop() {
            if !visited.insert((pos, used)) {
                continue;
            }
            if self.can_stop(values, pos, used, ctx) {
                push_unique(&mut ends, pos);
            }
            for (i, child) in self.children.iter().enumerate() {
                let bit = 1_u64 << i;
                if used & bit != 0 {
                    continue;
                }
                for end in child.generate_matches(values, pos, ctx) {
                    // A child matching empty is handled by `can_stop`.
                    if end != pos {
                        stack.push((end, used | bit));
                    }
                }
            }
        }

        // Longest first.
        ends.sort_unstable_by(|a, b| b.cmp(a));
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{KeywordMatcher, Quantifier};
    use crate::token::CSSToken;

    fn idents(words: &str) -> Vec<ComponentValue> {
        let mut values = Vec::new();
        for (i, word) in words.split_whitespace().enumerate() {
            if i > 0 {
                values.push(ComponentValue::Token(CSSToken::Whitespace));
            }
            values.push(ComponentValue::Token(CSSToken::ident(word)));
        }
        values
    }

    fn ab() -> [MatcherRef; 2] {
        [KeywordMatcher::one("a"), KeywordMatcher::one("b")]
    }

    #[test]
    fn test_all_of_any_order() {
        let matcher = UnorderedGroup::all_of(ab());
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a b"), &mut ctx));
        assert!(matcher.matches_all(&idents("b a"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a a"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a"), &mut ctx));
    }

    #[test]
    fn test_some_of_one_or_more() {
        let matcher = UnorderedGroup::some_of(ab());
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a"), &mut ctx));
        assert!(matcher.matches_all(&idents("b a"), &mut ctx));
        assert!(!matcher.matches_all(&idents("a a"), &mut ctx));
        assert!(!matcher.matches_all(&[], &mut ctx));
        assert_eq!(
            matcher.generate_matches(&idents("b a"), 0, &mut ctx),
            vec![3, 1]
        );
    }

    #[test]
    fn test_all_of_with_optional_child() {
        let matcher = UnorderedGroup::all_of([
            KeywordMatcher::one("a"),
            Quantifier::optional(KeywordMatcher::one("b")),
        ]);
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&idents("a"), &mut ctx));
        assert!(matcher.matches_all(&idents("b a"), &mut ctx));
    }

    #[test]
    fn test_some_of_with_optional_child_matches_empty() {
        let matcher = UnorderedGroup::some_of([
            KeywordMatcher::one("a"),
            Quantifier::optional(KeywordMatcher::one("b")),
        ]);
        let mut ctx = MatchContext::new();
        assert_eq!(matcher.generate_matches(&[], 0, &mut ctx), vec![0]);
    }
}
