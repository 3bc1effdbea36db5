//! Matchers that consume (at most) a single token.

use core::fmt;
use std::sync::Arc;

use super::{MatchContext, Matcher, MatcherRef, match_one, skip_whitespace};
use crate::parser::ComponentValue;
use crate::token::{CSSToken, TokenKind};

/// [§ 2.1 Component value types](https://www.w3.org/TR/css-values-4/#component-types)
///
/// "Keyword values (such as `auto`, `disc`, etc.), which appear literally, without
/// quotes."
///
/// "All CSS keywords are ASCII case-insensitive." Custom identifiers that begin
/// with `--` are compared exactly.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Match any of `keywords`.
    #[must_use]
    pub fn of<I, S>(keywords: I) -> MatcherRef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        })
    }

    /// Match exactly one keyword.
    #[must_use]
    pub fn one(keyword: &str) -> MatcherRef {
        Self::of([keyword])
    }

    fn accepts(&self, ident: &str) -> bool {
        if ident.starts_with("--") {
            self.keywords.iter().any(|k| k == ident)
        } else {
            self.keywords.iter().any(|k| k.eq_ignore_ascii_case(ident))
        }
    }
}

impl Matcher for KeywordMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        match_one(values, start, |value| {
            matches!(value, ComponentValue::Token(CSSToken::Ident(ident)) if self.accepts(ident))
        })
    }
}

/// A value check applied to a token whose kind already matched.
pub type TokenPredicate = Arc<dyn Fn(&CSSToken) -> bool + Send + Sync>;

/// [§ 2.1 Component value types](https://www.w3.org/TR/css-values-4/#component-types)
///
/// "Basic data types, such as `<length>` and `<color>`..."
///
/// Matches one token of a given kind whose payload satisfies a predicate
/// (a unit list, a numeric range, a hex-digit count, ...).
#[derive(Clone)]
pub struct TokenMatcher {
    kind: TokenKind,
    predicate: Option<TokenPredicate>,
}

impl TokenMatcher {
    /// Match any token of `kind`.
    #[must_use]
    pub fn any(kind: TokenKind) -> MatcherRef {
        Arc::new(Self {
            kind,
            predicate: None,
        })
    }

    /// Match a token of `kind` for which `predicate` holds.
    #[must_use]
    pub fn of<F>(kind: TokenKind, predicate: F) -> MatcherRef
    where
        F: Fn(&CSSToken) -> bool + Send + Sync + 'static,
    {
        Arc::new(Self {
            kind,
            predicate: Some(Arc::new(predicate)),
        })
    }
}

impl fmt::Debug for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMatcher")
            .field("kind", &self.kind)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

impl Matcher for TokenMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        match_one(values, start, |value| match value {
            ComponentValue::Token(token) if token.kind() == self.kind => {
                self.predicate.as_ref().is_none_or(|predicate| predicate(token))
            }
            _ => false,
        })
    }
}

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "`var() = var( <custom-property-name> , <declaration-value>? )`"
///
/// Matches the `<custom-property-name>` of a `var()` reference: an ident that
/// begins with two dashes.
#[derive(Debug, Clone, Copy)]
pub struct CustomPropertyMatcher;

impl CustomPropertyMatcher {
    /// Create the matcher.
    #[must_use]
    pub fn of() -> MatcherRef {
        Arc::new(Self)
    }
}

impl Matcher for CustomPropertyMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        match_one(values, start, |value| {
            value.as_token().is_some_and(CSSToken::is_custom_property_name)
        })
    }
}

/// [§ 2.1 Component value types](https://www.w3.org/TR/css-values-4/#component-types)
///
/// "Literal characters, such as a slash (/) or a comma (,), which must appear
/// literally..."
#[derive(Debug, Clone)]
pub struct DelimMatcher {
    delims: Vec<char>,
}

impl DelimMatcher {
    /// Match a single delimiter.
    #[must_use]
    pub fn of(delim: char) -> MatcherRef {
        Arc::new(Self {
            delims: vec![delim],
        })
    }

    /// Match any of several delimiters.
    #[must_use]
    pub fn any_of(delims: &[char]) -> MatcherRef {
        Arc::new(Self {
            delims: delims.to_vec(),
        })
    }
}

impl Matcher for DelimMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        match_one(values, start, |value| {
            matches!(value, ComponentValue::Token(CSSToken::Delim(c)) if self.delims.contains(c))
        })
    }
}

/// Consumes adjacent whitespace.
///
/// Insignificant whitespace is an optional skip. Significant whitespace must be
/// present (at least one whitespace token), as in a descendant combinator.
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceMatcher {
    significant: bool,
}

impl WhitespaceMatcher {
    /// Whitespace that may be absent.
    #[must_use]
    pub fn optional() -> MatcherRef {
        Arc::new(Self { significant: false })
    }

    /// Whitespace that must be present.
    #[must_use]
    pub fn significant() -> MatcherRef {
        Arc::new(Self { significant: true })
    }
}

impl Matcher for WhitespaceMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        let end = skip_whitespace(values, start);
        if self.significant && end == start {
            Vec::new()
        } else {
            vec![end]
        }
    }
}

/// Zero-width assertion that the next value is not whitespace.
///
/// Used where two parts must touch, such as the `.` and the name of a class
/// selector.
#[derive(Debug, Clone, Copy)]
pub struct NoWhitespace;

impl NoWhitespace {
    /// Create the matcher.
    #[must_use]
    pub fn of() -> MatcherRef {
        Arc::new(Self)
    }
}

impl Matcher for NoWhitespace {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        _ctx: &mut MatchContext,
    ) -> Vec<usize> {
        if values.get(start).is_some_and(ComponentValue::is_whitespace) {
            Vec::new()
        } else {
            vec![start]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(tokens: Vec<CSSToken>) -> Vec<ComponentValue> {
        tokens.into_iter().map(ComponentValue::Token).collect()
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let values = tokens(vec![CSSToken::ident("AuTo")]);
        let matcher = KeywordMatcher::of(["none", "auto"]);
        assert!(matcher.matches_all(&values, &mut MatchContext::new()));
    }

    #[test]
    fn test_dashed_keyword_is_case_sensitive() {
        let matcher = KeywordMatcher::one("--Brand");
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&tokens(vec![CSSToken::ident("--Brand")]), &mut ctx));
        assert!(!matcher.matches_all(&tokens(vec![CSSToken::ident("--brand")]), &mut ctx));
    }

    #[test]
    fn test_keyword_skips_leading_whitespace() {
        let values = tokens(vec![CSSToken::Whitespace, CSSToken::ident("a")]);
        let mut ctx = MatchContext::new();
        assert_eq!(KeywordMatcher::one("a").generate_matches(&values, 0, &mut ctx), vec![2]);
    }

    #[test]
    fn test_token_predicate_uses_numeric_value() {
        let non_negative = TokenMatcher::of(TokenKind::Dimension, |t| {
            t.numeric_value().is_some_and(|v| v >= 0.0)
        });
        let mut ctx = MatchContext::new();
        assert!(non_negative.matches_all(
            &tokens(vec![CSSToken::dimension(0.0, Some(0), "px")]),
            &mut ctx
        ));
        assert!(!non_negative.matches_all(
            &tokens(vec![CSSToken::dimension(-0.5, None, "px")]),
            &mut ctx
        ));
        assert!(!non_negative.matches_all(&tokens(vec![CSSToken::integer(3)]), &mut ctx));
    }

    #[test]
    fn test_custom_property_matcher() {
        let mut ctx = MatchContext::new();
        let matcher = CustomPropertyMatcher::of();
        assert!(matcher.matches_all(&tokens(vec![CSSToken::ident("--gap")]), &mut ctx));
        assert!(!matcher.matches_all(&tokens(vec![CSSToken::ident("gap")]), &mut ctx));
    }

    #[test]
    fn test_whitespace_significance() {
        let mut ctx = MatchContext::new();
        let values = tokens(vec![CSSToken::ident("a")]);
        assert_eq!(
            WhitespaceMatcher::optional().generate_matches(&values, 0, &mut ctx),
            vec![0]
        );
        assert!(
            WhitespaceMatcher::significant()
                .generate_matches(&values, 0, &mut ctx)
                .is_empty()
        );
        let spaced = tokens(vec![CSSToken::Whitespace, CSSToken::Whitespace]);
        assert_eq!(
            WhitespaceMatcher::significant().generate_matches(&spaced, 0, &mut ctx),
            vec![2]
        );
    }

    #[test]
    fn test_no_whitespace() {
        let mut ctx = MatchContext::new();
        let values = tokens(vec![CSSToken::Whitespace, CSSToken::ident("a")]);
        assert!(NoWhitespace::of().generate_matches(&values, 0, &mut ctx).is_empty());
        assert_eq!(NoWhitespace::of().generate_matches(&values, 1, &mut ctx), vec![1]);
    }
}
