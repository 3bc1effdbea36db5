//! Matchers that descend into functions and simple blocks.

use std::sync::Arc;

use super::{MatchContext, Matcher, MatcherRef, next_value};
use crate::diagnostics::DiagnosticCode;
use crate::parser::ComponentValue;

/// Match `inner` against an entire argument list.
///
/// The inner match runs in its own context: offsets inside the arguments mean
/// nothing to the enclosing list, so the caller reports one hint at the
/// function itself instead.
fn matches_contents(inner: &dyn Matcher, contents: &[ComponentValue]) -> bool {
    inner.matches_all(contents, &mut MatchContext::new())
}

/// [§ 2.6 Functional notations](https://www.w3.org/TR/css-values-4/#component-functions)
///
/// "A functional notation is a type of component value that can represent more
/// complex types or invoke special processing. The syntax starts with the name
/// of the function immediately followed by a left parenthesis ... followed by
/// the argument(s) to the notation followed by a right parenthesis."
///
/// The function name is ASCII case-insensitive. The inner grammar must consume
/// every argument.
#[derive(Debug, Clone)]
pub struct FunctionMatcher {
    name: String,
    inner: MatcherRef,
}

impl FunctionMatcher {
    /// Match `name( <inner> )`.
    #[must_use]
    pub fn of(name: impl Into<String>, inner: MatcherRef) -> MatcherRef {
        Arc::new(Self {
            name: name.into(),
            inner,
        })
    }
}

impl Matcher for FunctionMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        let Some((index, ComponentValue::Function { name, value })) = next_value(values, start)
        else {
            return Vec::new();
        };
        if !name.eq_ignore_ascii_case(&self.name) {
            return Vec::new();
        }
        if matches_contents(self.inner.as_ref(), value) {
            vec![index + 1]
        } else {
            ctx.hint(
                DiagnosticCode::MalformedFunctionArguments,
                index,
                format!("invalid arguments to {}()", self.name),
            );
            Vec::new()
        }
    }
}

/// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
///
/// Matches a `[]`, `()`, or `{}` block whose contents match `inner` entirely,
/// e.g. the `[ <line-names> ]` of grid templates or attribute selectors.
#[derive(Debug, Clone)]
pub struct BlockMatcher {
    token: char,
    inner: MatcherRef,
}

impl BlockMatcher {
    /// Match a block opened by `token` (`'['`, `'('`, or `'{'`).
    #[must_use]
    pub fn of(token: char, inner: MatcherRef) -> MatcherRef {
        Arc::new(Self { token, inner })
    }
}

impl Matcher for BlockMatcher {
    fn generate_matches(
        &self,
        values: &[ComponentValue],
        start: usize,
        ctx: &mut MatchContext,
    ) -> Vec<usize> {
        let Some((index, ComponentValue::Block { token, value })) = next_value(values, start)
        else {
            return Vec::new();
        };
        if *token != self.token {
            return Vec::new();
        }
        if matches_contents(self.inner.as_ref(), value) {
            vec![index + 1]
        } else {
            ctx.hint(
                DiagnosticCode::MalformedFunctionArguments,
                index,
                format!("invalid contents in {}-block", self.token),
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{KeywordMatcher, Quantifier};
    use crate::token::CSSToken;

    fn function(name: &str, args: Vec<CSSToken>) -> ComponentValue {
        ComponentValue::Function {
            name: name.to_string(),
            value: args.into_iter().map(ComponentValue::Token).collect(),
        }
    }

    #[test]
    fn test_function_name_is_case_insensitive() {
        let matcher = FunctionMatcher::of("rotateX", KeywordMatcher::one("a"));
        let values = vec![function("ROTATEX", vec![CSSToken::ident("a")])];
        assert!(matcher.matches_all(&values, &mut MatchContext::new()));
    }

    #[test]
    fn test_function_requires_whole_argument_list() {
        let matcher = FunctionMatcher::of("f", KeywordMatcher::one("a"));
        let values = vec![function(
            "f",
            vec![CSSToken::ident("a"), CSSToken::Whitespace, CSSToken::ident("a")],
        )];
        let mut ctx = MatchContext::new();
        assert!(!matcher.matches_all(&values, &mut ctx));
        assert_eq!(
            ctx.hints()[0].code,
            DiagnosticCode::MalformedFunctionArguments
        );
        assert_eq!(ctx.hints()[0].offset, 0);
    }

    #[test]
    fn test_function_with_empty_arguments() {
        let matcher = FunctionMatcher::of("f", Quantifier::optional(KeywordMatcher::one("a")));
        let values = vec![function("f", vec![])];
        assert!(matcher.matches_all(&values, &mut MatchContext::new()));
    }

    #[test]
    fn test_block_kind_must_match() {
        let matcher = BlockMatcher::of('[', KeywordMatcher::one("a"));
        let square = vec![ComponentValue::Block {
            token: '[',
            value: vec![ComponentValue::Token(CSSToken::ident("a"))],
        }];
        let paren = vec![ComponentValue::Block {
            token: '(',
            value: vec![ComponentValue::Token(CSSToken::ident("a"))],
        }];
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&square, &mut ctx));
        assert!(!matcher.matches_all(&paren, &mut ctx));
    }
}
