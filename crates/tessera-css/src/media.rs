//! [Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/) prelude grammar.
//!
//! "`<media-query-list> = <media-query>#`"
//!
//! Feature names and values are checked for shape only: any identifier is a
//! feature name, and a feature value is a number, dimension, identifier, or
//! ratio.

use crate::grammar::{
    Alternative, BlockMatcher, DelimMatcher, Juxtaposition, KeywordMatcher, MatcherFactory,
    MatcherRef, NoWhitespace, Quantifier, TokenMatcher,
};
use crate::token::TokenKind;

/// How deeply parenthesized media conditions may nest.
pub const MAX_CONDITION_NESTING: usize = 4;

/// Words that cannot be a `<media-type>`.
const RESERVED: &[&str] = &["only", "not", "and", "or", "layer"];

fn feature_name() -> MatcherRef {
    TokenMatcher::any(TokenKind::Ident)
}

/// "`<mf-value> = <number> | <dimension> | <ident> | <ratio>`"
fn feature_value(factory: &dyn MatcherFactory) -> MatcherRef {
    let ratio = Juxtaposition::of([
        factory.number(),
        DelimMatcher::of('/'),
        factory.number(),
    ]);
    Alternative::of([
        ratio,
        factory.number(),
        TokenMatcher::any(TokenKind::Dimension),
        TokenMatcher::any(TokenKind::Ident),
    ])
}

/// "`<mf-comparison> = <mf-lt> | <mf-gt> | <mf-eq>`"
///
/// `<=` arrives as two delimiters, which must touch.
fn comparison() -> MatcherRef {
    Alternative::of([
        Juxtaposition::of([
            DelimMatcher::any_of(&['<', '>']),
            Quantifier::optional(Juxtaposition::of([NoWhitespace::of(), DelimMatcher::of('=')])),
        ]),
        DelimMatcher::of('='),
    ])
}

/// [§ 3 Syntax](https://www.w3.org/TR/mediaqueries-4/#mq-syntax)
///
/// "`<media-feature> = ( [ <mf-plain> | <mf-boolean> | <mf-range> ] )`"
fn media_feature(factory: &dyn MatcherFactory) -> MatcherRef {
    let value = feature_value(factory);
    let plain = Juxtaposition::of([
        feature_name(),
        TokenMatcher::any(TokenKind::Colon),
        value.clone(),
    ]);
    let range = Alternative::of([
        Juxtaposition::of([feature_name(), comparison(), value.clone()]),
        Juxtaposition::of([value.clone(), comparison(), feature_name()]),
        Juxtaposition::of([
            value.clone(),
            comparison(),
            feature_name(),
            comparison(),
            value,
        ]),
    ]);
    BlockMatcher::of('(', Alternative::of([plain, range, feature_name()]))
}

/// "`<media-condition>`", with `( <media-condition> )` nesting `depth` levels.
fn media_condition(factory: &dyn MatcherFactory, depth: usize, allow_or: bool) -> MatcherRef {
    let in_parens = if depth == 0 {
        media_feature(factory)
    } else {
        Alternative::of([
            media_feature(factory),
            BlockMatcher::of('(', media_condition(factory, depth - 1, true)),
        ])
    };
    let not = Juxtaposition::of([KeywordMatcher::one("not"), in_parens.clone()]);
    let and_chain = Quantifier::plus(Juxtaposition::of([
        KeywordMatcher::one("and"),
        in_parens.clone(),
    ]));
    let mut chains = vec![and_chain];
    if allow_or {
        chains.push(Quantifier::plus(Juxtaposition::of([
            KeywordMatcher::one("or"),
            in_parens.clone(),
        ])));
    }
    Alternative::of([
        not,
        Juxtaposition::of([
            in_parens,
            Quantifier::optional(Alternative::of(chains)),
        ]),
    ])
}

/// "`<media-query> = <media-condition> | [ not | only ]? <media-type>
/// [ and <media-condition-without-or> ]?`"
fn media_query(factory: &dyn MatcherFactory) -> MatcherRef {
    let media_type = TokenMatcher::of(TokenKind::Ident, |token| {
        token
            .text()
            .is_some_and(|t| !RESERVED.iter().any(|r| r.eq_ignore_ascii_case(t)))
    });
    Alternative::of([
        media_condition(factory, MAX_CONDITION_NESTING, true),
        Juxtaposition::of([
            Quantifier::optional(KeywordMatcher::of(["not", "only"])),
            media_type,
            Quantifier::optional(Juxtaposition::of([
                KeywordMatcher::one("and"),
                media_condition(factory, MAX_CONDITION_NESTING, false),
            ])),
        ]),
    ])
}

/// The grammar for an `@media` prelude.
///
/// An empty prelude is accepted: "An empty media query list evaluates to
/// true."
#[must_use]
pub fn media_query_list(factory: &dyn MatcherFactory) -> MatcherRef {
    Quantifier::optional(Quantifier::hash_unbounded(media_query(factory), 1))
}
