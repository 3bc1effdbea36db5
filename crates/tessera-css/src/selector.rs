//! Selector grammars per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
//!
//! Selectors are validated with the same matchers as property values. The
//! places where CSS forbids whitespace (between `.` and a class name, between
//! `:` and a pseudo-class, inside a compound selector) are expressed with
//! [`NoWhitespace`]; everywhere else whitespace is insignificant, which makes a
//! descendant combinator a plain juxtaposition of compound selectors.
//!
//! ```text
//!   div.note > p:not(.hidden), #main
//!   └─compound─┘ │ └─compound──────┘  └─compound
//!        └── complex ─────────────┘
//!   └──────────── selector list ─────────────────┘
//! ```
//!
//! Matcher trees are finite, so selector arguments to `:not()`, `:is()`,
//! `:where()`, and `:has()` nest at most [`MAX_SELECTOR_NESTING`] levels.

use crate::grammar::{
    Alternative, BlockMatcher, DelimMatcher, FunctionMatcher, Juxtaposition, KeywordMatcher,
    MatcherRef, NoWhitespace, Quantifier, TokenMatcher,
};
use crate::token::{CSSToken, HashType, TokenKind};

/// How deeply selector-taking pseudo-classes may nest.
pub const MAX_SELECTOR_NESTING: usize = 3;

fn ident() -> MatcherRef {
    TokenMatcher::any(TokenKind::Ident)
}

fn colon() -> MatcherRef {
    TokenMatcher::any(TokenKind::Colon)
}

/// `a` followed immediately by `b`.
fn touching(a: MatcherRef, b: MatcherRef) -> MatcherRef {
    Juxtaposition::of([a, NoWhitespace::of(), b])
}

/// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
/// and [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
fn type_selector() -> MatcherRef {
    Alternative::of([ident(), DelimMatcher::of('*')])
}

/// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
///
/// "The class selector is given as a full stop (. U+002E) immediately
/// followed by an identifier."
fn class_selector() -> MatcherRef {
    touching(DelimMatcher::of('.'), ident())
}

/// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
fn id_selector() -> MatcherRef {
    TokenMatcher::of(TokenKind::Hash, |token| {
        matches!(
            token,
            CSSToken::Hash {
                hash_type: HashType::Id,
                ..
            }
        )
    })
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// `[attr]`, `[attr=value]`, `[attr~=value]`, ... with an optional `i` or `s`
/// case-sensitivity flag.
fn attribute_selector() -> MatcherRef {
    let operator = Alternative::of([
        touching(DelimMatcher::any_of(&['~', '|', '^', '$', '*']), DelimMatcher::of('=')),
        DelimMatcher::of('='),
    ]);
    let value = Alternative::of([ident(), TokenMatcher::any(TokenKind::String)]);
    BlockMatcher::of(
        '[',
        Juxtaposition::of([
            ident(),
            Quantifier::optional(Juxtaposition::of([
                operator,
                value,
                Quantifier::optional(KeywordMatcher::of(["i", "s"])),
            ])),
        ]),
    )
}

/// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
///
/// "`<an+b> [ of <complex-real-selector-list> ]?`"
///
/// The tokenizer splits `2n+1` into a dimension and a signed number, `-n+3`
/// into an ident and a number, so `<an+b>` is accepted as a run of those.
fn nth_arguments(selectors: Option<&MatcherRef>) -> MatcherRef {
    let an_plus_b = Quantifier::count(
        Alternative::of([
            TokenMatcher::of(TokenKind::Ident, |token| {
                token.text().is_some_and(|text| !text.eq_ignore_ascii_case("of"))
            }),
            TokenMatcher::any(TokenKind::Number),
            TokenMatcher::any(TokenKind::Dimension),
            DelimMatcher::any_of(&['+', '-']),
        ]),
        1,
        4,
    );
    match selectors {
        Some(selectors) => Juxtaposition::of([
            an_plus_b,
            Quantifier::optional(Juxtaposition::of([
                KeywordMatcher::one("of"),
                selectors.clone(),
            ])),
        ]),
        None => an_plus_b,
    }
}

/// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
///
/// "Pseudo-classes are syntactically represented by a Colon (:) followed by
/// the name of the pseudo-class as an identifier or a functional notation."
///
/// Any identifier is accepted as a pseudo-class name. Functional forms are
/// limited to the ones listed here; `selectors` supplies the argument grammar
/// for the selector-taking ones, if nesting is still allowed.
fn pseudo_class(selectors: Option<&MatcherRef>, relative: Option<&MatcherRef>) -> MatcherRef {
    let mut functions = vec![
        FunctionMatcher::of("nth-child", nth_arguments(selectors)),
        FunctionMatcher::of("nth-last-child", nth_arguments(selectors)),
        FunctionMatcher::of("nth-of-type", nth_arguments(None)),
        FunctionMatcher::of("nth-last-of-type", nth_arguments(None)),
        FunctionMatcher::of(
            "lang",
            Quantifier::hash_unbounded(
                Alternative::of([ident(), TokenMatcher::any(TokenKind::String)]),
                1,
            ),
        ),
        FunctionMatcher::of("dir", KeywordMatcher::of(["ltr", "rtl"])),
    ];
    if let Some(selectors) = selectors {
        functions.extend(
            ["not", "is", "where", "matches"]
                .into_iter()
                .map(|name| FunctionMatcher::of(name, selectors.clone())),
        );
    }
    if let Some(relative) = relative {
        functions.push(FunctionMatcher::of("has", relative.clone()));
    }
    functions.push(ident());
    touching(colon(), Alternative::of(functions))
}

/// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
///
/// "Pseudo-elements are represented by two colons (::) followed by the name."
fn pseudo_element(compound: Option<&MatcherRef>) -> MatcherRef {
    let mut names = vec![FunctionMatcher::of("part", Quantifier::plus(ident()))];
    if let Some(compound) = compound {
        names.push(FunctionMatcher::of("slotted", compound.clone()));
    }
    names.push(ident());
    touching(touching(colon(), colon()), Alternative::of(names))
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// `>`, `+`, and `~`. The descendant combinator is whitespace, which matchers
/// skip; two compound selectors side by side express it.
fn combinator() -> MatcherRef {
    Alternative::of([
        DelimMatcher::any_of(&['>', '+', '~']),
        // "||" column combinator
        touching(DelimMatcher::of('|'), DelimMatcher::of('|')),
    ])
}

/// The grammars of one nesting level.
struct Level {
    compound: MatcherRef,
    complex: MatcherRef,
    list: MatcherRef,
    relative_list: MatcherRef,
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#structure)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator." A type selector, if present, comes first.
fn level(inner: Option<&Level>) -> Level {
    let nested_list = inner.map(|l| &l.list);
    let nested_relative = inner.map(|l| &l.relative_list);
    let nested_compound = inner.map(|l| &l.compound);

    let subclass = Alternative::of([
        class_selector(),
        id_selector(),
        attribute_selector(),
        pseudo_element(nested_compound),
        pseudo_class(nested_list, nested_relative),
    ]);
    let more = Quantifier::star(Juxtaposition::of([NoWhitespace::of(), subclass.clone()]));
    let compound = Juxtaposition::of([Alternative::of([type_selector(), subclass]), more]);

    let complex = Juxtaposition::of([
        compound.clone(),
        Quantifier::star(Juxtaposition::of([
            Quantifier::optional(combinator()),
            compound.clone(),
        ])),
    ]);
    let list = Quantifier::hash_unbounded(complex.clone(), 1);
    let relative_list = Quantifier::hash_unbounded(
        Juxtaposition::of([Quantifier::optional(combinator()), complex.clone()]),
        1,
    );
    Level {
        compound,
        complex,
        list,
        relative_list,
    }
}

fn nested_level(depth: usize) -> Level {
    (0..depth).fold(level(None), |inner, _| level(Some(&inner)))
}

/// [§ 3.1 Structure and Terminology](https://www.w3.org/TR/selectors-4/#structure)
///
/// "A selector list is a comma-separated list of selectors."
///
/// The grammar for a style rule's prelude.
#[must_use]
pub fn selector_list() -> MatcherRef {
    nested_level(MAX_SELECTOR_NESTING).list
}

/// A single complex selector, without the list.
#[must_use]
pub fn complex_selector() -> MatcherRef {
    nested_level(MAX_SELECTOR_NESTING).complex
}

/// [§ 3.1 Declaring Keyframes](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// "`<keyframe-selector> = from | to | <percentage [0,100]>`", as a list.
#[must_use]
pub fn keyframe_selector_list() -> MatcherRef {
    Quantifier::hash_unbounded(
        Alternative::of([
            KeywordMatcher::of(["from", "to"]),
            TokenMatcher::of(TokenKind::Percentage, |token| {
                token
                    .numeric_value()
                    .is_some_and(|v| (0.0..=100.0).contains(&v))
            }),
        ]),
        1,
    )
}

/// [§ 3.2 Page selectors](https://www.w3.org/TR/css-page-3/#syntax-page-selector)
///
/// "`<page-selector-list> = <page-selector>#`" where
/// "`<page-selector> = [ <ident-token>? <pseudo-page>* ]!`".
/// An empty prelude is also accepted.
#[must_use]
pub fn page_selector_list() -> MatcherRef {
    let pseudo_page = touching(
        colon(),
        KeywordMatcher::of(["left", "right", "first", "blank"]),
    );
    let more = Quantifier::star(Juxtaposition::of([NoWhitespace::of(), pseudo_page.clone()]));
    let page_selector = Alternative::of([
        Juxtaposition::of([ident(), more.clone()]),
        Juxtaposition::of([pseudo_page, more]),
    ]);
    Quantifier::optional(Quantifier::hash_unbounded(page_selector, 1))
}
