//! [§ 4 Font Resources](https://www.w3.org/TR/css-fonts-4/#font-resources)
//!
//! "The @font-face rule allows for linking to fonts that are automatically
//! fetched and activated when needed." Its block holds descriptors, not
//! properties, so it gets a registry of its own.

use super::text::{
    family_name, font_feature_settings, font_stretch_keywords, font_variant, font_weight_absolute,
};
use super::kw;
use crate::grammar::{
    Alternative, DelimMatcher, FunctionMatcher, Juxtaposition, MatcherFactory, MatcherRef,
    NoWhitespace, Quantifier, TokenMatcher,
};
use crate::registry::PropertyRegistry;
use crate::token::TokenKind;

/// [§ 7.1 Unicode-Range](https://www.w3.org/TR/css-syntax-3/#urange-syntax)
///
/// "`<urange> = u '+' <ident-token> '?'* | u <dimension-token> '?'* |
/// u <number-token> '?'* | u <number-token> <dimension-token> |
/// u <number-token> <number-token> | u '+' '?'+`"
///
/// The tokenizer splits `U+0025-00FF` into an ident, a signed number, and a
/// dimension. The pieces are accepted when they touch; the code point values
/// themselves are not checked.
fn unicode_range() -> MatcherRef {
    let piece = Alternative::of([
        DelimMatcher::any_of(&['+', '?', '-']),
        TokenMatcher::any(TokenKind::Ident),
        TokenMatcher::any(TokenKind::Number),
        TokenMatcher::any(TokenKind::Dimension),
    ]);
    Juxtaposition::of([
        kw(&["u"]),
        Quantifier::plus(Juxtaposition::of([NoWhitespace::of(), piece])),
    ])
}

/// [§ 4.3 Font reference](https://www.w3.org/TR/css-fonts-4/#src-desc)
///
/// "`<url> [ format(<font-format>) ]? [ tech( <font-tech>#) ]? | local(<family-name>)`"
fn font_src(factory: &dyn MatcherFactory) -> MatcherRef {
    let format = FunctionMatcher::of(
        "format",
        Quantifier::hash_unbounded(Alternative::of([factory.string(), factory.custom_ident()]), 1),
    );
    let tech = FunctionMatcher::of(
        "tech",
        Quantifier::hash_unbounded(factory.custom_ident(), 1),
    );
    Quantifier::hash_unbounded(
        Alternative::of([
            Juxtaposition::of([
                factory.url(),
                Quantifier::optional(format),
                Quantifier::optional(tech),
            ]),
            FunctionMatcher::of("local", family_name(factory)),
        ]),
        1,
    )
}

/// The descriptors accepted inside `@font-face`.
#[must_use]
pub fn font_face_properties(factory: &dyn MatcherFactory) -> PropertyRegistry {
    [
        ("font-family", family_name(factory)),
        ("src", font_src(factory)),
        (
            "font-style",
            Alternative::of([
                kw(&["normal", "italic"]),
                Juxtaposition::of([
                    kw(&["oblique"]),
                    Quantifier::optional(Quantifier::count(factory.angle(), 1, 2)),
                ]),
            ]),
        ),
        (
            "font-weight",
            Alternative::of([
                kw(&["auto"]),
                Quantifier::count(font_weight_absolute(), 1, 2),
            ]),
        ),
        (
            "font-stretch",
            Alternative::of([
                kw(&["auto"]),
                Quantifier::count(
                    Alternative::of([font_stretch_keywords(), factory.percentage()]),
                    1,
                    2,
                ),
            ]),
        ),
        ("unicode-range", Quantifier::hash_unbounded(unicode_range(), 1)),
        ("font-variant", font_variant()),
        ("font-feature-settings", font_feature_settings(factory)),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DefaultMatcherFactory, MatchContext};
    use crate::parser::css_parser::parse_component_values;
    use crate::token::CSSToken;

    #[test]
    fn test_unicode_range_pieces_must_touch() {
        let registry = font_face_properties(&DefaultMatcherFactory);
        let Some(range) = registry.get("unicode-range") else {
            panic!("unicode-range registered");
        };
        let touching = parse_component_values(&[
            CSSToken::ident("U"),
            CSSToken::integer(25),
            CSSToken::dimension(-0.0, Some(0), "FF"),
        ]);
        assert!(range.matches_all(&touching, &mut MatchContext::new()));
        let spaced = parse_component_values(&[
            CSSToken::ident("U"),
            CSSToken::Whitespace,
            CSSToken::integer(25),
        ]);
        assert!(!range.matches_all(&spaced, &mut MatchContext::new()));
    }

    #[test]
    fn test_src_list() {
        let registry = font_face_properties(&DefaultMatcherFactory);
        let Some(src) = registry.get("src") else {
            panic!("src registered");
        };
        let values = parse_component_values(&[
            CSSToken::url("a.woff2"),
            CSSToken::Whitespace,
            CSSToken::function("format"),
            CSSToken::string("woff2"),
            CSSToken::RightParen,
            CSSToken::Comma,
            CSSToken::function("local"),
            CSSToken::string("Foo"),
            CSSToken::RightParen,
        ]);
        assert!(src.matches_all(&values, &mut MatchContext::new()));
    }

    #[test]
    fn test_metric_overrides_are_not_standard() {
        let registry = font_face_properties(&DefaultMatcherFactory);
        assert!(!registry.contains("size-adjust"));
        assert!(registry.contains("FONT-FAMILY"));
    }
}
