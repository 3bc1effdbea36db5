//! [CSS Fonts Level 4](https://www.w3.org/TR/css-fonts-4/) and
//! [CSS Text Level 3](https://www.w3.org/TR/css-text-3/), plus text decoration
//! and generated content.

use super::{PropertyEntry, kw};
use crate::grammar::{
    Alternative, DelimMatcher, FunctionMatcher, Juxtaposition, MatcherFactory, MatcherRef,
    Quantifier, TokenMatcher, UnorderedGroup,
};
use crate::token::TokenKind;

/// [§ 2.1 Font family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
///
/// "`<family-name> = <string> | <custom-ident>+`"
pub(super) fn family_name(factory: &dyn MatcherFactory) -> MatcherRef {
    Alternative::of([factory.string(), Quantifier::plus(factory.custom_ident())])
}

/// [§ 2.2 Font weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// "`<font-weight-absolute> = [normal | bold | <number [1,1000]>]`"
pub(super) fn font_weight_absolute() -> MatcherRef {
    Alternative::of([
        kw(&["normal", "bold"]),
        TokenMatcher::of(TokenKind::Number, |token| {
            token
                .numeric_value()
                .is_some_and(|v| (1.0..=1000.0).contains(&v))
        }),
    ])
}

/// [§ 2.3 Font width](https://www.w3.org/TR/css-fonts-4/#font-stretch-prop)
pub(super) fn font_stretch_keywords() -> MatcherRef {
    kw(&[
        "normal",
        "ultra-condensed",
        "extra-condensed",
        "condensed",
        "semi-condensed",
        "semi-expanded",
        "expanded",
        "extra-expanded",
        "ultra-expanded",
    ])
}

/// [§ 6.12 Low-level font feature settings](https://www.w3.org/TR/css-fonts-4/#font-feature-settings-prop)
///
/// "`normal | <feature-tag-value>#`" where
/// "`<feature-tag-value> = <opentype-tag> [ <integer [0,∞]> | on | off ]?`"
pub(super) fn font_feature_settings(factory: &dyn MatcherFactory) -> MatcherRef {
    Alternative::of([
        kw(&["normal"]),
        Quantifier::hash_unbounded(
            Juxtaposition::of([
                factory.string(),
                Quantifier::optional(Alternative::of([factory.integer(), kw(&["on", "off"])])),
            ]),
            1,
        ),
    ])
}

/// [§ 6.11 Overall shorthand for font rendering](https://www.w3.org/TR/css-fonts-4/#font-variant-prop)
pub(super) fn font_variant() -> MatcherRef {
    Alternative::of([
        kw(&["normal", "none"]),
        UnorderedGroup::some_of([
            kw(&[
                "small-caps",
                "all-small-caps",
                "petite-caps",
                "all-petite-caps",
                "unicase",
                "titling-caps",
            ]),
            kw(&["lining-nums", "oldstyle-nums"]),
            kw(&["proportional-nums", "tabular-nums"]),
            kw(&["diagonal-fractions", "stacked-fractions"]),
            kw(&["ordinal"]),
            kw(&["slashed-zero"]),
            kw(&["common-ligatures", "no-common-ligatures"]),
            kw(&["discretionary-ligatures", "no-discretionary-ligatures"]),
        ]),
    ])
}

pub(super) fn properties(factory: &dyn MatcherFactory) -> Vec<PropertyEntry> {
    let lp = factory.length_percentage();
    let generic = kw(&[
        "serif",
        "sans-serif",
        "monospace",
        "cursive",
        "fantasy",
        "system-ui",
        "ui-serif",
        "ui-sans-serif",
        "ui-monospace",
        "math",
    ]);
    let font_family = Quantifier::hash_unbounded(
        Alternative::of([generic, family_name(factory)]),
        1,
    );
    let font_size = Alternative::of([
        kw(&[
            "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
            "xxx-large", "larger", "smaller",
        ]),
        lp.clone(),
    ]);
    let font_style = Alternative::of([
        kw(&["normal", "italic"]),
        Juxtaposition::of([kw(&["oblique"]), Quantifier::optional(factory.angle())]),
    ]);
    let font_weight = Alternative::of([font_weight_absolute(), kw(&["bolder", "lighter"])]);
    let font_stretch = Alternative::of([font_stretch_keywords(), factory.percentage()]);
    let line_height = Alternative::of([kw(&["normal"]), factory.number(), lp.clone()]);

    let decoration_line = Alternative::of([
        kw(&["none"]),
        UnorderedGroup::some_of([
            kw(&["underline"]),
            kw(&["overline"]),
            kw(&["line-through"]),
        ]),
    ]);
    let decoration_style = kw(&["solid", "double", "dotted", "dashed", "wavy"]);
    let spacing = Alternative::of([kw(&["normal"]), factory.length()]);

    vec![
        ("font-family", font_family.clone()),
        ("font-size", font_size.clone()),
        ("font-style", font_style.clone()),
        ("font-weight", font_weight.clone()),
        ("font-stretch", font_stretch.clone()),
        ("font-variant", font_variant()),
        ("font-feature-settings", font_feature_settings(factory)),
        ("line-height", line_height.clone()),
        (
            "font",
            Alternative::of([
                kw(&[
                    "caption",
                    "icon",
                    "menu",
                    "message-box",
                    "small-caption",
                    "status-bar",
                ]),
                Juxtaposition::of([
                    Quantifier::optional(UnorderedGroup::some_of([
                        font_style,
                        kw(&["small-caps"]),
                        font_weight,
                        font_stretch,
                    ])),
                    font_size,
                    Quantifier::optional(Juxtaposition::of([DelimMatcher::of('/'), line_height])),
                    font_family,
                ]),
            ]),
        ),
        (
            "text-align",
            kw(&["start", "end", "left", "right", "center", "justify", "match-parent"]),
        ),
        (
            "text-transform",
            kw(&["none", "capitalize", "uppercase", "lowercase", "full-width"]),
        ),
        ("text-indent", lp),
        ("text-overflow", kw(&["clip", "ellipsis"])),
        ("letter-spacing", spacing.clone()),
        ("word-spacing", spacing),
        (
            "white-space",
            kw(&["normal", "pre", "nowrap", "pre-wrap", "break-spaces", "pre-line"]),
        ),
        (
            "word-break",
            kw(&["normal", "keep-all", "break-all", "break-word"]),
        ),
        ("overflow-wrap", kw(&["normal", "break-word", "anywhere"])),
        ("hyphens", kw(&["none", "manual", "auto"])),
        ("direction", kw(&["ltr", "rtl"])),
        (
            "unicode-bidi",
            kw(&[
                "normal",
                "embed",
                "isolate",
                "bidi-override",
                "isolate-override",
                "plaintext",
            ]),
        ),
        (
            "writing-mode",
            kw(&["horizontal-tb", "vertical-rl", "vertical-lr", "sideways-rl", "sideways-lr"]),
        ),
        ("text-decoration-line", decoration_line.clone()),
        ("text-decoration-style", decoration_style.clone()),
        ("text-decoration-color", factory.color()),
        (
            "text-decoration",
            UnorderedGroup::some_of([decoration_line, decoration_style, factory.color()]),
        ),
        (
            "text-shadow",
            Alternative::of([
                kw(&["none"]),
                Quantifier::hash_unbounded(
                    UnorderedGroup::all_of([
                        Quantifier::count(factory.length(), 2, 3),
                        Quantifier::optional(factory.color()),
                    ]),
                    1,
                ),
            ]),
        ),
        (
            "content",
            Alternative::of([
                kw(&["normal", "none"]),
                Quantifier::plus(Alternative::of([
                    factory.string(),
                    factory.image(),
                    FunctionMatcher::of("counter", factory.custom_ident()),
                    FunctionMatcher::of("attr", factory.custom_ident()),
                    kw(&["open-quote", "close-quote", "no-open-quote", "no-close-quote"]),
                ])),
            ]),
        ),
    ]
}
