//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/),
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/), and
//! [Filter Effects Level 1](https://www.w3.org/TR/filter-effects-1/).

use super::{PropertyEntry, kw};
use crate::grammar::{
    Alternative, DelimMatcher, FunctionMatcher, Juxtaposition, MatcherFactory, MatcherRef,
    Quantifier, UnorderedGroup,
};

/// [§ 4.2 Line Styles](https://www.w3.org/TR/css-backgrounds-3/#border-style)
pub(super) fn line_style() -> MatcherRef {
    kw(&[
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
        "outset",
    ])
}

/// [§ 4.3 Line Thickness](https://www.w3.org/TR/css-backgrounds-3/#border-width)
pub(super) fn line_width(factory: &dyn MatcherFactory) -> MatcherRef {
    Alternative::of([kw(&["thin", "medium", "thick"]), factory.length()])
}

/// `<box>`: "`<box> = border-box | padding-box | content-box`"
pub(super) fn box_keywords() -> MatcherRef {
    kw(&["border-box", "padding-box", "content-box"])
}

/// [§ 2 Filter Functions](https://www.w3.org/TR/filter-effects-1/#filter-functions)
fn filter_function(factory: &dyn MatcherFactory) -> MatcherRef {
    let amount = Quantifier::optional(Alternative::of([factory.number(), factory.percentage()]));
    let mut functions = vec![
        FunctionMatcher::of("blur", Quantifier::optional(factory.length())),
        FunctionMatcher::of(
            "hue-rotate",
            Quantifier::optional(Alternative::of([factory.angle(), factory.zero()])),
        ),
        FunctionMatcher::of(
            "drop-shadow",
            UnorderedGroup::all_of([
                Quantifier::optional(factory.color()),
                Quantifier::count(factory.length(), 2, 3),
            ]),
        ),
    ];
    for name in [
        "brightness",
        "contrast",
        "grayscale",
        "invert",
        "opacity",
        "saturate",
        "sepia",
    ] {
        functions.push(FunctionMatcher::of(name, amount.clone()));
    }
    Alternative::of(functions)
}

pub(super) fn properties(factory: &dyn MatcherFactory) -> Vec<PropertyEntry> {
    let color = factory.color();
    let lp = factory.length_percentage();
    let style = line_style();
    let width = line_width(factory);

    let mut props: Vec<PropertyEntry> = vec![
        ("color", color.clone()),
        (
            "opacity",
            Alternative::of([factory.number(), factory.percentage()]),
        ),
    ];

    // Backgrounds
    let bg_image = Alternative::of([kw(&["none"]), factory.image()]);
    let repeat_style = Alternative::of([
        kw(&["repeat-x", "repeat-y"]),
        Quantifier::count(kw(&["repeat", "space", "round", "no-repeat"]), 1, 2),
    ]);
    let attachment = kw(&["scroll", "fixed", "local"]);
    let bg_size = Alternative::of([
        kw(&["cover", "contain"]),
        Quantifier::count(Alternative::of([kw(&["auto"]), lp.clone()]), 1, 2),
    ]);
    let bg_layer = UnorderedGroup::some_of([
        bg_image.clone(),
        Juxtaposition::of([
            factory.position(),
            Quantifier::optional(Juxtaposition::of([DelimMatcher::of('/'), bg_size.clone()])),
        ]),
        repeat_style.clone(),
        attachment.clone(),
        box_keywords(),
        box_keywords(),
        color.clone(),
    ]);
    props.extend([
        ("background-color", color.clone()),
        ("background-image", Quantifier::hash_unbounded(bg_image, 1)),
        ("background-repeat", Quantifier::hash_unbounded(repeat_style, 1)),
        ("background-attachment", Quantifier::hash_unbounded(attachment, 1)),
        (
            "background-position",
            Quantifier::hash_unbounded(factory.position(), 1),
        ),
        ("background-size", Quantifier::hash_unbounded(bg_size, 1)),
        (
            "background-origin",
            Quantifier::hash_unbounded(box_keywords(), 1),
        ),
        ("background-clip", Quantifier::hash_unbounded(box_keywords(), 1)),
        ("background", Quantifier::hash_unbounded(bg_layer, 1)),
    ]);

    // Borders
    let border = UnorderedGroup::some_of([width.clone(), style.clone(), color.clone()]);
    props.extend([
        ("border", border.clone()),
        ("border-style", Quantifier::count(style.clone(), 1, 4)),
        ("border-width", Quantifier::count(width.clone(), 1, 4)),
        ("border-color", Quantifier::count(color.clone(), 1, 4)),
        ("border-collapse", kw(&["collapse", "separate"])),
        ("border-spacing", Quantifier::count(factory.length(), 1, 2)),
        (
            "border-radius",
            Juxtaposition::of([
                Quantifier::count(lp.clone(), 1, 4),
                Quantifier::optional(Juxtaposition::of([
                    DelimMatcher::of('/'),
                    Quantifier::count(lp.clone(), 1, 4),
                ])),
            ]),
        ),
    ]);
    for [shorthand, side_style, side_width, side_color] in BORDER_SIDES {
        props.extend([
            (shorthand, border.clone()),
            (side_style, style.clone()),
            (side_width, width.clone()),
            (side_color, color.clone()),
        ]);
    }
    for corner in [
        "border-top-left-radius",
        "border-top-right-radius",
        "border-bottom-right-radius",
        "border-bottom-left-radius",
    ] {
        props.push((corner, Quantifier::count(lp.clone(), 1, 2)));
    }

    // Outlines and shadows
    props.extend([
        (
            "outline",
            UnorderedGroup::some_of([
                Alternative::of([color.clone(), kw(&["invert"])]),
                Alternative::of([kw(&["auto"]), style.clone()]),
                width.clone(),
            ]),
        ),
        ("outline-color", Alternative::of([color.clone(), kw(&["invert"])])),
        ("outline-style", Alternative::of([kw(&["auto"]), style])),
        ("outline-width", width),
        ("outline-offset", factory.length()),
        (
            "box-shadow",
            Alternative::of([
                kw(&["none"]),
                Quantifier::hash_unbounded(
                    UnorderedGroup::all_of([
                        Quantifier::optional(kw(&["inset"])),
                        Quantifier::count(factory.length(), 2, 4),
                        Quantifier::optional(color),
                    ]),
                    1,
                ),
            ]),
        ),
    ]);

    // Filters and compositing
    props.extend([
        (
            "filter",
            Alternative::of([kw(&["none"]), Quantifier::plus(filter_function(factory))]),
        ),
        (
            "mix-blend-mode",
            kw(&[
                "normal",
                "multiply",
                "screen",
                "overlay",
                "darken",
                "lighten",
                "color-dodge",
                "color-burn",
                "hard-light",
                "soft-light",
                "difference",
                "exclusion",
                "hue",
                "saturation",
                "color",
                "luminosity",
            ]),
        ),
        ("isolation", kw(&["auto", "isolate"])),
    ]);

    props
}

/// `border-<side>` shorthands with their style, width, and color longhands.
const BORDER_SIDES: [[&str; 4]; 4] = [
    ["border-top", "border-top-style", "border-top-width", "border-top-color"],
    ["border-right", "border-right-style", "border-right-width", "border-right-color"],
    ["border-bottom", "border-bottom-style", "border-bottom-width", "border-bottom-color"],
    ["border-left", "border-left-style", "border-left-width", "border-left-color"],
];
