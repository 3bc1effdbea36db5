//! Box model, sizing, positioning, display, and flexible box layout.

use super::{PropertyEntry, kw};
use crate::grammar::{
    Alternative, FunctionMatcher, Juxtaposition, MatcherFactory, MatcherRef, Quantifier,
    UnorderedGroup,
};

/// [§ 4.1 Preferred Size Properties](https://www.w3.org/TR/css-sizing-3/#preferred-size-properties)
/// and [§ 4.2 Min/Max Size Properties](https://www.w3.org/TR/css-sizing-3/#min-size-properties)
///
/// "`auto | <length-percentage [0,∞]> | min-content | max-content | fit-content(<length-percentage [0,∞]>)`"
///
/// `additions` are extra alternatives accepted by every sizing property, such
/// as a `clamp()` function.
#[must_use]
pub fn sizing_properties(
    factory: &dyn MatcherFactory,
    additions: &[MatcherRef],
) -> Vec<PropertyEntry> {
    let lp = factory.length_percentage();
    let sizing = |first: &str| {
        let mut alternatives = vec![
            kw(&[first, "min-content", "max-content"]),
            lp.clone(),
            FunctionMatcher::of("fit-content", lp.clone()),
        ];
        alternatives.extend(additions.iter().cloned());
        Alternative::of(alternatives)
    };
    let auto = sizing("auto");
    let none = sizing("none");
    vec![
        ("width", auto.clone()),
        ("height", auto.clone()),
        ("inline-size", auto.clone()),
        ("block-size", auto.clone()),
        ("min-width", auto.clone()),
        ("min-height", auto.clone()),
        ("min-inline-size", auto.clone()),
        ("min-block-size", auto),
        ("max-width", none.clone()),
        ("max-height", none.clone()),
        ("max-inline-size", none.clone()),
        ("max-block-size", none),
    ]
}

/// `margin` or `padding`: the four-side shorthand, each physical and logical
/// side, and the two-value block/inline axis shorthands.
struct BoxSides {
    shorthand: &'static str,
    sides: [&'static str; 8],
    axes: [&'static str; 2],
}

impl BoxSides {
    fn entries(&self, value: &MatcherRef) -> Vec<PropertyEntry> {
        let mut props = vec![(self.shorthand, Quantifier::count(value.clone(), 1, 4))];
        props.extend(self.sides.iter().map(|side| (*side, value.clone())));
        props.extend(
            self.axes
                .iter()
                .map(|axis| (*axis, Quantifier::count(value.clone(), 1, 2))),
        );
        props
    }
}

const MARGIN: BoxSides = BoxSides {
    shorthand: "margin",
    sides: [
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "margin-block-start",
        "margin-block-end",
        "margin-inline-start",
        "margin-inline-end",
    ],
    axes: ["margin-block", "margin-inline"],
};

const PADDING: BoxSides = BoxSides {
    shorthand: "padding",
    sides: [
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "padding-block-start",
        "padding-block-end",
        "padding-inline-start",
        "padding-inline-end",
    ],
    axes: ["padding-block", "padding-inline"],
};

/// The box model, display, positioning, overflow, flexbox, and list properties.
pub(super) fn properties(factory: &dyn MatcherFactory) -> Vec<PropertyEntry> {
    let lp = factory.length_percentage();
    let auto_lp = Alternative::of([kw(&["auto"]), lp.clone()]);
    let overflow = kw(&["visible", "hidden", "clip", "scroll", "auto"]);
    let flex_basis = Alternative::of([kw(&["content", "auto", "min-content", "max-content"]), lp.clone()]);
    let content_position = kw(&["center", "start", "end", "flex-start", "flex-end", "left", "right"]);
    let distribution = kw(&["space-between", "space-around", "space-evenly", "stretch"]);
    let baseline = Juxtaposition::of([
        Quantifier::optional(kw(&["first", "last"])),
        kw(&["baseline"]),
    ]);
    let self_position = kw(&["center", "start", "end", "self-start", "self-end", "flex-start", "flex-end"]);
    let gap = Alternative::of([kw(&["normal"]), lp.clone()]);

    let mut props: Vec<PropertyEntry> = sizing_properties(factory, &[]);
    props.extend([
        (
            "display",
            kw(&[
                "block",
                "inline",
                "inline-block",
                "flex",
                "inline-flex",
                "grid",
                "inline-grid",
                "flow-root",
                "list-item",
                "table",
                "inline-table",
                "table-row",
                "table-cell",
                "table-column",
                "table-row-group",
                "table-header-group",
                "table-footer-group",
                "table-caption",
                "contents",
                "none",
            ]),
        ),
        ("box-sizing", kw(&["content-box", "border-box"])),
        ("position", kw(&["static", "relative", "absolute", "fixed", "sticky"])),
        ("top", auto_lp.clone()),
        ("right", auto_lp.clone()),
        ("bottom", auto_lp.clone()),
        ("left", auto_lp.clone()),
        ("z-index", Alternative::of([kw(&["auto"]), factory.integer()])),
        ("float", kw(&["left", "right", "none", "inline-start", "inline-end"])),
        ("clear", kw(&["none", "left", "right", "both", "inline-start", "inline-end"])),
        ("visibility", kw(&["visible", "hidden", "collapse"])),
        ("overflow", Quantifier::count(overflow.clone(), 1, 2)),
        ("overflow-x", overflow.clone()),
        ("overflow-y", overflow),
        (
            "vertical-align",
            Alternative::of([
                kw(&[
                    "baseline",
                    "sub",
                    "super",
                    "text-top",
                    "text-bottom",
                    "middle",
                    "top",
                    "bottom",
                ]),
                lp.clone(),
            ]),
        ),
        ("object-fit", kw(&["fill", "contain", "cover", "none", "scale-down"])),
        ("object-position", factory.position()),
        ("table-layout", kw(&["auto", "fixed"])),
        ("caption-side", kw(&["top", "bottom"])),
        ("empty-cells", kw(&["show", "hide"])),
        (
            "cursor",
            kw(&[
                "auto",
                "default",
                "none",
                "context-menu",
                "help",
                "pointer",
                "progress",
                "wait",
                "cell",
                "crosshair",
                "text",
                "vertical-text",
                "alias",
                "copy",
                "move",
                "no-drop",
                "not-allowed",
                "grab",
                "grabbing",
                "col-resize",
                "row-resize",
                "zoom-in",
                "zoom-out",
            ]),
        ),
        ("resize", kw(&["none", "both", "horizontal", "vertical", "block", "inline"])),
    ]);

    // Flexible box layout
    props.extend([
        ("flex-direction", kw(&["row", "row-reverse", "column", "column-reverse"])),
        ("flex-wrap", kw(&["nowrap", "wrap", "wrap-reverse"])),
        (
            "flex-flow",
            UnorderedGroup::some_of([
                kw(&["row", "row-reverse", "column", "column-reverse"]),
                kw(&["nowrap", "wrap", "wrap-reverse"]),
            ]),
        ),
        ("flex-grow", factory.number()),
        ("flex-shrink", factory.number()),
        ("flex-basis", flex_basis.clone()),
        (
            "flex",
            Alternative::of([
                kw(&["none"]),
                UnorderedGroup::some_of([
                    Juxtaposition::of([factory.number(), Quantifier::optional(factory.number())]),
                    flex_basis,
                ]),
            ]),
        ),
        ("order", factory.integer()),
        (
            "justify-content",
            Alternative::of([kw(&["normal"]), content_position.clone(), distribution.clone()]),
        ),
        (
            "align-content",
            Alternative::of([kw(&["normal"]), baseline.clone(), content_position, distribution]),
        ),
        (
            "align-items",
            Alternative::of([kw(&["normal", "stretch"]), baseline.clone(), self_position.clone()]),
        ),
        (
            "align-self",
            Alternative::of([kw(&["auto", "normal", "stretch"]), baseline, self_position]),
        ),
        ("row-gap", gap.clone()),
        ("column-gap", gap.clone()),
        ("gap", Quantifier::count(gap, 1, 2)),
    ]);

    // Lists
    let list_type = Alternative::of([
        kw(&[
            "disc",
            "circle",
            "square",
            "decimal",
            "decimal-leading-zero",
            "lower-roman",
            "upper-roman",
            "lower-alpha",
            "upper-alpha",
            "lower-latin",
            "upper-latin",
            "lower-greek",
            "none",
        ]),
        factory.string(),
    ]);
    let list_position = kw(&["inside", "outside"]);
    let list_image = Alternative::of([kw(&["none"]), factory.image()]);
    props.extend([
        ("list-style-type", list_type.clone()),
        ("list-style-position", list_position.clone()),
        ("list-style-image", list_image.clone()),
        (
            "list-style",
            UnorderedGroup::some_of([list_position, list_image, list_type]),
        ),
    ]);

    props.extend(MARGIN.entries(&auto_lp));
    props.extend(PADDING.entries(&lp));
    props
}
