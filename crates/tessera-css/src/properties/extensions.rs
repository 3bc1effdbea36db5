//! Additions and overrides layered on the standard property set.
//!
//! Each function here is a [`PropertyExtension`]: it receives the registry
//! built so far and adds properties (rejecting ones already present) or
//! replaces grammars outright. [`TEMPLATE_EXTENSIONS`] lists them in the order
//! [`extended_properties`] applies them.
//!
//! ```text
//!   standard_properties ─► border/background ─► sizing ─► transforms ─► ...
//!                          (override)            (override)  (override)
//!                        ─► image-rendering ─► ruby ─► pointer-events ─► ...
//!                          (add)               (add)   (add)
//! ```

use std::sync::Arc;

use super::visual::{box_keywords, line_style, line_width};
use super::{kw, motion, sizing_properties};
use crate::grammar::{
    Alternative, CustomPropertyMatcher, DelimMatcher, FunctionMatcher, Juxtaposition,
    MatcherFactory, MatcherRef, Quantifier, UnorderedGroup,
};
use crate::registry::{PropertyExtension, PropertyRegistry, RegistryBuilder, RegistryError};

/// Every style-rule extension, in application order, with a label for logging.
pub const TEMPLATE_EXTENSIONS: &[(&str, PropertyExtension)] = &[
    ("border-background", override_border_background),
    ("sizing-functions", add_sizing_functions),
    ("transforms", override_transforms),
    ("transition-behavior", add_transition_behavior),
    ("image-rendering", add_image_rendering),
    ("ruby", add_ruby),
    ("pointer-events", add_pointer_events),
    ("scroll-spacing", add_scroll_spacing),
    ("aspect-ratio", add_aspect_ratio),
    ("inset", add_inset),
    ("backdrop-filter", add_backdrop_filter),
    ("content-visibility", add_content_visibility),
];

/// The standard set with every [`TEMPLATE_EXTENSIONS`] entry applied.
///
/// An extension that fails is skipped with a warning and the rest still apply.
#[must_use]
pub fn extended_properties(factory: Arc<dyn MatcherFactory>) -> PropertyRegistry {
    TEMPLATE_EXTENSIONS
        .iter()
        .fold(RegistryBuilder::standard(factory), |builder, (label, extension)| {
            builder.extend_or_warn(label, *extension)
        })
        .build()
}

/// The `@font-face` descriptors with the font metric overrides applied.
#[must_use]
pub fn extended_font_face_properties(factory: Arc<dyn MatcherFactory>) -> PropertyRegistry {
    let base = super::font_face_properties(factory.as_ref());
    RegistryBuilder::new(base, factory)
        .extend_or_warn("font-metric-overrides", add_font_metric_overrides)
        .build()
}

/// A `var( <custom-property-name> )` reference, or a color.
fn color_or_var(factory: &dyn MatcherFactory) -> MatcherRef {
    Alternative::of([factory.color(), factory.var()])
}

/// `background-clip` gains `text` and `border-area`; `border` and `box-shadow`
/// accept `var()` in place of their color.
///
/// # Errors
///
/// Never fails; grammars are replaced outright.
pub fn override_border_background(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let _ = registry.set("background-origin", box_keywords());
    let _ = registry.set(
        "background-clip",
        Alternative::of([box_keywords(), kw(&["text", "border-area"])]),
    );
    let _ = registry.set(
        "border",
        UnorderedGroup::some_of([line_style(), line_width(factory), color_or_var(factory)]),
    );
    let _ = registry.set(
        "box-shadow",
        Alternative::of([
            kw(&["none"]),
            Quantifier::hash_unbounded(
                UnorderedGroup::all_of([
                    Quantifier::optional(kw(&["inset"])),
                    Quantifier::count(factory.length(), 2, 4),
                    Quantifier::optional(color_or_var(factory)),
                ]),
                1,
            ),
        ]),
    );
    Ok(())
}

/// [§ 10.2 Comparison Functions](https://www.w3.org/TR/css-values-4/#comp-func)
///
/// Sizing properties gain the bare `fit-content` keyword and
/// `clamp( <min> , <val> , <max> )`.
///
/// # Errors
///
/// Never fails; grammars are replaced outright.
pub fn add_sizing_functions(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let clamp_arg = Alternative::of([
        factory.length(),
        factory.length_percentage(),
        factory.frequency(),
        factory.angle(),
        factory.angle_percentage(),
        factory.time(),
        factory.number(),
        factory.integer(),
    ]);
    let additions = [
        kw(&["fit-content"]),
        FunctionMatcher::of("clamp", Quantifier::hash(clamp_arg, 3, 3)),
    ];
    for (name, matcher) in sizing_properties(factory, &additions) {
        let _ = registry.set(name, matcher);
    }
    Ok(())
}

/// [CSS Transforms Level 2](https://www.w3.org/TR/css-transforms-2/)
///
/// `transform` accepts the 3D transform functions; adds `transform-style`.
///
/// # Errors
///
/// Never fails; grammars are replaced outright.
pub fn override_transforms(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let _ = registry.set("transform", motion::transform(factory, true));
    let _ = registry.set("transform-style", kw(&["flat", "preserve-3d"]));
    Ok(())
}

/// [§ 2.5 The transition-behavior property](https://www.w3.org/TR/css-transitions-2/#transition-behavior-property)
///
/// # Errors
///
/// Never fails; the grammar is replaced outright.
pub fn add_transition_behavior(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let _ = registry.set("transition-behavior", kw(&["normal", "allow-discrete"]));
    Ok(())
}

/// [§ 5.3 Determining How To Scale an Image](https://www.w3.org/TR/css-images-3/#the-image-rendering)
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if already registered.
pub fn add_image_rendering(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    registry.add([(
        "image-rendering",
        kw(&["auto", "crisp-edges", "pixelated"]),
    )])
}

/// [CSS Ruby Annotation Layout Level 1](https://www.w3.org/TR/css-ruby-1/)
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if either is already registered.
pub fn add_ruby(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    registry.add([
        (
            "ruby-position",
            kw(&["start", "center", "space-between", "space-around"]),
        ),
        ("ruby-align", kw(&["over", "under", "inter-character"])),
    ])
}

/// [SVG 2 § 16.6 The pointer-events property](https://www.w3.org/TR/SVG2/interact.html#PointerEventsProperty)
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if already registered.
pub fn add_pointer_events(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    registry.add([(
        "pointer-events",
        kw(&[
            "auto",
            "none",
            "visiblePainted",
            "visibleFill",
            "visibleStroke",
            "visible",
            "painted",
            "fill",
            "stroke",
            "all",
        ]),
    )])
}

/// [CSS Scroll Snap § 6](https://www.w3.org/TR/css-scroll-snap-1/#scroll-padding)
///
/// `scroll-margin-*` and `scroll-padding-*`, each a single length.
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if any is already
/// registered; none are added in that case.
pub fn add_scroll_spacing(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    const SUFFIXES: &[&str] = &[
        "margin-block-end",
        "margin-block-start",
        "margin-block",
        "margin-bottom",
        "margin-inline-end",
        "margin-inline-start",
        "margin-inline",
        "margin-left",
        "margin-right",
        "margin-top",
        "margin",
        "padding-block-end",
        "padding-block-start",
        "padding-block",
        "padding-bottom",
        "padding-inline-end",
        "padding-inline-start",
        "padding-inline",
        "padding-left",
        "padding-right",
        "padding-top",
        "padding",
    ];
    let length = factory.length();
    registry.add(
        SUFFIXES
            .iter()
            .map(|suffix| (format!("scroll-{suffix}"), length.clone())),
    )
}

/// [§ 7.1 Preferred Aspect Ratios](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
///
/// `<number> [ / <number> ]?`
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if already registered.
pub fn add_aspect_ratio(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    registry.add([(
        "aspect-ratio",
        Alternative::of([
            factory.css_wide_keywords(),
            Juxtaposition::of([
                factory.number(),
                Quantifier::optional(Juxtaposition::of([
                    DelimMatcher::of('/'),
                    factory.number(),
                ])),
            ]),
        ]),
    )])
}

/// [§ 4.1 Box Insets](https://www.w3.org/TR/css-position-3/#insets)
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if any is already
/// registered; none are added in that case.
pub fn add_inset(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let auto_lp = Alternative::of([kw(&["auto"]), factory.length_percentage()]);
    registry.add([
        ("inset", Quantifier::count(auto_lp.clone(), 1, 4)),
        ("inset-block", Quantifier::count(auto_lp.clone(), 1, 2)),
        ("inset-block-end", auto_lp.clone()),
        ("inset-block-start", auto_lp.clone()),
        ("inset-inline", Quantifier::count(auto_lp.clone(), 1, 2)),
        ("inset-inline-end", auto_lp.clone()),
        ("inset-inline-start", auto_lp),
    ])
}

/// [Filter Effects Level 2 § 3](https://drafts.fxtf.org/filter-effects-2/#BackdropFilterProperty)
///
/// One or more `filter` values.
///
/// # Errors
///
/// [`RegistryError::MissingProperty`] if `filter` is not registered, or
/// [`RegistryError::DuplicatePropertyRegistration`] if `backdrop-filter` is.
pub fn add_backdrop_filter(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let filter = registry.require("filter")?;
    registry.add([("backdrop-filter", Quantifier::plus(filter))])
}

/// [CSS Containment Level 2 § 4](https://www.w3.org/TR/css-contain-2/#content-visibility)
///
/// # Errors
///
/// [`RegistryError::DuplicatePropertyRegistration`] if already registered.
pub fn add_content_visibility(
    registry: &mut PropertyRegistry,
    _factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    registry.add([("content-visibility", kw(&["visible", "auto", "hidden"]))])
}

/// [§ 4.11 Default font metrics overriding](https://www.w3.org/TR/css-fonts-4/#font-metrics-override-desc)
/// and [§ 4.10 font-display](https://www.w3.org/TR/css-fonts-4/#font-display-desc)
///
/// # Errors
///
/// Never fails; descriptors are replaced outright.
pub fn add_font_metric_overrides(
    registry: &mut PropertyRegistry,
    factory: &dyn MatcherFactory,
) -> Result<(), RegistryError> {
    let metric = Alternative::of([kw(&["normal"]), factory.percentage()]);
    for name in [
        "ascent-override",
        "descent-override",
        "line-gap-override",
        "size-adjust",
    ] {
        let _ = registry.set(name, metric.clone());
    }
    let _ = registry.set(
        "font-display",
        kw(&["auto", "block", "swap", "fallback", "optional"]),
    );
    Ok(())
}

/// A CSS-wide keywords replacement that also accepts `var()` anywhere.
///
/// A declaration such as `border: 1px var(--border-type) black` cannot match
/// the `border` grammar, since `var()` stands in for a value only known at
/// computed-value time. This matcher accepts any run of ordinary values that
/// contains at least one `var()` reference, in addition to the CSS-wide
/// keywords themselves.
///
/// `var()` may carry a single fallback value after a comma.
#[must_use]
pub fn var_anywhere(factory: &dyn MatcherFactory) -> MatcherRef {
    let value = Alternative::of([
        factory.color(),
        factory.image(),
        factory.length(),
        factory.integer(),
        factory.percentage(),
        factory.number(),
        factory.angle(),
        factory.frequency(),
        factory.resolution(),
        factory.position(),
        factory.css_single_easing_function(),
        factory.comma(),
        factory.css_wide_keywords(),
        kw(&["solid", "double", "dotted", "dashed", "wavy"]),
    ]);
    let var = FunctionMatcher::of(
        "var",
        Juxtaposition::of([
            CustomPropertyMatcher::of(),
            Quantifier::optional(Juxtaposition::of([
                factory.comma(),
                Alternative::of([value.clone(), factory.var()]),
            ])),
        ]),
    );
    let any = Quantifier::star(Alternative::of([var.clone(), value]));
    Alternative::of([
        factory.css_wide_keywords(),
        Juxtaposition::of([any.clone(), var, any]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DefaultMatcherFactory, ExtendedMatcherFactory, MatchContext};
    use crate::parser::ComponentValue;
    use crate::parser::css_parser::parse_component_values;
    use crate::token::CSSToken;

    fn factory() -> Arc<dyn MatcherFactory> {
        Arc::new(ExtendedMatcherFactory)
    }

    fn matches(registry: &PropertyRegistry, property: &str, tokens: &[CSSToken]) -> bool {
        let values = parse_component_values(tokens);
        registry
            .get(property)
            .is_some_and(|m| m.matches_all(&values, &mut MatchContext::new()))
    }

    #[test]
    fn test_every_extension_applies() {
        let registry = extended_properties(factory());
        for name in [
            "image-rendering",
            "ruby-position",
            "ruby-align",
            "pointer-events",
            "scroll-margin-top",
            "scroll-padding",
            "aspect-ratio",
            "inset",
            "inset-inline-start",
            "backdrop-filter",
            "content-visibility",
            "transform-style",
            "transition-behavior",
        ] {
            assert!(registry.contains(name), "{name} should be registered");
        }
    }

    #[test]
    fn test_extensions_are_rejected_twice() {
        let mut registry = extended_properties(factory());
        assert_eq!(
            add_image_rendering(&mut registry, &DefaultMatcherFactory),
            Err(RegistryError::DuplicatePropertyRegistration {
                name: "image-rendering".to_string()
            })
        );
    }

    #[test]
    fn test_backdrop_filter_requires_filter() {
        let mut registry = PropertyRegistry::new();
        assert_eq!(
            add_backdrop_filter(&mut registry, &DefaultMatcherFactory),
            Err(RegistryError::MissingProperty {
                name: "filter".to_string()
            })
        );
    }

    #[test]
    fn test_aspect_ratio() {
        let registry = extended_properties(factory());
        assert!(matches(
            &registry,
            "aspect-ratio",
            &[
                CSSToken::integer(16),
                CSSToken::Whitespace,
                CSSToken::delim('/'),
                CSSToken::Whitespace,
                CSSToken::integer(9),
            ]
        ));
        assert!(!matches(
            &registry,
            "aspect-ratio",
            &[CSSToken::integer(16), CSSToken::delim('/')]
        ));
    }

    #[test]
    fn test_clamp_in_sizing() {
        let registry = extended_properties(factory());
        let clamp = [
            CSSToken::function("clamp"),
            CSSToken::dimension(1.0, Some(1), "rem"),
            CSSToken::Comma,
            CSSToken::dimension(2.5, None, "vw"),
            CSSToken::Comma,
            CSSToken::dimension(3.0, Some(3), "rem"),
            CSSToken::RightParen,
        ];
        assert!(matches(&registry, "width", &clamp));
        assert!(matches(&registry, "max-width", &[CSSToken::ident("fit-content")]));
        let standard = super::super::standard_properties(&DefaultMatcherFactory);
        assert!(!matches(&standard, "width", &clamp));
    }

    #[test]
    fn test_transform_3d_functions() {
        let registry = extended_properties(factory());
        let rotate3d = [
            CSSToken::function("rotate3d"),
            CSSToken::integer(1),
            CSSToken::Comma,
            CSSToken::integer(0),
            CSSToken::Comma,
            CSSToken::integer(0),
            CSSToken::Comma,
            CSSToken::dimension(45.0, Some(45), "deg"),
            CSSToken::RightParen,
        ];
        assert!(matches(&registry, "transform", &rotate3d));
        let standard = super::super::standard_properties(&DefaultMatcherFactory);
        assert!(!matches(&standard, "transform", &rotate3d));
    }

    #[test]
    fn test_font_metric_overrides() {
        let registry = extended_font_face_properties(factory());
        assert!(matches(
            &registry,
            "size-adjust",
            &[CSSToken::percentage(90.0, Some(90))]
        ));
        assert!(matches(&registry, "font-display", &[CSSToken::ident("swap")]));
        assert!(registry.contains("src"));
    }

    #[test]
    fn test_var_anywhere() {
        let matcher = var_anywhere(&DefaultMatcherFactory);
        let var = ComponentValue::Function {
            name: "var".to_string(),
            value: vec![ComponentValue::Token(CSSToken::ident("--border-type"))],
        };
        let values = vec![
            ComponentValue::Token(CSSToken::dimension(1.0, Some(1), "px")),
            ComponentValue::Token(CSSToken::Whitespace),
            var,
            ComponentValue::Token(CSSToken::Whitespace),
            ComponentValue::Token(CSSToken::ident("black")),
        ];
        let mut ctx = MatchContext::new();
        assert!(matcher.matches_all(&values, &mut ctx));
        let without_var = parse_component_values(&[CSSToken::ident("black")]);
        assert!(!matcher.matches_all(&without_var, &mut ctx));
        let keyword = parse_component_values(&[CSSToken::ident("inherit")]);
        assert!(matcher.matches_all(&keyword, &mut ctx));
    }
}
