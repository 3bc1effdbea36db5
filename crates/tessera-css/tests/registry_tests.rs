//! Integration tests for property registries and their composition.

use std::sync::Arc;

use tessera_css::grammar::{
    DefaultMatcherFactory, ExtendedMatcherFactory, KeywordMatcher, MatchContext, MatcherFactory,
};
use tessera_css::parser::css_parser::parse_component_values;
use tessera_css::properties::extensions::{
    TEMPLATE_EXTENSIONS, add_backdrop_filter, add_image_rendering, extended_properties,
};
use tessera_css::properties::standard_properties;
use tessera_css::token::CSSToken;
use tessera_css::{PropertyRegistry, RegistryBuilder, RegistryError};

fn accepts(registry: &PropertyRegistry, property: &str, tokens: &[CSSToken]) -> bool {
    let values = parse_component_values(tokens);
    registry
        .get(property)
        .is_some_and(|m| m.matches_all(&values, &mut MatchContext::new()))
}

#[test]
fn test_add_rejects_duplicates() {
    let mut registry = standard_properties(&DefaultMatcherFactory);
    let before = registry.len();
    let result = registry.add([
        ("image-rendering", KeywordMatcher::one("auto")),
        ("color", KeywordMatcher::one("red")),
    ]);
    assert_eq!(
        result,
        Err(RegistryError::DuplicatePropertyRegistration {
            name: "color".to_string()
        })
    );
    assert_eq!(registry.len(), before);
    assert!(!registry.contains("image-rendering"));
    assert!(accepts(&registry, "color", &[CSSToken::ident("green")]));
}

#[test]
fn test_set_all_overrides() {
    let mut registry = standard_properties(&DefaultMatcherFactory);
    registry.set_all([("color", KeywordMatcher::of(["red", "blue"]))]);
    assert_eq!(registry.len(), 1);
    assert!(accepts(&registry, "color", &[CSSToken::ident("red")]));
    assert!(!accepts(&registry, "color", &[CSSToken::ident("green")]));
    assert!(!registry.contains("margin"));
}

#[test]
fn test_error_messages() {
    let duplicate = RegistryError::DuplicatePropertyRegistration {
        name: "color".to_string(),
    };
    assert_eq!(
        duplicate.to_string(),
        "duplicate registration of property 'color'"
    );
    let missing = RegistryError::MissingProperty {
        name: "filter".to_string(),
    };
    assert_eq!(
        missing.to_string(),
        "property 'filter' is required but not registered"
    );
}

#[test]
fn test_builder_applies_extensions_in_order() {
    let factory: Arc<dyn MatcherFactory> = Arc::new(DefaultMatcherFactory);
    let registry = RegistryBuilder::standard(Arc::clone(&factory))
        .extend(add_image_rendering)
        .and_then(|builder| builder.extend(add_backdrop_filter))
        .map(RegistryBuilder::build);
    let Ok(registry) = registry else {
        panic!("extensions apply to the standard set");
    };
    assert!(registry.contains("image-rendering"));
    assert!(registry.contains("backdrop-filter"));
}

#[test]
fn test_builder_extend_reports_missing_dependency() {
    let factory: Arc<dyn MatcherFactory> = Arc::new(DefaultMatcherFactory);
    let result = RegistryBuilder::new(PropertyRegistry::new(), factory).extend(add_backdrop_filter);
    assert_eq!(
        result.err(),
        Some(RegistryError::MissingProperty {
            name: "filter".to_string()
        })
    );
}

#[test]
fn test_failing_extension_is_skipped_by_extend_or_warn() {
    let factory: Arc<dyn MatcherFactory> = Arc::new(DefaultMatcherFactory);
    let registry = RegistryBuilder::standard(factory)
        .extend_or_warn("image-rendering", add_image_rendering)
        .extend_or_warn("image-rendering again", add_image_rendering)
        .build();
    assert!(registry.contains("image-rendering"));
    assert!(tessera_common::warning::was_warned(
        "Registry",
        "skipping extension 'image-rendering again': duplicate registration of property 'image-rendering'"
    ));
}

#[test]
fn test_extended_set_is_a_superset() {
    let standard = standard_properties(&ExtendedMatcherFactory);
    let extended = extended_properties(Arc::new(ExtendedMatcherFactory));
    assert!(standard.names().all(|name| extended.contains(name)));
    assert!(extended.len() > standard.len());
    assert_eq!(TEMPLATE_EXTENSIONS[0].0, "border-background");
}

#[test]
fn test_extended_factory_widens_colors() {
    let standard = standard_properties(&DefaultMatcherFactory);
    let extended = extended_properties(Arc::new(ExtendedMatcherFactory));
    let rgba_hex = [CSSToken::hash_id("ff000080")];
    assert!(!accepts(&standard, "color", &rgba_hex));
    assert!(accepts(&extended, "color", &rgba_hex));

    // rgb(var(--r), 0, 0)
    let with_var = [
        CSSToken::function("rgb"),
        CSSToken::function("var"),
        CSSToken::ident("--r"),
        CSSToken::RightParen,
        CSSToken::Comma,
        CSSToken::integer(0),
        CSSToken::Comma,
        CSSToken::integer(0),
        CSSToken::RightParen,
    ];
    assert!(!accepts(&standard, "color", &with_var));
    assert!(accepts(&extended, "color", &with_var));
}

#[test]
fn test_extended_background_clip_and_box_shadow() {
    let extended = extended_properties(Arc::new(ExtendedMatcherFactory));
    assert!(accepts(
        &extended,
        "background-clip",
        &[CSSToken::ident("text")]
    ));
    // inset 0 1px 2px var(--shadow)
    assert!(accepts(
        &extended,
        "box-shadow",
        &[
            CSSToken::ident("inset"),
            CSSToken::Whitespace,
            CSSToken::integer(0),
            CSSToken::Whitespace,
            CSSToken::dimension(1.0, Some(1), "px"),
            CSSToken::Whitespace,
            CSSToken::dimension(2.0, Some(2), "px"),
            CSSToken::Whitespace,
            CSSToken::function("var"),
            CSSToken::ident("--shadow"),
            CSSToken::RightParen,
        ]
    ));
}
