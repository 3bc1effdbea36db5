//! Property grammars.
//!
//! The standard set covers the properties a sanitized author stylesheet
//! commonly needs, grouped the way the CSS modules group them. Grammars are
//! assembled from the primitives a [`MatcherFactory`] supplies, so swapping
//! the factory changes what every property here accepts.
//!
//! [`extensions`] holds the ordered additions and overrides applied on top of
//! the standard set.

pub mod extensions;
mod font_face;
mod layout;
mod motion;
mod text;
mod visual;

use crate::grammar::{KeywordMatcher, MatcherFactory, MatcherRef};
use crate::registry::PropertyRegistry;

pub use font_face::font_face_properties;
pub use layout::sizing_properties;
pub use motion::transform_functions;

/// A property name with its grammar.
pub type PropertyEntry = (&'static str, MatcherRef);

/// Keyword shorthand used throughout the property tables.
fn kw(words: &[&str]) -> MatcherRef {
    KeywordMatcher::of(words.iter().copied())
}

/// The standard property set for style rules.
#[must_use]
pub fn standard_properties(factory: &dyn MatcherFactory) -> PropertyRegistry {
    let mut entries: Vec<PropertyEntry> = Vec::new();
    entries.extend(visual::properties(factory));
    entries.extend(layout::properties(factory));
    entries.extend(text::properties(factory));
    entries.extend(motion::properties(factory));
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DefaultMatcherFactory, MatchContext};
    use crate::parser::css_parser::parse_component_values;
    use crate::token::CSSToken;

    fn matches(registry: &PropertyRegistry, property: &str, tokens: &[CSSToken]) -> bool {
        let values = parse_component_values(tokens);
        registry
            .get(property)
            .is_some_and(|m| m.matches_all(&values, &mut MatchContext::new()))
    }

    #[test]
    fn test_standard_set_has_no_extension_properties() {
        let registry = standard_properties(&DefaultMatcherFactory);
        assert!(registry.contains("color"));
        assert!(registry.contains("margin"));
        assert!(registry.contains("transform"));
        assert!(!registry.contains("aspect-ratio"));
        assert!(!registry.contains("backdrop-filter"));
        assert!(!registry.contains("image-rendering"));
    }

    #[test]
    fn test_margin_shorthand() {
        let registry = standard_properties(&DefaultMatcherFactory);
        let px = |v: i32| CSSToken::dimension(f64::from(v), Some(i64::from(v)), "px");
        assert!(matches(
            &registry,
            "margin",
            &[px(1), CSSToken::Whitespace, CSSToken::ident("auto")]
        ));
        assert!(!matches(
            &registry,
            "margin",
            &[
                px(1),
                CSSToken::Whitespace,
                px(2),
                CSSToken::Whitespace,
                px(3),
                CSSToken::Whitespace,
                px(4),
                CSSToken::Whitespace,
                px(5),
            ]
        ));
    }

    #[test]
    fn test_border_shorthand_any_order() {
        let registry = standard_properties(&DefaultMatcherFactory);
        let tokens = [
            CSSToken::ident("red"),
            CSSToken::Whitespace,
            CSSToken::ident("solid"),
            CSSToken::Whitespace,
            CSSToken::dimension(1.0, Some(1), "px"),
        ];
        assert!(matches(&registry, "border", &tokens));
    }

    #[test]
    fn test_font_family_list() {
        let registry = standard_properties(&DefaultMatcherFactory);
        let tokens = [
            CSSToken::string("Open Sans"),
            CSSToken::Comma,
            CSSToken::Whitespace,
            CSSToken::ident("Helvetica"),
            CSSToken::Whitespace,
            CSSToken::ident("Neue"),
            CSSToken::Comma,
            CSSToken::ident("sans-serif"),
        ];
        assert!(matches(&registry, "font-family", &tokens));
    }
}
