//! [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
//! followed by a grammar check of the value.

use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Location};
use crate::grammar::{MatchContext, MatcherFactory, MatcherRef};
use crate::parser::Declaration;
use crate::parser::css_parser::strip_important;
use crate::registry::PropertyRegistry;

/// Validates `property: value` pairs against one registry.
///
/// The registry is owned and never mutated after construction, so one
/// sanitizer can be shared between threads.
#[derive(Debug, Clone)]
pub struct DeclarationSanitizer {
    registry: PropertyRegistry,
    css_wide_keywords: MatcherRef,
}

impl DeclarationSanitizer {
    /// Validate against `registry`, accepting `factory`'s CSS-wide keywords
    /// for every property.
    #[must_use]
    pub fn new(registry: PropertyRegistry, factory: &dyn MatcherFactory) -> Self {
        Self {
            registry,
            css_wide_keywords: factory.css_wide_keywords(),
        }
    }

    /// Replace the matcher tried when a property's own grammar fails.
    ///
    /// [`crate::properties::extensions::var_anywhere`] is the usual
    /// replacement, accepting `var()` references anywhere in a value.
    #[must_use]
    pub fn with_css_wide_keywords(mut self, matcher: MatcherRef) -> Self {
        self.css_wide_keywords = matcher;
        self
    }

    /// The registry values are checked against.
    #[must_use]
    pub const fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// [§ 2.1 Custom Property Names](https://www.w3.org/TR/css-variables-1/#defining-variables)
    /// and [§ 2.2 Property value definitions](https://www.w3.org/TR/css-values-4/#property-value-definitions)
    ///
    /// Check the declaration at `index` of its block. Returns the declaration
    /// to keep, or `None` after recording why it was dropped.
    ///
    /// STEP 1: Custom properties are kept verbatim.
    /// STEP 2: Look up the property's grammar.
    /// STEP 3: Strip a trailing `!important` into the flag unless it is set.
    /// STEP 4: Match the property grammar, then the CSS-wide keywords.
    /// STEP 5: Report the failure with the furthest hints as notes.
    pub fn sanitize(
        &self,
        index: usize,
        declaration: Declaration,
        diagnostics: &mut Diagnostics,
    ) -> Option<Declaration> {
        // STEP 1: "Custom properties ... can contain anything"
        if declaration.is_custom_property() {
            return Some(declaration);
        }

        // STEP 2: Look up the grammar
        let Some(matcher) = self.registry.get(&declaration.name) else {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::UnknownProperty,
                Location::Declaration {
                    index,
                    property: declaration.name.clone(),
                },
                format!("unknown property '{}'", declaration.name),
            ));
            return None;
        };

        // STEP 3: Strip !important, once. A parsed declaration already had it
        // stripped; a second one is part of the value and fails the grammar.
        let declaration = if declaration.important {
            declaration
        } else {
            let (value, important) = strip_important(declaration.value);
            Declaration {
                name: declaration.name,
                value,
                important,
            }
        };

        // STEP 4: Match
        let mut ctx = MatchContext::new();
        if matcher.matches_all(&declaration.value, &mut ctx)
            || self
                .css_wide_keywords
                .matches_all(&declaration.value, &mut MatchContext::new())
        {
            return Some(declaration);
        }

        // STEP 5: Report
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidValue,
            Location::Declaration {
                index,
                property: declaration.name.clone(),
            },
            format!(
                "invalid value for '{}': {}",
                declaration.name,
                ValueText(&declaration)
            ),
        ));
        diagnostics.extend(ctx.into_hints().into_iter().map(|hint| {
            Diagnostic::note(
                hint.code,
                Location::Value {
                    property: declaration.name.clone(),
                    offset: hint.offset,
                },
                hint.message,
            )
        }));
        None
    }

    /// Check every declaration of a block, keeping the valid ones in order.
    pub fn sanitize_all(
        &self,
        declarations: Vec<Declaration>,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Declaration> {
        declarations
            .into_iter()
            .enumerate()
            .filter_map(|(index, declaration)| self.sanitize(index, declaration, diagnostics))
            .collect()
    }
}

/// The value of a declaration as CSS text.
struct ValueText<'a>(&'a Declaration);

impl core::fmt::Display for ValueText<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for value in &self.0.value {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{DefaultMatcherFactory, KeywordMatcher};
    use crate::parser::ComponentValue;
    use crate::token::CSSToken;

    fn sanitizer() -> DeclarationSanitizer {
        let registry: PropertyRegistry = [("color", KeywordMatcher::of(["red", "blue"]))]
            .into_iter()
            .collect();
        DeclarationSanitizer::new(registry, &DefaultMatcherFactory)
    }

    fn declaration(name: &str, tokens: Vec<CSSToken>) -> Declaration {
        Declaration::new(name, tokens.into_iter().map(ComponentValue::from).collect())
    }

    #[test]
    fn test_valid_value_is_kept() {
        let mut diagnostics = Diagnostics::new();
        let kept = sanitizer().sanitize(
            0,
            declaration("color", vec![CSSToken::ident("red")]),
            &mut diagnostics,
        );
        assert!(kept.is_some());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_value_is_dropped() {
        let mut diagnostics = Diagnostics::new();
        let kept = sanitizer().sanitize(
            3,
            declaration("color", vec![CSSToken::ident("green")]),
            &mut diagnostics,
        );
        assert!(kept.is_none());
        assert_eq!(diagnostics.len(), 1);
        let Some(diagnostic) = diagnostics.iter().next() else {
            panic!("one diagnostic");
        };
        assert_eq!(diagnostic.code, DiagnosticCode::InvalidValue);
        assert_eq!(
            diagnostic.location,
            Location::Declaration {
                index: 3,
                property: "color".to_string()
            }
        );
        assert_eq!(diagnostic.message, "invalid value for 'color': green");
    }

    #[test]
    fn test_unknown_property() {
        let mut diagnostics = Diagnostics::new();
        let kept = sanitizer().sanitize(
            0,
            declaration("colour", vec![CSSToken::ident("red")]),
            &mut diagnostics,
        );
        assert!(kept.is_none());
        assert_eq!(diagnostics.count(DiagnosticCode::UnknownProperty), 1);
    }

    #[test]
    fn test_important_is_stripped_into_flag() {
        let mut diagnostics = Diagnostics::new();
        let kept = sanitizer().sanitize(
            0,
            declaration(
                "COLOR",
                vec![
                    CSSToken::ident("blue"),
                    CSSToken::Whitespace,
                    CSSToken::delim('!'),
                    CSSToken::ident("IMPORTANT"),
                ],
            ),
            &mut diagnostics,
        );
        let Some(kept) = kept else {
            panic!("declaration kept");
        };
        assert!(kept.important);
        assert_eq!(kept.value, vec![ComponentValue::from(CSSToken::ident("blue"))]);
        assert_eq!(kept.name, "COLOR");
    }

    #[test]
    fn test_important_is_stripped_only_once() {
        let bang_important = || {
            [
                CSSToken::Whitespace,
                CSSToken::delim('!'),
                CSSToken::ident("important"),
            ]
        };
        let mut doubled = vec![CSSToken::ident("red")];
        doubled.extend(bang_important());
        doubled.extend(bang_important());

        // Built by hand: neither flag set yet, two annotations in the value
        let mut diagnostics = Diagnostics::new();
        let kept = sanitizer().sanitize(
            0,
            declaration("color", doubled.clone()),
            &mut diagnostics,
        );
        assert!(kept.is_none());
        assert_eq!(diagnostics.count(DiagnosticCode::InvalidValue), 1);

        // As the parser leaves it: flag set, one annotation still in the value
        let mut diagnostics = Diagnostics::new();
        let mut parsed = declaration("color", doubled[..4].to_vec());
        parsed.important = true;
        let kept = sanitizer().sanitize(0, parsed, &mut diagnostics);
        assert!(kept.is_none());
        assert_eq!(diagnostics.count(DiagnosticCode::InvalidValue), 1);
    }

    #[test]
    fn test_css_wide_keywords_and_replacement() {
        let mut diagnostics = Diagnostics::new();
        let inherit = declaration("color", vec![CSSToken::ident("inherit")]);
        assert!(
            sanitizer()
                .sanitize(0, inherit.clone(), &mut diagnostics)
                .is_some()
        );
        let strict = sanitizer().with_css_wide_keywords(KeywordMatcher::one("initial"));
        assert!(strict.sanitize(0, inherit, &mut diagnostics).is_none());
    }

    #[test]
    fn test_custom_property_is_kept_verbatim() {
        let mut diagnostics = Diagnostics::new();
        let custom = declaration(
            "--foo",
            vec![
                CSSToken::ident("anything"),
                CSSToken::Whitespace,
                CSSToken::delim('!'),
                CSSToken::delim('!'),
            ],
        );
        let kept = sanitizer().sanitize(0, custom.clone(), &mut diagnostics);
        assert_eq!(kept, Some(custom));
        assert!(diagnostics.is_empty());

        // "--" alone is not a custom property name
        let bare = declaration("--", vec![CSSToken::ident("x")]);
        assert!(sanitizer().sanitize(0, bare, &mut diagnostics).is_none());
    }
}
