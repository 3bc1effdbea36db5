//! The top-level stylesheet walk.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::declaration::DeclarationSanitizer;
use super::rules::{
    FontFaceSanitizer, KeyframesSanitizer, MediaSanitizer, PageSanitizer, RuleSanitizer,
    StyleRuleSanitizer,
};
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Location};
use crate::grammar::{DefaultMatcherFactory, ExtendedMatcherFactory, MatcherFactory, MatcherRef};
use crate::parser::css_parser::parse_stylesheet;
use crate::parser::{Rule, Stylesheet};
use crate::properties::extensions::{
    extended_font_face_properties, extended_properties, var_anywhere,
};
use crate::properties::{font_face_properties, standard_properties};
use crate::registry::PropertyRegistry;
use crate::token::CSSToken;

/// The result of one sanitization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sanitized {
    /// What survived.
    pub stylesheet: Stylesheet,
    /// Why everything else was dropped, in document order.
    pub diagnostics: Diagnostics,
}

/// Validates whole stylesheets.
///
/// Style rules go to the [`StyleRuleSanitizer`]; at-rules go to the
/// [`RuleSanitizer`] registered under their name (ASCII case-insensitive).
/// At-rules with no sanitizer are dropped.
///
/// ```text
///   Stylesheet ──► rule list ─┬─ style rule ──► selectors + declarations
///                             └─ @name ───────► rule_sanitizers[name]
///                                                  │
///                                  nested rules ◄──┘ (e.g. @media)
/// ```
///
/// A sanitizer holds no per-run state; share it behind an [`Arc`] to use it
/// from several threads.
#[derive(Debug, Clone)]
pub struct StylesheetSanitizer {
    style_rules: StyleRuleSanitizer,
    rule_sanitizers: BTreeMap<String, Arc<dyn RuleSanitizer>>,
}

impl Default for StylesheetSanitizer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StylesheetSanitizer {
    /// Start configuring a sanitizer with the standard property set.
    #[must_use]
    pub fn builder() -> StylesheetSanitizerBuilder {
        StylesheetSanitizerBuilder::new(Arc::new(DefaultMatcherFactory))
    }

    /// A sanitizer with the standard property set and at-rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sanitizer with every property extension, the extended matcher
    /// factory, and `var()` accepted anywhere in a value.
    #[must_use]
    pub fn extended() -> Self {
        StylesheetSanitizerBuilder::extended().build()
    }

    /// The sanitizer applied to top-level and nested style rules.
    #[must_use]
    pub const fn style_rules(&self) -> &StyleRuleSanitizer {
        &self.style_rules
    }

    /// The sanitizer registered for `@name`, if any.
    #[must_use]
    pub fn rule_sanitizer(&self, name: &str) -> Option<&dyn RuleSanitizer> {
        self.rule_sanitizers
            .get(&name.to_ascii_lowercase())
            .map(AsRef::as_ref)
    }

    /// Names of the at-rules this sanitizer keeps, sorted.
    pub fn at_rule_names(&self) -> impl Iterator<Item = &str> {
        self.rule_sanitizers.keys().map(String::as_str)
    }

    /// Register `sanitizer` for `@name`, returning the one it replaced.
    pub fn set_rule_sanitizer(
        &mut self,
        name: &str,
        sanitizer: Arc<dyn RuleSanitizer>,
    ) -> Option<Arc<dyn RuleSanitizer>> {
        self.rule_sanitizers
            .insert(name.to_ascii_lowercase(), sanitizer)
    }

    /// Stop accepting `@name`, returning its sanitizer.
    pub fn remove_rule_sanitizer(&mut self, name: &str) -> Option<Arc<dyn RuleSanitizer>> {
        self.rule_sanitizers.remove(&name.to_ascii_lowercase())
    }

    /// Sanitize a parsed stylesheet.
    ///
    /// Never fails: anything invalid is dropped and explained in the
    /// returned diagnostics.
    #[must_use]
    pub fn sanitize(&self, stylesheet: Stylesheet) -> Sanitized {
        let mut diagnostics = Diagnostics::new();
        let rules = self.sanitize_rules(stylesheet.rules, &mut diagnostics);
        Sanitized {
            stylesheet: Stylesheet { rules },
            diagnostics,
        }
    }

    /// Parse `tokens` as a stylesheet, then sanitize it.
    #[must_use]
    pub fn sanitize_tokens(&self, tokens: &[CSSToken]) -> Sanitized {
        self.sanitize(parse_stylesheet(tokens))
    }

    /// Sanitize a rule list, such as the body of an `@media` rule.
    pub fn sanitize_rules(&self, rules: Vec<Rule>, diagnostics: &mut Diagnostics) -> Vec<Rule> {
        rules
            .into_iter()
            .enumerate()
            .filter_map(|(index, rule)| match rule {
                Rule::Style(style) => self
                    .style_rules
                    .sanitize(style, index, diagnostics)
                    .map(Rule::Style),
                Rule::At(at) => {
                    let Some(sanitizer) = self.rule_sanitizer(&at.name) else {
                        diagnostics.push(Diagnostic::error(
                            DiagnosticCode::UnknownAtRule,
                            Location::Rule { index },
                            format!("unknown at-rule @{}", at.name),
                        ));
                        return None;
                    };
                    sanitizer
                        .sanitize(at, index, self, diagnostics)
                        .map(Rule::At)
                }
            })
            .collect()
    }
}

/// Configuration for a [`StylesheetSanitizer`].
///
/// Anything not set falls back to what the factory builds: the standard
/// property set, the standard `@font-face` descriptors, and the factory's
/// CSS-wide keywords. `@font-face`, `@media`, `@keyframes`, and `@page` are
/// registered unless [`StylesheetSanitizerBuilder::without_standard_at_rules`]
/// is called.
#[derive(Debug, Clone)]
pub struct StylesheetSanitizerBuilder {
    factory: Arc<dyn MatcherFactory>,
    registry: Option<PropertyRegistry>,
    font_face_registry: Option<PropertyRegistry>,
    css_wide_keywords: Option<MatcherRef>,
    standard_at_rules: bool,
    rule_sanitizers: Vec<(String, Arc<dyn RuleSanitizer>)>,
}

impl StylesheetSanitizerBuilder {
    /// Build grammars with `factory`.
    #[must_use]
    pub fn new(factory: Arc<dyn MatcherFactory>) -> Self {
        Self {
            factory,
            registry: None,
            font_face_registry: None,
            css_wide_keywords: None,
            standard_at_rules: true,
            rule_sanitizers: Vec::new(),
        }
    }

    /// The configuration behind [`StylesheetSanitizer::extended`].
    #[must_use]
    pub fn extended() -> Self {
        let factory: Arc<dyn MatcherFactory> = Arc::new(ExtendedMatcherFactory);
        let registry = extended_properties(Arc::clone(&factory));
        let font_face = extended_font_face_properties(Arc::clone(&factory));
        let wide = var_anywhere(factory.as_ref());
        Self::new(factory)
            .registry(registry)
            .font_face_registry(font_face)
            .css_wide_keywords(wide)
    }

    /// Validate style-rule declarations against `registry`.
    #[must_use]
    pub fn registry(mut self, registry: PropertyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Validate `@font-face` descriptors against `registry`.
    #[must_use]
    pub fn font_face_registry(mut self, registry: PropertyRegistry) -> Self {
        self.font_face_registry = Some(registry);
        self
    }

    /// Try `matcher` when a property's own grammar rejects a value.
    #[must_use]
    pub fn css_wide_keywords(mut self, matcher: MatcherRef) -> Self {
        self.css_wide_keywords = Some(matcher);
        self
    }

    /// Register only the at-rules added with
    /// [`StylesheetSanitizerBuilder::rule_sanitizer`].
    #[must_use]
    pub const fn without_standard_at_rules(mut self) -> Self {
        self.standard_at_rules = false;
        self
    }

    /// Register `sanitizer` for `@name`, replacing any standard one.
    #[must_use]
    pub fn rule_sanitizer(mut self, name: &str, sanitizer: Arc<dyn RuleSanitizer>) -> Self {
        self.rule_sanitizers.push((name.to_string(), sanitizer));
        self
    }

    /// Finish configuration.
    #[must_use]
    pub fn build(self) -> StylesheetSanitizer {
        let factory = self.factory.as_ref();
        let registry = self
            .registry
            .unwrap_or_else(|| standard_properties(factory));
        let mut declarations = DeclarationSanitizer::new(registry, factory);
        if let Some(wide) = self.css_wide_keywords {
            declarations = declarations.with_css_wide_keywords(wide);
        }

        let mut sanitizer = StylesheetSanitizer {
            style_rules: StyleRuleSanitizer::with_selectors(declarations.clone()),
            rule_sanitizers: BTreeMap::new(),
        };
        if self.standard_at_rules {
            let font_face = self
                .font_face_registry
                .unwrap_or_else(|| font_face_properties(factory));
            let standard: [(&str, Arc<dyn RuleSanitizer>); 4] = [
                ("font-face", Arc::new(FontFaceSanitizer::new(font_face, factory))),
                ("media", Arc::new(MediaSanitizer::new(factory))),
                (
                    "keyframes",
                    Arc::new(KeyframesSanitizer::new(declarations.clone(), factory)),
                ),
                ("page", Arc::new(PageSanitizer::new(declarations))),
            ];
            for (name, rule_sanitizer) in standard {
                let _ = sanitizer.set_rule_sanitizer(name, rule_sanitizer);
            }
        }
        for (name, rule_sanitizer) in self.rule_sanitizers {
            let _ = sanitizer.set_rule_sanitizer(&name, rule_sanitizer);
        }
        sanitizer
    }
}
