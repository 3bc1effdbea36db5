//! Sanitizers for style rules and the at-rules the stylesheet walk knows.
//!
//! Each at-rule sanitizer owns the grammar for its prelude and decides what
//! its block holds. Blocks arrive as [`AtRuleBlock::Raw`] from the parser and
//! leave as [`AtRuleBlock::Declarations`] or [`AtRuleBlock::Rules`].

use core::fmt::Debug;

use super::StylesheetSanitizer;
use super::declaration::DeclarationSanitizer;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Location};
use crate::grammar::{Alternative, MatchContext, MatcherFactory, MatcherRef};
use crate::parser::{AtRule, AtRuleBlock, CSSParser, ComponentValue, Declaration, Rule, StyleRule};
use crate::registry::PropertyRegistry;
use crate::{media, selector};

/// Sanitizes one kind of at-rule.
///
/// Implementations hold only immutable state. The stylesheet sanitizer is
/// passed in for at-rules that contain nested rules.
pub trait RuleSanitizer: Debug + Send + Sync {
    /// Sanitize `rule`, the `index`th rule of its list. Returns the rule to
    /// keep, or `None` after recording why it was dropped.
    fn sanitize(
        &self,
        rule: AtRule,
        index: usize,
        stylesheet: &StylesheetSanitizer,
        diagnostics: &mut Diagnostics,
    ) -> Option<AtRule>;
}

fn invalid_prelude(index: usize, rule: &AtRule, why: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticCode::InvalidPrelude,
        Location::Rule { index },
        format!("dropping @{}: {why}", rule.name),
    )
}

fn prelude_matches(grammar: &MatcherRef, prelude: &[ComponentValue]) -> bool {
    grammar.matches_all(prelude, &mut MatchContext::new())
}

/// Run `f` with a fresh list, then file what it recorded under the `index`th
/// rule so nested diagnostics keep their path.
fn within_rule<T>(
    index: usize,
    diagnostics: &mut Diagnostics,
    f: impl FnOnce(&mut Diagnostics) -> T,
) -> T {
    let mut inner = Diagnostics::new();
    let result = f(&mut inner);
    diagnostics.append_nested(index, inner);
    result
}

/// The declarations of a block, parsing it if it is still raw.
///
/// A block of rules is not a declaration block.
fn declarations_of(block: AtRuleBlock) -> Option<Vec<Declaration>> {
    match block {
        AtRuleBlock::Raw(values) => Some(CSSParser::new(&values).parse_declaration_list()),
        AtRuleBlock::Declarations(declarations) => Some(declarations),
        AtRuleBlock::Rules(_) => None,
    }
}

/// The rules of a block, parsing it if it is still raw.
fn rules_of(block: AtRuleBlock) -> Option<Vec<Rule>> {
    match block {
        AtRuleBlock::Raw(values) => Some(CSSParser::new(&values).parse_rule_list()),
        AtRuleBlock::Rules(rules) => Some(rules),
        AtRuleBlock::Declarations(_) => None,
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A prelude that must match a selector grammar, then a block of declarations.
/// Style rules use [`selector::selector_list`]; `@keyframes` blocks reuse this
/// with keyframe selectors.
#[derive(Debug, Clone)]
pub struct StyleRuleSanitizer {
    selectors: MatcherRef,
    declarations: DeclarationSanitizer,
}

impl StyleRuleSanitizer {
    /// Check preludes with `selectors` and declarations with `declarations`.
    #[must_use]
    pub const fn new(selectors: MatcherRef, declarations: DeclarationSanitizer) -> Self {
        Self {
            selectors,
            declarations,
        }
    }

    /// A style rule sanitizer with the standard selector grammar.
    #[must_use]
    pub fn with_selectors(declarations: DeclarationSanitizer) -> Self {
        Self::new(selector::selector_list(), declarations)
    }

    /// The declaration sanitizer applied to every rule body.
    #[must_use]
    pub const fn declarations(&self) -> &DeclarationSanitizer {
        &self.declarations
    }

    /// Sanitize the `index`th rule of its list.
    ///
    /// An invalid selector drops the whole rule. Otherwise each declaration
    /// is checked on its own and the rule is kept even if none survive.
    pub fn sanitize(
        &self,
        rule: StyleRule,
        index: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<StyleRule> {
        if !prelude_matches(&self.selectors, &rule.prelude) {
            let text: String = rule.prelude.iter().map(ToString::to_string).collect();
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::InvalidSelector,
                Location::Rule { index },
                format!("invalid selector '{text}'"),
            ));
            return None;
        }
        let declarations = within_rule(index, diagnostics, |inner| {
            self.declarations.sanitize_all(rule.declarations, inner)
        });
        Some(StyleRule {
            prelude: rule.prelude,
            declarations,
        })
    }
}

/// [§ 4 Font Resources](https://www.w3.org/TR/css-fonts-4/#font-face-rule)
///
/// "`@font-face { <declaration-list> }`". No prelude; descriptors are checked
/// against their own registry.
#[derive(Debug, Clone)]
pub struct FontFaceSanitizer {
    descriptors: DeclarationSanitizer,
}

impl FontFaceSanitizer {
    /// Check descriptors against `registry`.
    #[must_use]
    pub fn new(registry: PropertyRegistry, factory: &dyn MatcherFactory) -> Self {
        Self {
            descriptors: DeclarationSanitizer::new(registry, factory),
        }
    }
}

impl RuleSanitizer for FontFaceSanitizer {
    fn sanitize(
        &self,
        mut rule: AtRule,
        index: usize,
        _stylesheet: &StylesheetSanitizer,
        diagnostics: &mut Diagnostics,
    ) -> Option<AtRule> {
        if rule.prelude.iter().any(|v| !v.is_whitespace()) {
            diagnostics.push(invalid_prelude(index, &rule, "@font-face takes no prelude"));
            return None;
        }
        let Some(declarations) = rule.block.take().and_then(declarations_of) else {
            diagnostics.push(invalid_prelude(index, &rule, "expected a declaration block"));
            return None;
        };
        let descriptors = within_rule(index, diagnostics, |inner| {
            self.descriptors.sanitize_all(declarations, inner)
        });
        rule.block = Some(AtRuleBlock::Declarations(descriptors));
        Some(rule)
    }
}

/// [§ 6 Conditional Group Rules](https://www.w3.org/TR/css-conditional-3/#at-media)
///
/// "`@media <media-query-list> { <rule-list> }`". Nested rules go back
/// through the stylesheet walk.
#[derive(Debug, Clone)]
pub struct MediaSanitizer {
    queries: MatcherRef,
}

impl MediaSanitizer {
    /// Check preludes with the media query grammar built from `factory`.
    #[must_use]
    pub fn new(factory: &dyn MatcherFactory) -> Self {
        Self {
            queries: media::media_query_list(factory),
        }
    }
}

impl RuleSanitizer for MediaSanitizer {
    fn sanitize(
        &self,
        mut rule: AtRule,
        index: usize,
        stylesheet: &StylesheetSanitizer,
        diagnostics: &mut Diagnostics,
    ) -> Option<AtRule> {
        if !prelude_matches(&self.queries, &rule.prelude) {
            diagnostics.push(invalid_prelude(index, &rule, "invalid media query list"));
            return None;
        }
        let Some(rules) = rule.block.take().and_then(rules_of) else {
            diagnostics.push(invalid_prelude(index, &rule, "expected a block of rules"));
            return None;
        };
        let rules = within_rule(index, diagnostics, |inner| {
            stylesheet.sanitize_rules(rules, inner)
        });
        rule.block = Some(AtRuleBlock::Rules(rules));
        Some(rule)
    }
}

/// [§ 3 Declaring Keyframes](https://www.w3.org/TR/css-animations-1/#keyframes)
///
/// "`@keyframes <keyframes-name> { <qualified-rule-list> }`" where
/// "`<keyframes-name> = <custom-ident> | <string>`".
#[derive(Debug, Clone)]
pub struct KeyframesSanitizer {
    name: MatcherRef,
    keyframes: StyleRuleSanitizer,
}

impl KeyframesSanitizer {
    /// Check keyframe blocks with `declarations`.
    #[must_use]
    pub fn new(declarations: DeclarationSanitizer, factory: &dyn MatcherFactory) -> Self {
        Self {
            name: Alternative::of([factory.custom_ident(), factory.string()]),
            keyframes: StyleRuleSanitizer::new(selector::keyframe_selector_list(), declarations),
        }
    }
}

impl RuleSanitizer for KeyframesSanitizer {
    fn sanitize(
        &self,
        mut rule: AtRule,
        index: usize,
        _stylesheet: &StylesheetSanitizer,
        diagnostics: &mut Diagnostics,
    ) -> Option<AtRule> {
        if !prelude_matches(&self.name, &rule.prelude) {
            diagnostics.push(invalid_prelude(index, &rule, "invalid keyframes name"));
            return None;
        }
        let Some(rules) = rule.block.take().and_then(rules_of) else {
            diagnostics.push(invalid_prelude(index, &rule, "expected a block of keyframes"));
            return None;
        };
        let keyframes = within_rule(index, diagnostics, |inner| {
            rules
                .into_iter()
                .enumerate()
                .filter_map(|(i, nested)| match nested {
                    Rule::Style(keyframe) => self
                        .keyframes
                        .sanitize(keyframe, i, inner)
                        .map(Rule::Style),
                    Rule::At(at) => {
                        inner.push(Diagnostic::error(
                            DiagnosticCode::UnknownAtRule,
                            Location::Rule { index: i },
                            format!("@{} is not allowed inside @keyframes", at.name),
                        ));
                        None
                    }
                })
                .collect::<Vec<_>>()
        });
        rule.block = Some(AtRuleBlock::Rules(keyframes));
        Some(rule)
    }
}

/// [§ 3 Page Selectors](https://www.w3.org/TR/css-page-3/#at-page-rule)
///
/// "`@page <page-selector-list>? { <declaration-rule-list> }`". Page-margin
/// boxes nested in the block are discarded by the declaration-list parser.
#[derive(Debug, Clone)]
pub struct PageSanitizer {
    selectors: MatcherRef,
    declarations: DeclarationSanitizer,
}

impl PageSanitizer {
    /// Check page blocks with `declarations`.
    #[must_use]
    pub fn new(declarations: DeclarationSanitizer) -> Self {
        Self {
            selectors: selector::page_selector_list(),
            declarations,
        }
    }
}

impl RuleSanitizer for PageSanitizer {
    fn sanitize(
        &self,
        mut rule: AtRule,
        index: usize,
        _stylesheet: &StylesheetSanitizer,
        diagnostics: &mut Diagnostics,
    ) -> Option<AtRule> {
        if !prelude_matches(&self.selectors, &rule.prelude) {
            diagnostics.push(invalid_prelude(index, &rule, "invalid page selector"));
            return None;
        }
        let Some(declarations) = rule.block.take().and_then(declarations_of) else {
            diagnostics.push(invalid_prelude(index, &rule, "expected a declaration block"));
            return None;
        };
        let declarations = within_rule(index, diagnostics, |inner| {
            self.declarations.sanitize_all(declarations, inner)
        });
        rule.block = Some(AtRuleBlock::Declarations(declarations));
        Some(rule)
    }
}
