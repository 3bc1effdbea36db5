//! CSS value grammar matching and stylesheet sanitization for Tessera.
//!
//! # Scope
//!
//! This crate implements:
//! - **Component values** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Typed tokens as handed over by the host (no character lexing)
//!   - Functions and simple blocks folded into component-value trees
//!   - Rule and declaration lists, `!important` detection
//!   - Serialization back to CSS text
//!
//! - **Value grammars** ([CSS Values Level 4 § 2](https://www.w3.org/TR/css-values-4/#value-defs))
//!   - Keyword, token, function, block, and delimiter matchers
//!   - Juxtaposition, `|`, `&&`, `||`, `?`, `*`, `+`, `{A,B}`, and `#`
//!   - A swappable factory of primitive types (`<length>`, `<color>`, ...)
//!
//! - **Property registries**
//!   - Standard property and `@font-face` descriptor sets
//!   - Ordered extensions applied once through a builder
//!
//! - **Sanitization**
//!   - Declarations, style rules, `@font-face`, `@media`, `@keyframes`, `@page`
//!   - Selector and media query preludes
//!   - Structured diagnostics for everything dropped
//!
//! # Not Implemented
//!
//! - Tokenizing CSS text
//! - Rewriting or normalizing values (kept values are returned unchanged)
//! - Caching compiled grammars between processes
//!
//! # Example
//!
//! ```
//! use tessera_css::StylesheetSanitizer;
//! use tessera_css::token::CSSToken;
//!
//! // p { color: red; colour: red }
//! let tokens = [
//!     CSSToken::ident("p"),
//!     CSSToken::LeftBrace,
//!     CSSToken::ident("color"),
//!     CSSToken::Colon,
//!     CSSToken::ident("red"),
//!     CSSToken::Semicolon,
//!     CSSToken::ident("colour"),
//!     CSSToken::Colon,
//!     CSSToken::ident("red"),
//!     CSSToken::RightBrace,
//! ];
//! let sanitized = StylesheetSanitizer::new().sanitize_tokens(&tokens);
//! assert_eq!(sanitized.stylesheet.to_string(), "p { color: red }\n");
//! assert_eq!(sanitized.diagnostics.len(), 1);
//! ```

/// Sanitization diagnostics.
pub mod diagnostics;
/// Value grammar matchers per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod grammar;
/// Caller-side size limits for untrusted input.
pub mod limits;
/// Media query grammar per [Media Queries Level 4](https://www.w3.org/TR/mediaqueries-4/).
pub mod media;
/// Component values and rules per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Property grammars.
pub mod properties;
/// Property registries and their builder.
pub mod registry;
/// Declaration, rule, and stylesheet sanitizers.
pub mod sanitizer;
/// Selector grammars per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// CSS tokens per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Location, Severity};
pub use grammar::{
    DefaultMatcherFactory, ExtendedMatcherFactory, MatchContext, Matcher, MatcherFactory,
    MatcherRef,
};
pub use limits::{InputLimits, LimitError};
pub use parser::{AtRule, AtRuleBlock, ComponentValue, Declaration, Rule, StyleRule, Stylesheet};
pub use registry::{PropertyExtension, PropertyRegistry, RegistryBuilder, RegistryError};
pub use sanitizer::{RuleSanitizer, Sanitized, StylesheetSanitizer, StylesheetSanitizerBuilder};
