//! Stylesheet sanitization.
//!
//! Sanitizing keeps what validates and drops the rest, leaving a
//! [`crate::diagnostics::Diagnostic`] for every drop:
//!
//! - a declaration whose property is unknown, or whose value does not match
//!   the property's grammar;
//! - a style rule whose selector list is invalid;
//! - an at-rule nobody registered, or whose prelude or block is wrong for it.
//!
//! Custom properties (`--*`) are never checked and always kept.

/// Single-declaration validation.
pub mod declaration;
/// Style rule and at-rule sanitizers.
pub mod rules;
/// The stylesheet walk and its configuration.
pub mod stylesheet;

pub use declaration::DeclarationSanitizer;
pub use rules::{
    FontFaceSanitizer, KeyframesSanitizer, MediaSanitizer, PageSanitizer, RuleSanitizer,
    StyleRuleSanitizer,
};
pub use stylesheet::{Sanitized, StylesheetSanitizer, StylesheetSanitizerBuilder};
