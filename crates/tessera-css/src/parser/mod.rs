//! CSS parser module.
//!
//! The host hands the sanitizer a token stream; this module assembles it into
//! the component-value tree and rule list that matchers and sanitizers walk.

/// CSS parser implementation per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod css_parser;
/// CSS text serialization per [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization).
mod serialize;

use serde::{Deserialize, Serialize};

use crate::token::CSSToken;

pub use css_parser::CSSParser;

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// The property value as component values.
    pub value: Vec<ComponentValue>,
    /// Whether the declaration has `!important`.
    #[serde(default)]
    pub important: bool,
}

impl Declaration {
    /// Create a declaration without `!important`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Vec<ComponentValue>) -> Self {
        Self {
            name: name.into(),
            value,
            important: false,
        }
    }

    /// Returns true if this declaration defines a custom property (`--*`).
    #[must_use]
    pub fn is_custom_property(&self) -> bool {
        crate::token::is_custom_property_name(&self.name)
    }
}

/// [§ 5.3.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-a-component-value)
///
/// A component value in a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl ComponentValue {
    /// The preserved token, if this component value is one.
    #[must_use]
    pub const fn as_token(&self) -> Option<&CSSToken> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns true for a preserved `<whitespace-token>`.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Whitespace))
    }

    /// Returns true for a preserved `<comma-token>`.
    #[must_use]
    pub const fn is_comma(&self) -> bool {
        matches!(self, Self::Token(CSSToken::Comma))
    }

    /// Nesting depth of this value: 0 for a token, 1 + the deepest child otherwise.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Token(_) => 0,
            Self::Function { value, .. } | Self::Block { value, .. } => {
                1 + value.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

impl From<CSSToken> for ComponentValue {
    fn from(token: CSSToken) -> Self {
        Self::Token(token)
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-a-qualified-rule)
///
/// A CSS style rule (selector prelude + declarations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// The selector list, as the component values of the rule's prelude.
    pub prelude: Vec<ComponentValue>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// The contents of an at-rule's `{}` block.
///
/// The parser cannot know whether a block holds declarations (`@font-face`) or
/// rules (`@media`), so it leaves the block [`AtRuleBlock::Raw`]. The rule
/// sanitizer that understands the at-rule re-parses it into one of the
/// structured forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtRuleBlock {
    /// Unparsed block contents.
    Raw(Vec<ComponentValue>),
    /// A declaration list.
    Declarations(Vec<Declaration>),
    /// A nested rule list.
    Rules(Vec<Rule>),
}

/// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-an-at-rule)
///
/// A CSS at-rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRule {
    /// The at-keyword name (without the `@`).
    pub name: String,
    /// The prelude component values.
    pub prelude: Vec<ComponentValue>,
    /// The optional block contents.
    pub block: Option<AtRuleBlock>,
}

/// [§ 5.3.3 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
///
/// A CSS rule (either a style rule or an at-rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// An at-rule.
    At(AtRule),
}

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}
