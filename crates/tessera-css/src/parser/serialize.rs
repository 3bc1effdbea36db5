//! [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization)
//!
//! "The tokenizer described in this specification does not produce tokens for
//! comments, or otherwise preserve them in any way. Implementations may preserve
//! the contents of comments and their location in the token stream."
//!
//! Serialization here is for handing a sanitized stylesheet back to the host.
//! It round-trips through the parser, not byte-for-byte through the source.

use core::fmt;

use super::{AtRule, AtRuleBlock, ComponentValue, Declaration, Rule, StyleRule, Stylesheet};

fn write_values(f: &mut fmt::Formatter<'_>, values: &[ComponentValue]) -> fmt::Result {
    for value in values {
        write!(f, "{value}")?;
    }
    Ok(())
}

fn write_declarations(f: &mut fmt::Formatter<'_>, declarations: &[Declaration]) -> fmt::Result {
    f.write_str("{")?;
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            f.write_str(";")?;
        }
        write!(f, " {declaration}")?;
    }
    f.write_str(" }")
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Function { name, value } => {
                write!(f, "{name}(")?;
                write_values(f, value)?;
                f.write_str(")")
            }
            Self::Block { token, value } => {
                let close = match token {
                    '[' => ']',
                    '(' => ')',
                    _ => '}',
                };
                write!(f, "{token}")?;
                write_values(f, value)?;
                write!(f, "{close}")
            }
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if !self.value.first().is_some_and(ComponentValue::is_whitespace) {
            f.write_str(" ")?;
        }
        write_values(f, &self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

impl fmt::Display for StyleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_values(f, &self.prelude)?;
        f.write_str(" ")?;
        write_declarations(f, &self.declarations)
    }
}

impl fmt::Display for AtRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if !self.prelude.is_empty() {
            f.write_str(" ")?;
            write_values(f, &self.prelude)?;
        }
        match &self.block {
            None => f.write_str(";"),
            Some(AtRuleBlock::Raw(values)) => {
                f.write_str(" {")?;
                write_values(f, values)?;
                f.write_str("}")
            }
            Some(AtRuleBlock::Declarations(declarations)) => {
                f.write_str(" ")?;
                write_declarations(f, declarations)
            }
            Some(AtRuleBlock::Rules(rules)) => {
                f.write_str(" {")?;
                for rule in rules {
                    write!(f, " {rule}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(rule) => write!(f, "{rule}"),
            Self::At(rule) => write!(f, "{rule}"),
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ComponentValue, Declaration};
    use crate::token::CSSToken;

    #[test]
    fn test_declaration_serialization() {
        let mut declaration = Declaration::new(
            "margin",
            vec![
                ComponentValue::Token(CSSToken::dimension(1.0, Some(1), "px")),
                ComponentValue::Token(CSSToken::Whitespace),
                ComponentValue::Function {
                    name: "var".to_string(),
                    value: vec![ComponentValue::Token(CSSToken::ident("--gap"))],
                },
            ],
        );
        declaration.important = true;
        assert_eq!(declaration.to_string(), "margin: 1px var(--gap) !important");
    }

    #[test]
    fn test_block_serialization_uses_mirror_token() {
        let block = ComponentValue::Block {
            token: '[',
            value: vec![ComponentValue::Token(CSSToken::ident("href"))],
        };
        assert_eq!(block.to_string(), "[href]");
    }
}
