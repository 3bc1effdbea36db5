//! Caller-side input limits.
//!
//! Matching is bounded by the size of its input, so a caller accepting
//! stylesheets from untrusted sources checks them against [`InputLimits`]
//! before sanitizing. The sanitizer itself never consults these limits.

use thiserror::Error;

use crate::parser::{AtRuleBlock, ComponentValue, Declaration, Rule, Stylesheet};

/// A limit a stylesheet exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    /// More rules than allowed, counting nested rules.
    #[error("stylesheet has {count} rules, more than the limit of {max}")]
    TooManyRules {
        /// Rules counted before giving up.
        count: usize,
        /// The configured maximum.
        max: usize,
    },
    /// A declaration value has too many component values.
    #[error("value of '{property}' has {length} component values, more than the limit of {max}")]
    ValueTooLong {
        /// The declaration's property name.
        property: String,
        /// Component values in the declaration's value.
        length: usize,
        /// The configured maximum.
        max: usize,
    },
    /// Functions, blocks, or nested rules go deeper than allowed.
    #[error("nesting depth {depth} exceeds the limit of {max}")]
    TooDeep {
        /// The depth found.
        depth: usize,
        /// The configured maximum.
        max: usize,
    },
}

/// Size limits for untrusted stylesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// Maximum number of rules, nested rules included.
    pub max_rules: usize,
    /// Maximum number of component values in one declaration value, counted
    /// at the top level.
    pub max_value_length: usize,
    /// Maximum nesting depth of functions and blocks inside a value, and of
    /// rules inside at-rules.
    pub max_depth: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_rules: 10_000,
            max_value_length: 1_000,
            max_depth: 32,
        }
    }
}

impl InputLimits {
    /// Limits that accept everything.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_rules: usize::MAX,
            max_value_length: usize::MAX,
            max_depth: usize::MAX,
        }
    }

    /// Check `stylesheet` against these limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`LimitError`] found, in document order.
    pub fn check(&self, stylesheet: &Stylesheet) -> Result<(), LimitError> {
        let mut rule_count = 0;
        self.check_rules(&stylesheet.rules, 0, &mut rule_count)
    }

    fn check_rules(
        &self,
        rules: &[Rule],
        depth: usize,
        rule_count: &mut usize,
    ) -> Result<(), LimitError> {
        if depth > self.max_depth {
            return Err(LimitError::TooDeep {
                depth,
                max: self.max_depth,
            });
        }
        for rule in rules {
            *rule_count += 1;
            if *rule_count > self.max_rules {
                return Err(LimitError::TooManyRules {
                    count: *rule_count,
                    max: self.max_rules,
                });
            }
            match rule {
                Rule::Style(style) => {
                    self.check_values(&style.prelude)?;
                    self.check_declarations(&style.declarations)?;
                }
                Rule::At(at) => {
                    self.check_values(&at.prelude)?;
                    match &at.block {
                        None => {}
                        Some(AtRuleBlock::Raw(values)) => self.check_values(values)?,
                        Some(AtRuleBlock::Declarations(declarations)) => {
                            self.check_declarations(declarations)?;
                        }
                        Some(AtRuleBlock::Rules(nested)) => {
                            self.check_rules(nested, depth + 1, rule_count)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn check_declarations(&self, declarations: &[Declaration]) -> Result<(), LimitError> {
        for declaration in declarations {
            if declaration.value.len() > self.max_value_length {
                return Err(LimitError::ValueTooLong {
                    property: declaration.name.clone(),
                    length: declaration.value.len(),
                    max: self.max_value_length,
                });
            }
            self.check_values(&declaration.value)?;
        }
        Ok(())
    }

    fn check_values(&self, values: &[ComponentValue]) -> Result<(), LimitError> {
        let depth = values.iter().map(ComponentValue::depth).max().unwrap_or(0);
        if depth > self.max_depth {
            return Err(LimitError::TooDeep {
                depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AtRule, StyleRule};
    use crate::token::CSSToken;

    fn style_rule(value: Vec<ComponentValue>) -> Rule {
        Rule::Style(StyleRule {
            prelude: vec![ComponentValue::Token(CSSToken::ident("p"))],
            declarations: vec![Declaration::new("color", value)],
        })
    }

    #[test]
    fn test_default_limits_accept_small_sheets() {
        let sheet = Stylesheet {
            rules: vec![style_rule(vec![CSSToken::ident("red").into()])],
        };
        assert_eq!(InputLimits::default().check(&sheet), Ok(()));
    }

    #[test]
    fn test_rule_count_includes_nested_rules() {
        let sheet = Stylesheet {
            rules: vec![Rule::At(AtRule {
                name: "media".to_string(),
                prelude: Vec::new(),
                block: Some(AtRuleBlock::Rules(vec![
                    style_rule(Vec::new()),
                    style_rule(Vec::new()),
                ])),
            })],
        };
        let limits = InputLimits {
            max_rules: 2,
            ..InputLimits::default()
        };
        assert_eq!(
            limits.check(&sheet),
            Err(LimitError::TooManyRules { count: 3, max: 2 })
        );
    }

    #[test]
    fn test_value_length_and_depth() {
        let limits = InputLimits {
            max_value_length: 2,
            max_depth: 1,
            ..InputLimits::default()
        };
        let long = Stylesheet {
            rules: vec![style_rule(vec![CSSToken::ident("a").into(); 3])],
        };
        assert!(matches!(
            limits.check(&long),
            Err(LimitError::ValueTooLong { length: 3, .. })
        ));

        let nested = ComponentValue::Function {
            name: "calc".to_string(),
            value: vec![ComponentValue::Block {
                token: '(',
                value: Vec::new(),
            }],
        };
        let deep = Stylesheet {
            rules: vec![style_rule(vec![nested])],
        };
        assert_eq!(
            limits.check(&deep),
            Err(LimitError::TooDeep { depth: 2, max: 1 })
        );
    }
}
