//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! Parsing happens in two passes. Tokens are first folded into component values
//! (functions and simple blocks become subtrees), then rules and declarations
//! are consumed from the component-value list. The second pass is what
//! at-rule sanitizers reuse when they need to read a raw `{}` block.

use super::{AtRule, AtRuleBlock, ComponentValue, Declaration, Rule, StyleRule, Stylesheet};
use crate::token::CSSToken;

/// [§ 5.3.2 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// "To parse a stylesheet from input..."
#[must_use]
pub fn parse_stylesheet(tokens: &[CSSToken]) -> Stylesheet {
    let values = parse_component_values(tokens);
    // "Consume a list of rules from input, with the top-level flag set."
    let rules = CSSParser::new(&values).consume_list_of_rules(true);
    Stylesheet { rules }
}

/// [§ 5.3.10 Parse a list of component values](https://www.w3.org/TR/css-syntax-3/#parse-list-of-component-values)
///
/// "Repeatedly consume a component value from input until an `<EOF-token>` is
/// returned, appending the returned values (except the final `<EOF-token>`)
/// into a list. Return the list."
#[must_use]
pub fn parse_component_values(tokens: &[CSSToken]) -> Vec<ComponentValue> {
    let mut cursor = TokenCursor {
        tokens,
        position: 0,
    };
    let mut values = Vec::new();
    while let Some(value) = cursor.consume_component_value() {
        values.push(value);
    }
    values
}

/// Cursor over the raw token stream for the first parsing pass.
struct TokenCursor<'a> {
    tokens: &'a [CSSToken],
    position: usize,
}

impl<'a> TokenCursor<'a> {
    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> Option<ComponentValue> {
        match self.consume()? {
            // "<EOF-token>"
            CSSToken::EOF => None,

            // "If the current input token is a <{-token>, <[-token>, or <(-token>,
            // consume a simple block and return it."
            CSSToken::LeftBrace => Some(self.consume_simple_block('{', &CSSToken::RightBrace)),
            CSSToken::LeftBracket => {
                Some(self.consume_simple_block('[', &CSSToken::RightBracket))
            }
            CSSToken::LeftParen => Some(self.consume_simple_block('(', &CSSToken::RightParen)),

            // "Otherwise, if the current input token is a <function-token>,
            // consume a function and return it."
            CSSToken::Function(name) => {
                let name = name.clone();
                let value = self.consume_until(&CSSToken::RightParen);
                Some(ComponentValue::Function { name, value })
            }

            // "Otherwise, return the current input token."
            token => Some(ComponentValue::Token(token.clone())),
        }
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    ///
    /// "The ending token is the mirror variant of the current input token."
    fn consume_simple_block(&mut self, token: char, ending: &CSSToken) -> ComponentValue {
        let value = self.consume_until(ending);
        ComponentValue::Block { token, value }
    }

    /// Consume component values up to (and including) `ending`, or EOF.
    fn consume_until(&mut self, ending: &CSSToken) -> Vec<ComponentValue> {
        let mut value = Vec::new();
        loop {
            match self.peek() {
                Some(token) if token == ending => {
                    let _ = self.consume();
                    return value;
                }
                // "<EOF-token>": "This is a parse error. Return the block."
                None | Some(CSSToken::EOF) => return value,
                Some(_) => {
                    if let Some(v) = self.consume_component_value() {
                        value.push(v);
                    }
                }
            }
        }
    }

    fn consume(&mut self) -> Option<&'a CSSToken> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&'a CSSToken> {
        self.tokens.get(self.position)
    }
}

/// CSS parser over a list of component values.
pub struct CSSParser<'a> {
    values: &'a [ComponentValue],
    position: usize,
}

impl<'a> CSSParser<'a> {
    /// Create a new parser over already-assembled component values.
    #[must_use]
    pub const fn new(values: &'a [ComponentValue]) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// [§ 5.3.4 Parse a list of rules](https://www.w3.org/TR/css-syntax-3/#parse-list-of-rules)
    ///
    /// Parse the rules nested in an at-rule block such as `@media`.
    pub fn parse_rule_list(&mut self) -> Vec<Rule> {
        self.consume_list_of_rules(false)
    }

    /// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style block or an at-rule block such as `@font-face`.
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        self.consume_list_of_declarations()
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        // "Create an initially empty list of rules."
        let mut rules = Vec::new();

        loop {
            match self.peek_token() {
                // "<whitespace-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace) => {
                    let _ = self.consume();
                }

                // "<CDO-token>" or "<CDC-token>"
                // "If the top-level flag is set, do nothing."
                Some(CSSToken::CDO | CSSToken::CDC) if top_level => {
                    let _ = self.consume();
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule, and append
                // the returned value to the list of rules."
                Some(CSSToken::AtKeyword(_)) => {
                    if let Some(at_rule) = self.consume_at_rule() {
                        rules.push(Rule::At(at_rule));
                    }
                }

                // "<EOF-token>"
                // "Return the list of rules."
                _ if self.peek().is_none() => return rules,

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                _ => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self) -> Option<AtRule> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(ComponentValue::Token(CSSToken::AtKeyword(name))) => name.clone(),
            _ => return None,
        };

        // "Create a new at-rule with its name set to the value of the current input
        // token, its prelude initially set to an empty list, and its value initially
        // set to nothing."
        let mut prelude = Vec::new();

        loop {
            match self.consume() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(ComponentValue::Token(CSSToken::Semicolon)) => {
                    return Some(AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: None,
                    });
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None => {
                    return Some(AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: None,
                    });
                }

                // "a simple block with an associated token of <{-token>"
                // "Assign the block to the at-rule's block. Return the at-rule."
                Some(ComponentValue::Block { token: '{', value }) => {
                    return Some(AtRule {
                        name,
                        prelude: trim_whitespace(prelude),
                        block: Some(AtRuleBlock::Raw(value.clone())),
                    });
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the at-rule's prelude."
                Some(value) => prelude.push(value.clone()),
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        // "Create a new qualified rule with its prelude initially set to an empty list,
        // and its value initially set to nothing."
        let mut prelude = Vec::new();

        loop {
            match self.consume() {
                // "<EOF-token>"
                // "This is a parse error. Return nothing."
                None => return None,

                // "a simple block with an associated token of <{-token>"
                // "Assign the block to the qualified rule's block. Return the qualified rule."
                Some(ComponentValue::Block { token: '{', value }) => {
                    let declarations = CSSParser::new(value).consume_list_of_declarations();
                    return Some(StyleRule {
                        prelude: trim_whitespace(prelude),
                        declarations,
                    });
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the qualified rule's prelude."
                Some(value) => prelude.push(value.clone()),
            }
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek_token() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule. Append the
                // returned rule to the list of declarations."
                //
                // Nested at-rules in declaration lists are not supported; they are
                // consumed and discarded.
                Some(CSSToken::AtKeyword(_)) => {
                    let _ = self.consume_at_rule();
                }

                // "<ident-token>"
                // "Consume a declaration. If anything was returned, append it to
                // the list of declarations."
                Some(CSSToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }

                // "<EOF-token>"
                // "Return the list of declarations."
                _ if self.peek().is_none() => return declarations,

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As long as
                // the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and throw away the returned value."
                _ => {
                    let _ = self.consume();
                    self.skip_to_semicolon();
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(ComponentValue::Token(CSSToken::Ident(name))) => name.clone(),
            _ => return None,
        };

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        if self.peek_token() != Some(&CSSToken::Colon) {
            self.skip_to_semicolon();
            return None;
        }
        let _ = self.consume(); // :

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "As long as the next input token is anything other than an <EOF-token>, consume a
        // component value and append it to the declaration's value."
        let mut value = Vec::new();
        while let Some(next) = self.peek() {
            if matches!(next, ComponentValue::Token(CSSToken::Semicolon)) {
                break;
            }
            value.push(next.clone());
            let _ = self.consume();
        }

        // "If the last two non-<whitespace-token>s in the declaration's value are a
        // <delim-token> with the value "!" followed by an <ident-token> with a value
        // that is an ASCII case-insensitive match for "important", remove them from
        // the declaration's value and set the declaration's important flag to true."
        let (value, important) = strip_important(value);

        Some(Declaration {
            name,
            value,
            important,
        })
    }

    fn skip_whitespace(&mut self) {
        while self.peek_token() == Some(&CSSToken::Whitespace) {
            let _ = self.consume();
        }
    }

    fn skip_to_semicolon(&mut self) {
        while let Some(next) = self.peek() {
            if matches!(next, ComponentValue::Token(CSSToken::Semicolon)) {
                break;
            }
            let _ = self.consume();
        }
    }

    fn consume(&mut self) -> Option<&'a ComponentValue> {
        let value = self.values.get(self.position)?;
        self.position += 1;
        Some(value)
    }

    fn peek(&self) -> Option<&'a ComponentValue> {
        self.values.get(self.position)
    }

    fn peek_token(&self) -> Option<&'a CSSToken> {
        self.peek().and_then(ComponentValue::as_token)
    }
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
///
/// Returns the value without the annotation and surrounding whitespace, and
/// whether the annotation was present. Values without the annotation are
/// returned with only their trailing whitespace removed.
///
/// STEP 1: Remove trailing whitespace.
/// STEP 2: Check for the "important" ident token.
/// STEP 3: Skip whitespace between ! and important.
/// STEP 4: Check for the "!" delim token, then remove both.
/// STEP 5: Remove any remaining trailing whitespace.
#[must_use]
pub fn strip_important(value: Vec<ComponentValue>) -> (Vec<ComponentValue>, bool) {
    // STEP 1: Remove trailing whitespace
    let mut value = trim_trailing_whitespace(value);
    let mut important = false;

    // STEP 2: Check for "important"
    if matches!(
        value.last(),
        Some(ComponentValue::Token(CSSToken::Ident(s))) if s.eq_ignore_ascii_case("important")
    ) {
        // STEP 3: Skip whitespace between ! and important
        let mut bang = value.len() - 1;
        while bang > 0 && value[bang - 1].is_whitespace() {
            bang -= 1;
        }

        // STEP 4: Check for !
        if bang > 0
            && matches!(
                value[bang - 1],
                ComponentValue::Token(CSSToken::Delim('!'))
            )
        {
            value.truncate(bang - 1);
            important = true;
        }
    }

    // STEP 5: Remove trailing whitespace again
    (trim_trailing_whitespace(value), important)
}

fn trim_trailing_whitespace(mut value: Vec<ComponentValue>) -> Vec<ComponentValue> {
    while value.last().is_some_and(ComponentValue::is_whitespace) {
        let _ = value.pop();
    }
    value
}

fn trim_whitespace(value: Vec<ComponentValue>) -> Vec<ComponentValue> {
    let mut value = trim_trailing_whitespace(value);
    let leading = value.iter().take_while(|v| v.is_whitespace()).count();
    let _ = value.drain(..leading);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> CSSToken {
        CSSToken::ident(s)
    }

    #[test]
    fn test_functions_and_blocks_nest() {
        let tokens = vec![
            CSSToken::function("rgb"),
            CSSToken::integer(1),
            CSSToken::Comma,
            CSSToken::LeftBracket,
            ident("a"),
            CSSToken::RightBracket,
            CSSToken::RightParen,
            ident("b"),
        ];
        let values = parse_component_values(&tokens);
        assert_eq!(values.len(), 2);
        let ComponentValue::Function { name, value } = &values[0] else {
            panic!("expected function, got {:?}", values[0]);
        };
        assert_eq!(name, "rgb");
        assert_eq!(value.len(), 3);
        assert!(matches!(value[2], ComponentValue::Block { token: '[', .. }));
    }

    #[test]
    fn test_unclosed_function_ends_at_eof() {
        let tokens = vec![CSSToken::function("var"), ident("--x"), CSSToken::EOF];
        let values = parse_component_values(&tokens);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_parse_style_rule_with_important() {
        let tokens = vec![
            ident("p"),
            CSSToken::Whitespace,
            CSSToken::LeftBrace,
            ident("color"),
            CSSToken::Colon,
            CSSToken::Whitespace,
            ident("red"),
            CSSToken::Whitespace,
            CSSToken::Delim('!'),
            ident("IMPORTANT"),
            CSSToken::Semicolon,
            ident("margin"),
            CSSToken::Colon,
            CSSToken::integer(0),
            CSSToken::RightBrace,
        ];
        let sheet = parse_stylesheet(&tokens);
        assert_eq!(sheet.rules.len(), 1);
        let Rule::Style(rule) = &sheet.rules[0] else {
            panic!("expected style rule");
        };
        assert_eq!(rule.prelude, vec![ComponentValue::Token(ident("p"))]);
        assert_eq!(rule.declarations.len(), 2);
        assert!(rule.declarations[0].important);
        assert_eq!(
            rule.declarations[0].value,
            vec![ComponentValue::Token(ident("red"))]
        );
        assert!(!rule.declarations[1].important);
    }

    #[test]
    fn test_parse_at_rules() {
        let tokens = vec![
            CSSToken::at_keyword("import"),
            CSSToken::Whitespace,
            CSSToken::string("x.css"),
            CSSToken::Semicolon,
            CSSToken::at_keyword("font-face"),
            CSSToken::LeftBrace,
            ident("font-display"),
            CSSToken::Colon,
            ident("swap"),
            CSSToken::RightBrace,
        ];
        let sheet = parse_stylesheet(&tokens);
        assert_eq!(sheet.rules.len(), 2);
        let Rule::At(import) = &sheet.rules[0] else {
            panic!("expected at-rule");
        };
        assert_eq!(import.name, "import");
        assert_eq!(import.prelude.len(), 1);
        assert!(import.block.is_none());
        let Rule::At(font_face) = &sheet.rules[1] else {
            panic!("expected at-rule");
        };
        let Some(AtRuleBlock::Raw(block)) = &font_face.block else {
            panic!("expected raw block");
        };
        let declarations = CSSParser::new(block).parse_declaration_list();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "font-display");
    }

    #[test]
    fn test_malformed_declaration_is_skipped() {
        let tokens = vec![
            ident("color"),
            ident("red"),
            CSSToken::Semicolon,
            CSSToken::integer(5),
            CSSToken::Semicolon,
            ident("width"),
            CSSToken::Colon,
            CSSToken::dimension(1.0, Some(1), "px"),
        ];
        let values = parse_component_values(&tokens);
        let declarations = CSSParser::new(&values).parse_declaration_list();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "width");
    }

    #[test]
    fn test_strip_important_requires_bang() {
        let value = vec![
            ComponentValue::Token(ident("red")),
            ComponentValue::Token(CSSToken::Whitespace),
            ComponentValue::Token(ident("important")),
        ];
        let (stripped, important) = strip_important(value.clone());
        assert!(!important);
        assert_eq!(stripped, value);
    }
}
