//! Sanitization diagnostics.
//!
//! Every node the sanitizer drops leaves a [`Diagnostic`] behind. Diagnostics are
//! collected per run in a [`Diagnostics`] list and never shared across runs.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// How serious a diagnostic is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Extra detail attached to a preceding error.
    Note,
    /// A node was dropped.
    Error,
}

/// What went wrong.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// The property name is not in the registry in effect for the rule.
    UnknownProperty,
    /// The value does not match the property's grammar.
    InvalidValue,
    /// No rule sanitizer is registered for the at-rule name.
    UnknownAtRule,
    /// A style rule's prelude is not a valid selector list.
    InvalidSelector,
    /// An at-rule's prelude or block shape is not valid for that at-rule.
    InvalidPrelude,
    /// A function name matched but its arguments did not.
    MalformedFunctionArguments,
    /// A multiplier found fewer repetitions than its minimum.
    MissingRequiredRepetition,
}

/// Where in the stylesheet a diagnostic applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Location {
    /// A rule, by its index in the enclosing rule list.
    Rule {
        /// Index in the enclosing rule list.
        index: usize,
    },
    /// A declaration, by its index in the enclosing block and its property name.
    Declaration {
        /// Index in the enclosing declaration list.
        index: usize,
        /// The property name as written.
        property: String,
    },
    /// A component value inside a declaration's value.
    Value {
        /// The property name as written.
        property: String,
        /// Index of the component value in the declaration's value.
        offset: usize,
    },
    /// A location inside the `rule`th rule of the enclosing list, such as a
    /// declaration of a style rule or a rule nested in `@media`.
    Nested {
        /// Index of the containing rule in its list.
        rule: usize,
        /// Where inside that rule.
        location: Box<Location>,
    },
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rule { index } => write!(f, "rule {index}"),
            Self::Declaration { index, property } => {
                write!(f, "declaration {index} ({property})")
            }
            Self::Value { property, offset } => write!(f, "{property} value at {offset}"),
            Self::Nested { rule, location } => write!(f, "rule {rule} > {location}"),
        }
    }
}

/// A structured record of a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Machine-readable problem code.
    pub code: DiagnosticCode,
    /// Where the problem is.
    pub location: Location,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    #[must_use]
    pub fn error(code: DiagnosticCode, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            location,
            message: message.into(),
        }
    }

    /// Create a note diagnostic.
    #[must_use]
    pub fn note(code: DiagnosticCode, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            code,
            location,
            message: message.into(),
        }
    }
}

impl Diagnostic {
    /// File this diagnostic under the `rule`th rule of the enclosing list.
    #[must_use]
    pub fn nested_in(self, rule: usize) -> Self {
        Self {
            location: Location::Nested {
                rule,
                location: Box::new(self.location),
            },
            ..self
        }
    }
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// The ordered diagnostics of one sanitization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        #[cfg(feature = "sanitize-trace")]
        tessera_common::warning::trace("sanitize", &diagnostic.to_string());
        self.entries.push(diagnostic);
    }

    /// Move the diagnostics of `inner` here, each filed under the `rule`th
    /// rule. They were already traced when first recorded.
    pub fn append_nested(&mut self, rule: usize, inner: Self) {
        self.entries
            .extend(inner.entries.into_iter().map(|d| d.nested_in(rule)));
    }

    /// Number of diagnostics recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in recording order.
    pub fn iter(&self) -> core::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Count diagnostics with the given code.
    #[must_use]
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.entries.iter().filter(|d| d.code == code).count()
    }

    /// Count diagnostics at [`Severity::Error`].
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Consume the list, returning the diagnostics in recording order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display_is_kebab_case() {
        assert_eq!(DiagnosticCode::UnknownAtRule.to_string(), "unknown-at-rule");
        assert_eq!(
            DiagnosticCode::MalformedFunctionArguments.to_string(),
            "malformed-function-arguments"
        );
    }

    #[test]
    fn test_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidValue,
            Location::Rule { index: 0 },
            "bad",
        ));
        diagnostics.push(Diagnostic::note(
            DiagnosticCode::MalformedFunctionArguments,
            Location::Rule { index: 0 },
            "detail",
        ));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.count(DiagnosticCode::InvalidValue), 1);
        assert_eq!(
            diagnostics.iter().next().map(ToString::to_string).as_deref(),
            Some("error[invalid-value]: bad")
        );
    }

    #[test]
    fn test_nested_locations_keep_the_rule_path() {
        let mut inner = Diagnostics::new();
        inner.push(Diagnostic::error(
            DiagnosticCode::InvalidSelector,
            Location::Rule { index: 2 },
            "bad selector",
        ));
        let mut media = Diagnostics::new();
        media.append_nested(1, inner);
        let mut outer = Diagnostics::new();
        outer.append_nested(0, media);

        let Some(diagnostic) = outer.iter().next() else {
            panic!("one diagnostic");
        };
        assert_eq!(
            diagnostic.location,
            Location::Nested {
                rule: 0,
                location: Box::new(Location::Nested {
                    rule: 1,
                    location: Box::new(Location::Rule { index: 2 }),
                }),
            }
        );
        assert_eq!(diagnostic.location.to_string(), "rule 0 > rule 1 > rule 2");
    }
}
