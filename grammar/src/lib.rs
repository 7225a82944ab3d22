//! Front-end for NPeg style grammars: tokenizing and structural validation.
//!
//! Nothing here executes a grammar. The tokenizer and validator are total
//! functions: problems with the grammar are reported as diagnostics, never as
//! errors.

use std::fmt::{self, Display};

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

mod lexer;
mod position;
mod token;
mod validate;

pub use lexer::{tokenize, tokenize_with, BlockComment, LexicalRules, Tokens};
pub use position::{Location, Span};
pub use token::{Token, TokenKind};
pub use validate::{check, validate};

/// Grammar source along with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarDocument {
    pub source_text: String,
    /// A path or URI, used for provenance in generated output.
    pub file_identifier: String,
}

impl GrammarDocument {
    pub fn new(file_identifier: impl Into<String>, source_text: impl Into<String>) -> Self {
        GrammarDocument {
            source_text: source_text.into(),
            file_identifier: file_identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    /// Line of `span.start`, 1-based.
    pub line: usize,
    /// Column of `span.start`, 1-based.
    pub column: usize,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span, at: Location) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            span,
            line: at.line,
            column: at.column,
        }
    }

    pub fn error(message: impl Into<String>, span: Span, at: Location) -> Self {
        Self::new(Severity::Error, message, span, at)
    }

    pub fn warning(message: impl Into<String>, span: Span, at: Location) -> Self {
        Self::new(Severity::Warning, message, span, at)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Formats as `severity:line:column:message`.
impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.severity, self.line, self.column, self.message
        )
    }
}

/// Outcome of validating a grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Defined rules, unique, in order of first definition.
    pub rule_names: Vec<String>,
}

impl ValidationResult {
    /// A grammar is valid when nothing reported is an error. Warnings don't
    /// count.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn defines(&self, rule: &str) -> bool {
        self.rule_names.iter().any(|name| name == rule)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ValidationResult", 3)?;
        s.serialize_field("is_valid", &self.is_valid())?;
        s.serialize_field("diagnostics", &self.diagnostics)?;
        s.serialize_field("rule_names", &self.rule_names)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(severity: Severity) -> Diagnostic {
        Diagnostic::new(severity, "msg", Span::new(0, 1), Location::start())
    }

    #[test]
    fn validity_ignores_warnings() {
        let result = ValidationResult {
            diagnostics: vec![diag(Severity::Warning)],
            rule_names: vec!["a".to_owned()],
        };
        assert!(result.is_valid());

        let result = ValidationResult {
            diagnostics: vec![diag(Severity::Warning), diag(Severity::Error)],
            rule_names: vec!["a".to_owned()],
        };
        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(
            "no rule definitions found",
            Span::new(4, 4),
            Location {
                offset: 4,
                line: 2,
                column: 3,
            },
        );
        assert_eq!(d.to_string(), "error:2:3:no rule definitions found");
    }

    #[test]
    fn validation_result_json_includes_validity() {
        let result = ValidationResult {
            diagnostics: vec![],
            rule_names: vec!["a".to_owned()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_valid"], serde_json::Value::Bool(true));
        assert_eq!(json["rule_names"][0], "a");
    }
}
