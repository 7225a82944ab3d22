use std::collections::HashSet;

use tracing::debug;

use crate::lexer::tokenize;
use crate::position::{Location, Span};
use crate::token::{Token, TokenKind};
use crate::{Diagnostic, ValidationResult};

/// Tokenize with the default lexical rules and validate.
pub fn check(source: &str) -> ValidationResult {
    validate(tokenize(source))
}

/// Check the structure of a token stream in a single pass.
///
/// Reports unbalanced parentheses, malformed rule heads and a missing rule
/// definition as errors. Duplicate definitions and unterminated strings are
/// warnings.
pub fn validate<'a, I>(tokens: I) -> ValidationResult
where
    I: IntoIterator<Item = Token<'a>>,
{
    let mut validator = Validator::default();
    for token in tokens {
        validator.visit(token);
    }
    validator.finish()
}

/// Consecutive closing parens with nothing open.
struct StrayRun {
    span: Span,
    at: Location,
    count: usize,
}

#[derive(Default)]
struct Validator<'a> {
    diagnostics: Vec<Diagnostic>,
    rule_names: Vec<String>,
    defined: HashSet<&'a str>,
    depth: usize,
    /// The paren that took depth from zero to one. If depth is still positive
    /// at the end, this is the outermost unmatched paren.
    outermost: Option<Location>,
    stray: Option<StrayRun>,
    /// Last token that wasn't whitespace or a comment.
    previous: Option<Token<'a>>,
    end: usize,
}

impl<'a> Validator<'a> {
    fn visit(&mut self, token: Token<'a>) {
        self.end = self.end.max(token.span().end);
        if token.is_trivia() {
            return;
        }

        match token.kind {
            TokenKind::RParen if self.depth == 0 => self.stray_close(&token),
            TokenKind::RParen => {
                self.flush_stray();
                self.depth -= 1;
            }
            TokenKind::LParen => {
                self.flush_stray();
                if self.depth == 0 {
                    self.outermost = Some(token.location());
                }
                self.depth += 1;
            }
            TokenKind::Arrow => {
                self.flush_stray();
                self.rule_head(&token);
            }
            TokenKind::StringLiteral => {
                self.flush_stray();
                if !token.is_closed() {
                    self.diagnostics.push(Diagnostic::warning(
                        "unterminated string literal",
                        token.span(),
                        token.location(),
                    ));
                }
            }
            _ => self.flush_stray(),
        }

        self.previous = Some(token);
    }

    fn rule_head(&mut self, arrow: &Token<'a>) {
        match self.previous {
            Some(name) if name.kind == TokenKind::Identifier => {
                if self.defined.insert(name.text) {
                    self.rule_names.push(name.text.to_owned());
                } else {
                    self.diagnostics.push(Diagnostic::warning(
                        format!("rule `{}` is defined more than once", name.text),
                        name.span(),
                        name.location(),
                    ));
                }
            }
            _ => self.diagnostics.push(Diagnostic::error(
                "rule definition is missing a name",
                arrow.span(),
                arrow.location(),
            )),
        }
    }

    fn stray_close(&mut self, token: &Token<'a>) {
        if let Some(run) = self.stray.as_mut() {
            run.span = run.span.join(&token.span());
            run.count += 1;
            return;
        }
        self.stray = Some(StrayRun {
            span: token.span(),
            at: token.location(),
            count: 1,
        });
    }

    fn flush_stray(&mut self) {
        if let Some(run) = self.stray.take() {
            let message = if run.count == 1 {
                "unmatched closing parenthesis".to_owned()
            } else {
                format!("{} unmatched closing parentheses", run.count)
            };
            self.diagnostics
                .push(Diagnostic::error(message, run.span, run.at));
        }
    }

    fn finish(mut self) -> ValidationResult {
        self.flush_stray();

        if self.depth > 0 {
            let at = self.outermost.unwrap_or_else(Location::start);
            self.diagnostics.push(Diagnostic::error(
                format!(
                    "unbalanced grouping, {} unmatched opening parentheses",
                    self.depth
                ),
                Span::new(at.offset, self.end),
                at,
            ));
        }

        if self.rule_names.is_empty() {
            self.diagnostics.push(Diagnostic::error(
                "no rule definitions found",
                Span::new(0, self.end),
                Location::start(),
            ));
        }

        let result = ValidationResult {
            diagnostics: self.diagnostics,
            rule_names: self.rule_names,
        };
        debug!(
            rules = result.rule_names.len(),
            diagnostics = result.diagnostics.len(),
            valid = result.is_valid(),
            "validated grammar"
        );
        result
    }
}
