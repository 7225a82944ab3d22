use std::fmt::{self, Display};

use serde::Serialize;

use crate::position::{Location, Span};

/// Lexical classes produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Identifier,
    /// The rule definition operator `<-`.
    Arrow,
    LParen,
    RParen,
    /// Any character that isn't part of another class.
    Operator,
    StringLiteral,
    Comment,
    Whitespace,
    #[serde(rename = "EOF")]
    Eof,
}

impl TokenKind {
    /// Whitespace and comments carry no structure.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Arrow => "arrow",
            TokenKind::LParen => "left paren",
            TokenKind::RParen => "right paren",
            TokenKind::Operator => "operator",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Comment => "comment",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Eof => "end of input",
        };
        write!(f, "{}", name)
    }
}

/// A slice of grammar source with its class and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character.
    pub position: usize,
    pub line: usize,
    pub column: usize,
    /// False for a string literal missing its closing delimiter.
    #[serde(skip)]
    closed: bool,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenKind, text: &'a str, at: Location) -> Self {
        Token {
            kind,
            text,
            position: at.offset,
            line: at.line,
            column: at.column,
            closed: true,
        }
    }

    pub(crate) fn unclosed(self) -> Self {
        Token {
            closed: false,
            ..self
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.position, self.position + self.text.len())
    }

    pub fn location(&self) -> Location {
        Location {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Whether a string literal ends with its closing delimiter. Always true
    /// for other kinds.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
