//! Scans grammar source into tokens.
//!
//! Scanning is total: every byte of the input ends up in exactly one token,
//! and characters that don't belong to any other class become single
//! character `Operator` tokens. The stream always ends with one `Eof` token.

use std::iter::FusedIterator;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::{alpha1, alphanumeric1, char, multispace1},
    combinator::{recognize, rest},
    multi::many0_count,
    sequence::{pair, tuple},
    IResult,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::position::Location;
use crate::token::{Token, TokenKind};

static DEFAULT_RULES: Lazy<LexicalRules> = Lazy::new(LexicalRules::default);

/// A comment with an opening and closing delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockComment {
    pub open: String,
    pub close: String,
}

/// The comment and string syntax the tokenizer recognizes.
///
/// The defaults follow NPeg's host language: `#` line comments and single or
/// double quoted strings with backslash escapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalRules {
    pub line_comments: Vec<String>,
    pub block_comments: Vec<BlockComment>,
    pub string_delimiters: Vec<char>,
    pub escape: Option<char>,
}

impl Default for LexicalRules {
    fn default() -> Self {
        LexicalRules {
            line_comments: vec!["#".to_owned()],
            block_comments: Vec::new(),
            string_delimiters: vec!['"', '\''],
            escape: Some('\\'),
        }
    }
}

/// Tokenize `source` using the default lexical rules.
pub fn tokenize(source: &str) -> Tokens<'_, 'static> {
    Tokens::new(source, &DEFAULT_RULES)
}

/// Tokenize `source` using the provided lexical rules.
pub fn tokenize_with<'a, 'r>(source: &'a str, rules: &'r LexicalRules) -> Tokens<'a, 'r> {
    Tokens::new(source, rules)
}

/// Lazy token stream over some source text. Cloning a stream restarts
/// scanning from the clone's current position.
#[derive(Debug, Clone)]
pub struct Tokens<'a, 'r> {
    rest: &'a str,
    at: Location,
    rules: &'r LexicalRules,
    finished: bool,
}

impl<'a, 'r> Tokens<'a, 'r> {
    fn new(source: &'a str, rules: &'r LexicalRules) -> Self {
        Tokens {
            rest: source,
            at: Location::start(),
            rules,
            finished: false,
        }
    }

    /// Classify the longest token at the head of the remaining input. The
    /// remaining input must not be empty.
    fn classify(&self) -> Token<'a> {
        let input = self.rest;
        let token = |kind: TokenKind, text: &'a str| Token::new(kind, text, self.at);

        if let Some(text) = matched(multispace1(input)) {
            return token(TokenKind::Whitespace, text);
        }

        let blocks = self
            .rules
            .block_comments
            .iter()
            .filter(|b| !b.open.is_empty() && !b.close.is_empty());
        for block in blocks {
            if let Some(text) = matched(block_comment(input, &block.open, &block.close)) {
                return token(TokenKind::Comment, text);
            }
        }

        let prefixes = self.rules.line_comments.iter().filter(|p| !p.is_empty());
        for prefix in prefixes {
            if let Some(text) = matched(line_comment(input, prefix)) {
                return token(TokenKind::Comment, text);
            }
        }

        for &delimiter in &self.rules.string_delimiters {
            if let Ok((_, (text, closed))) = string_literal(input, delimiter, self.rules.escape) {
                let literal = token(TokenKind::StringLiteral, text);
                return if closed { literal } else { literal.unclosed() };
            }
        }

        if let Some(text) = matched(tag("<-")(input)) {
            return token(TokenKind::Arrow, text);
        }
        if let Some(text) = matched(tag("(")(input)) {
            return token(TokenKind::LParen, text);
        }
        if let Some(text) = matched(tag(")")(input)) {
            return token(TokenKind::RParen, text);
        }
        if let Some(text) = matched(identifier(input)) {
            return token(TokenKind::Identifier, text);
        }

        let width = input.chars().next().map_or(input.len(), |c| c.len_utf8());
        token(TokenKind::Operator, &input[..width])
    }
}

impl<'a, 'r> Iterator for Tokens<'a, 'r> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        if self.rest.is_empty() {
            self.finished = true;
            return Some(Token::new(TokenKind::Eof, self.rest, self.at));
        }

        let token = self.classify();
        self.rest = &self.rest[token.text.len()..];
        self.at.advance(token.text);
        Some(token)
    }
}

impl<'a, 'r> FusedIterator for Tokens<'a, 'r> {}

/// Only successful, non-empty matches produce a token. This keeps a
/// misconfigured rule from stalling the scanner.
fn matched<'a>(result: IResult<&'a str, &'a str>) -> Option<&'a str> {
    result.ok().map(|(_, text)| text).filter(|text| !text.is_empty())
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn line_comment<'a>(input: &'a str, prefix: &str) -> IResult<&'a str, &'a str> {
    recognize(pair(tag(prefix), take_till(is_line_break)))(input)
}

/// An unterminated block comment runs to the end of input.
fn block_comment<'a>(input: &'a str, open: &str, close: &str) -> IResult<&'a str, &'a str> {
    alt((
        recognize(tuple((tag(open), take_until(close), tag(close)))),
        recognize(pair(tag(open), rest)),
    ))(input)
}

/// Strings never span lines. An unterminated string runs to the end of its
/// line. The flag tells whether an unescaped closing delimiter was found.
fn string_literal<'a>(
    input: &'a str,
    delimiter: char,
    escape: Option<char>,
) -> IResult<&'a str, (&'a str, bool)> {
    let (body, _) = char(delimiter)(input)?;
    let opening = input.len() - body.len();

    let mut end = input.len();
    let mut closed = false;
    let mut escaped = false;
    for (idx, c) in body.char_indices() {
        if is_line_break(c) {
            end = opening + idx;
            break;
        }
        if escaped {
            escaped = false;
        } else if Some(c) == escape {
            escaped = true;
        } else if c == delimiter {
            end = opening + idx + c.len_utf8();
            closed = true;
            break;
        }
    }

    Ok((&input[end..], (&input[..end], closed)))
}
