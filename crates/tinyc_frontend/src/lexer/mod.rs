
use std::str::Chars;

use tinyc_session::diagnostics::prelude::*;
use tinyc_utils::peek::Peek;

use crate::token::{Literal, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub loc: Location,
    pub width: usize,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unclosed string literal")]
    UnclosedString,

    #[error("unknown escape sequence `\\{0}`")]
    UnknownEscape(char),

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("integer literal does not fit in 64 bits")]
    IntegerOverflow,
}

impl LexErrorKind {
    fn label(&self) -> &'static str {
        match self {
            LexErrorKind::UnclosedString => "string starts here",
            LexErrorKind::UnknownEscape(_) => "unknown escape",
            LexErrorKind::UnexpectedChar(_) => "unexpected character",
            LexErrorKind::IntegerOverflow => "integer overflow",
        }
    }
}

impl IntoDiagnostic<SourceId> for LexError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        Diagnostic::error(format!("syntax error: {}", self.kind))
            .with_snippet(Snippet::new(
                self.kind.label(),
                *source_id,
                self.loc,
                self.width,
            ))
    }
}

pub type LexResult<T> = Result<T, LexError>;

/// Produces tokens one at a time on demand.
///
/// Once the input is exhausted, every further call to
/// [`Lexer::next_token`] returns `Ok(None)`.
pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    row: usize,
    /// Byte offset of the beginning of the current line.
    bol: usize,

    token_start: usize,
    token_loc: Location,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            row: 0,
            bol: 0,

            token_start: 0,
            token_loc: Location::default(),
        }
    }

    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        self.skip_trivia();

        self.token_start = self.byte_pos();
        self.token_loc = self.loc();

        let Some(first) = self.bump() else {
            return Ok(None);
        };

        let (kind, value) = match first {
            ch if ch.is_ascii_alphabetic() => (TokenKind::Name, Literal::String(self.lex_name())),

            '"' => (TokenKind::String, Literal::String(self.lex_string()?)),

            ch @ '0'..='9' => (TokenKind::Number, Literal::Integer(self.lex_integer(ch)?)),

            ch => match TokenKind::from_char(ch) {
                Some(kind) => (kind, Literal::String(ch.to_string())),
                None => return Err(self.error(LexErrorKind::UnexpectedChar(ch))),
            },
        };

        Ok(Some(Token {
            kind,
            value,
            loc: self.token_loc,
            width: self.byte_pos() - self.token_start,
        }))
    }

    /// The location of the next character to be lexed.
    pub fn loc(&self) -> Location {
        Location::new(self.row, self.byte_pos() - self.bol)
    }

    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.chars.peek(), Some(ch) if ch.is_ascii_whitespace()) {
                self.bump();
            }

            let at_comment = match self.chars.peek() {
                Some('#') => true,
                Some('/') => self.chars.peek_second() == Some('/'),
                _ => false,
            };

            if !at_comment {
                return;
            }

            while !matches!(self.bump(), Some('\n') | None) {}
        }
    }

    fn lex_name(&mut self) -> String {
        while matches!(self.chars.peek(), Some(ch) if ch.is_ascii_alphanumeric()) {
            self.bump();
        }

        self.all[self.token_start..self.byte_pos()].to_owned()
    }

    fn lex_string(&mut self) -> LexResult<String> {
        let mut value = String::new();

        loop {
            let escape_start = self.byte_pos();
            let escape_loc = self.loc();

            match self.bump() {
                Some('"') => return Ok(value),

                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('"') => value.push('"'),
                    Some(ch) => {
                        return Err(LexError {
                            kind: LexErrorKind::UnknownEscape(ch),
                            loc: escape_loc,
                            width: self.byte_pos() - escape_start,
                        })
                    }
                    None => return Err(self.error(LexErrorKind::UnclosedString)),
                },

                Some(ch) => value.push(ch),

                None => return Err(self.error(LexErrorKind::UnclosedString)),
            }
        }
    }

    fn lex_integer(&mut self, first: char) -> LexResult<i64> {
        let mut n = first.to_digit(10).map(i64::from);

        while let Some(ch @ '0'..='9') = self.chars.peek() {
            self.bump();

            let digit = ch.to_digit(10).map(i64::from);

            n = n.and_then(|n| n.checked_mul(10));
            n = n.and_then(|n| n.checked_add(digit?));
        }

        n.ok_or_else(|| self.error(LexErrorKind::IntegerOverflow))
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;

        if ch == '\n' {
            self.row += 1;
            self.bol = self.byte_pos();
        }

        Some(ch)
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            loc: self.token_loc,
            width: self.byte_pos() - self.token_start,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
