#[cfg(test)]
mod tests;

use tinyc_session::diagnostics::prelude::*;

use crate::ast::*;
use crate::lexer::{LexError, Lexer};
use crate::token::{Literal, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexError),

    #[error("expected {expected} but got {found}")]
    Expected {
        expected: String,
        found: String,
        loc: Location,
        width: usize,
    },

    #[error("unsupported type `{ty}`")]
    UnsupportedType {
        ty: String,
        loc: Location,
        width: usize,
    },
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        match self {
            ParseError::Lexer(error) => error.into_diagnostic(source_id),

            ParseError::Expected {
                ref expected,
                loc,
                width,
                ..
            } => Diagnostic::error(format!("parse error: {self}"))
                .with_snippet(Snippet::new(
                    format!("expected {expected}"),
                    *source_id,
                    loc,
                    width,
                )),

            ParseError::UnsupportedType { loc, width, .. } => {
                Diagnostic::error(format!("parse error: {self}")).with_snippet(Snippet::new(
                    "only `int` is supported",
                    *source_id,
                    loc,
                    width,
                ))
            }
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    peeked: Option<Token>,
}

impl<'src> Parser<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            peeked: None,
        }
    }

    pub fn parse(mut self) -> ParseResult<Func> {
        let func = self.parse_function()?;

        if let Some(token) = self.next_token()? {
            return Err(self.error_expected("end of input", Some(&token)));
        }

        Ok(func)
    }

    fn parse_function(&mut self) -> ParseResult<Func> {
        self.parse_type()?;

        let name = self.expect_token(&[TokenKind::Name])?;

        self.expect_token(&[TokenKind::OpenParen])?;
        self.eat_name("void")?;
        self.expect_token(&[TokenKind::CloseParen])?;

        let body = self.parse_block()?;

        Ok(Func { name, body })
    }

    fn parse_type(&mut self) -> ParseResult<()> {
        let ty = self.expect_token(&[TokenKind::Name])?;

        if ty.is_name("int") {
            Ok(())
        } else {
            Err(ParseError::UnsupportedType {
                ty: ty.text().unwrap_or_default().to_owned(),
                loc: ty.loc,
                width: ty.width,
            })
        }
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect_token(&[TokenKind::OpenBrace])?;

        let mut body = vec![];

        loop {
            let head = self.expect_token(&[TokenKind::Name, TokenKind::CloseBrace])?;
            if head.kind == TokenKind::CloseBrace {
                break;
            }

            let stmt = if head.is_name("return") {
                Stmt::Ret(self.parse_return(head)?)
            } else {
                Stmt::Funcall(FuncallStmt {
                    args: self.parse_arglist()?,
                    callee: head,
                })
            };

            self.expect_token(&[TokenKind::Semicolon])?;

            body.push(stmt);
        }

        Ok(body)
    }

    fn parse_return(&mut self, keyword: Token) -> ParseResult<RetStmt> {
        let token = self.expect_token(&[TokenKind::Number])?;

        match token.value {
            Literal::Integer(value) => Ok(RetStmt {
                value,
                loc: keyword.loc,
            }),
            Literal::String(_) => {
                Err(self.error_expected_kinds(&[TokenKind::Number], Some(&token)))
            }
        }
    }

    fn parse_arglist(&mut self) -> ParseResult<Vec<Literal>> {
        self.expect_token(&[TokenKind::OpenParen])?;

        let mut args = vec![];

        if self.eat_kind(TokenKind::CloseParen)? {
            return Ok(args);
        }

        loop {
            let arg = self.expect_token(&[TokenKind::String, TokenKind::Number])?;
            args.push(arg.value);

            let separator = self.expect_token(&[TokenKind::Comma, TokenKind::CloseParen])?;
            if separator.kind == TokenKind::CloseParen {
                return Ok(args);
            }
        }
    }

    /// Takes the next token, failing unless it is one of `kinds`.
    fn expect_token(&mut self, kinds: &[TokenKind]) -> ParseResult<Token> {
        match self.next_token()? {
            Some(token) if kinds.contains(&token.kind) => Ok(token),
            other => Err(self.error_expected_kinds(kinds, other.as_ref())),
        }
    }

    fn eat_kind(&mut self, kind: TokenKind) -> ParseResult<bool> {
        let matches = self.peek_token()?.is_some_and(|t| t.kind == kind);
        if matches {
            self.peeked = None;
        }
        Ok(matches)
    }

    fn eat_name(&mut self, name: &str) -> ParseResult<bool> {
        let matches = self.peek_token()?.is_some_and(|t| t.is_name(name));
        if matches {
            self.peeked = None;
        }
        Ok(matches)
    }

    fn next_token(&mut self) -> ParseResult<Option<Token>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => Ok(self.lexer.next_token()?),
        }
    }

    fn peek_token(&mut self) -> ParseResult<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn error_expected_kinds(&self, kinds: &[TokenKind], found: Option<&Token>) -> ParseError {
        let expected = kinds
            .iter()
            .map(TokenKind::token_name)
            .collect::<Vec<_>>()
            .join(" or ");

        self.error_expected(expected, found)
    }

    fn error_expected(&self, expected: impl Into<String>, found: Option<&Token>) -> ParseError {
        match found {
            Some(token) => ParseError::Expected {
                expected: expected.into(),
                found: token.describe(),
                loc: token.loc,
                width: token.width,
            },
            None => ParseError::Expected {
                expected: expected.into(),
                found: "end of input".to_owned(),
                loc: self.lexer.loc(),
                width: 1,
            },
        }
    }
}
