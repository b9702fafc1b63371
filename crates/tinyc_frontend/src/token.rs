use tinyc_diagnostic::location::Location;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Literal,
    pub loc: Location,

    /// Length of the token in source bytes.
    pub width: usize,
}

impl Token {
    /// The text of a name, string or literal token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Literal::String(s) => Some(s),
            Literal::Integer(_) => None,
        }
    }

    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.text() == Some(name)
    }

    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Name => format!("name `{}`", self.text().unwrap_or_default()),
            kind => kind.token_name().to_owned(),
        }
    }
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Name,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Semicolon,

    Number,
    String,
}

impl TokenKind {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '(' => Some(TokenKind::OpenParen),
            ')' => Some(TokenKind::CloseParen),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ',' => Some(TokenKind::Comma),
            ';' => Some(TokenKind::Semicolon),
            _ => None,
        }
    }

    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Name => "name",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Number => "number",
            TokenKind::String => "string",
        }
    }
}

/// A string or integer value, as carried by tokens and call arguments.
#[derive(Node!)]
pub enum Literal {
    String(String),
    Integer(i64),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Integer(_) => "integer",
        }
    }
}
