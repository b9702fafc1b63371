#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod token;

pub use lexer::{LexError, LexErrorKind, LexResult, Lexer};
pub use parser::{ParseError, ParseResult, Parser};

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

/// Lexes and parses a whole source into its single function.
pub fn parse(source: &str) -> ParseResult<ast::Func> {
    let func = Parser::new(Lexer::new(source)).parse()?;

    tracing::debug!(
        name = func.name(),
        statements = func.body.len(),
        "parsed function"
    );

    Ok(func)
}
