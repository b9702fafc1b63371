use tinyc_diagnostic::location::Location;

use crate::token::{Literal, Token};
use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Func {
    pub name: Token,
    pub body: Vec<Stmt>,
}

impl Func {
    pub fn name(&self) -> &str {
        self.name.text().unwrap_or_default()
    }
}

#[derive(Node!)]
pub enum Stmt {
    Funcall(FuncallStmt),
    Ret(RetStmt),
}

/// A call to a built-in function with literal arguments.
#[derive(Node!)]
pub struct FuncallStmt {
    pub callee: Token,
    pub args: Vec<Literal>,
}

impl FuncallStmt {
    pub fn name(&self) -> &str {
        self.callee.text().unwrap_or_default()
    }
}

#[derive(NodeCopy!)]
pub struct RetStmt {
    pub value: i64,
    pub loc: Location,
}
