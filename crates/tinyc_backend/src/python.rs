use tinyc_frontend::ast::{Func, FuncallStmt, Stmt};
use tinyc_frontend::token::Literal;

use crate::{CodegenError, CodegenErrorKind, CodegenResult};

/// Emits Python 3 source with the same output side effects.
#[derive(Debug, Default)]
pub struct PythonCodegen {
    output: String,
}

impl PythonCodegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(mut self, func: &Func) -> CodegenResult<String> {
        for stmt in &func.body {
            match stmt {
                Stmt::Funcall(call) => self.gen_funcall(call)?,

                // scripts have no exit status to set
                Stmt::Ret(_) => {}
            }
        }

        Ok(self.output)
    }

    fn gen_funcall(&mut self, call: &FuncallStmt) -> CodegenResult<()> {
        match call.name() {
            "printf" => self.gen_printf(call),
            name => Err(CodegenError::at(
                &call.callee,
                CodegenErrorKind::UnknownFunction(name.to_owned()),
            )),
        }
    }

    fn gen_printf(&mut self, call: &FuncallStmt) -> CodegenResult<()> {
        let (format, values) = match call.args.split_first() {
            Some((Literal::String(format), values)) => (format, values),

            Some((other, _)) => {
                return Err(CodegenError::at(
                    &call.callee,
                    CodegenErrorKind::ExpectedStringArgument {
                        found: other.type_name(),
                    },
                ))
            }

            None => {
                return Err(CodegenError::at(
                    &call.callee,
                    CodegenErrorKind::MissingFormatString,
                ))
            }
        };

        let line = if values.is_empty() {
            match format.strip_suffix('\n') {
                Some(line) => format!("print({})", string_literal(line)),
                None => format!("print({}, end=\"\")", string_literal(format)),
            }
        } else {
            let values = values.iter().map(literal).collect::<Vec<_>>().join(", ");
            format!("print({} % ({values}), end=\"\")", string_literal(format))
        };

        self.push_line(line);

        Ok(())
    }

    fn push_line(&mut self, s: impl AsRef<str>) {
        self.output.push_str(s.as_ref());
        self.output.push('\n');
    }
}

fn literal(value: &Literal) -> String {
    match value {
        Literal::String(s) => string_literal(s),
        Literal::Integer(n) => n.to_string(),
    }
}

fn string_literal(s: &str) -> String {
    let mut literal = String::with_capacity(s.len() + 2);

    literal.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            ch if ch.is_control() => literal.push_str(&format!("\\x{:02x}", u32::from(ch))),
            ch => literal.push(ch),
        }
    }
    literal.push('"');

    literal
}
