use tinyc_frontend::ast::{Func, FuncallStmt, Stmt};
use tinyc_frontend::token::Literal;

use crate::{CodegenError, CodegenErrorKind, CodegenResult};

const SYS_WRITE: u32 = 1;
const SYS_EXIT: u32 = 60;
const STDOUT: u32 = 1;

/// Emits a freestanding x86-64 Linux executable in flat assembler syntax.
///
/// Instructions are emitted in statement order. Every string written by
/// `printf` is collected into a string table, labelled `str_N` by first use,
/// and emitted as a writable data segment after the code.
#[derive(Debug, Default)]
pub struct FasmCodegen {
    output: String,
    strings: Vec<Vec<u8>>,
}

impl FasmCodegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(mut self, func: &Func) -> CodegenResult<String> {
        self.push_line(0, "format ELF64 executable 3");
        self.push_line(0, "segment readable executable");
        self.push_line(0, "entry start");
        self.push_line(0, "start:");

        for stmt in &func.body {
            match stmt {
                Stmt::Funcall(call) => self.gen_funcall(call)?,
                Stmt::Ret(ret) => self.gen_exit(ret.value),
            }
        }

        self.gen_data_segment();

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
        let s = match call.args.as_slice() {
            [Literal::String(s)] => s,

            [other] => {
                return Err(CodegenError::at(
                    &call.callee,
                    CodegenErrorKind::ExpectedStringArgument {
                        found: other.type_name(),
                    },
                ))
            }

            args => {
                return Err(CodegenError::at(
                    &call.callee,
                    CodegenErrorKind::ExpectedOneArgument { found: args.len() },
                ))
            }
        };

        let index = self.strings.len();

        self.push_line(1, format!("mov rax, {SYS_WRITE}"));
        self.push_line(1, format!("mov rdi, {STDOUT}"));
        self.push_line(1, format!("mov rsi, str_{index}"));
        self.push_line(1, format!("mov rdx, {}", s.len()));
        self.push_line(1, "syscall");

        self.strings.push(s.as_bytes().to_vec());

        Ok(())
    }

    fn gen_exit(&mut self, code: i64) {
        self.push_line(1, format!("mov rax, {SYS_EXIT}"));
        self.push_line(1, format!("mov rdi, {code}"));
        self.push_line(1, "syscall");
    }

    fn gen_data_segment(&mut self) {
        self.push_line(0, "segment readable writeable");

        let strings = std::mem::take(&mut self.strings);

        tracing::debug!(strings = strings.len(), "emitting string table");

        for (index, bytes) in strings.iter().enumerate() {
            if bytes.is_empty() {
                // `db` needs at least one value
                self.push_line(0, format!("str_{index}:"));
            } else {
                let bytes = bytes
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                self.push_line(0, format!("str_{index} db {bytes}"));
            }
        }
    }

    fn push_line(&mut self, indent: u8, s: impl AsRef<str>) {
        const INDENT: &str = "    ";

        for _ in 0..indent {
            self.output.push_str(INDENT);
        }

        self.output.push_str(s.as_ref());
        self.output.push('\n');
    }
}
