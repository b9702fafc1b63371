mod fasm;
mod python;

use std::fmt;
use std::str::FromStr;

use tinyc_frontend::ast::Func;
use tinyc_frontend::token::Token;
use tinyc_session::diagnostics::prelude::*;

pub use fasm::FasmCodegen;
pub use python::PythonCodegen;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct CodegenError {
    pub kind: CodegenErrorKind,
    pub loc: Location,
    pub width: usize,
}

impl CodegenError {
    fn at(callee: &Token, kind: CodegenErrorKind) -> Self {
        Self {
            kind,
            loc: callee.loc,
            width: callee.width,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenErrorKind {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("expected 1 argument but got {found}")]
    ExpectedOneArgument { found: usize },

    #[error("expected string argument but got {found}")]
    ExpectedStringArgument { found: &'static str },

    #[error("expected a format string argument")]
    MissingFormatString,
}

impl IntoDiagnostic<SourceId> for CodegenError {
    fn into_diagnostic(self, source_id: &SourceId) -> Diagnostic {
        let label = match self.kind {
            CodegenErrorKind::UnknownFunction(_) => "unknown function",
            _ => "in this call",
        };

        Diagnostic::error(format!("semantic error: {}", self.kind))
            .with_snippet(Snippet::new(label, *source_id, self.loc, self.width))
    }
}

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    #[default]
    Python3,
    FasmX86_64Linux,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Python3, Target::FasmX86_64Linux];

    pub fn name(self) -> &'static str {
        match self {
            Target::Python3 => "python3",
            Target::FasmX86_64Linux => "fasm-x86_64-linux",
        }
    }

    /// Generates the complete output text for `func`.
    pub fn generate(self, func: &Func) -> CodegenResult<String> {
        tracing::debug!(backend = self.name(), "generating code");

        match self {
            Target::Python3 => PythonCodegen::new().run(func),
            Target::FasmX86_64Linux => FasmCodegen::new().run(func),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown target `{0}`")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| UnknownTarget(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_names_round_trip() {
        for target in Target::ALL {
            assert_eq!(target.name().parse::<Target>(), Ok(target));
        }

        assert_eq!(
            "python2".parse::<Target>(),
            Err(UnknownTarget("python2".to_owned()))
        );
        assert_eq!(Target::default(), Target::Python3);
    }

    #[test]
    fn unknown_function_diagnostic() {
        let func = tinyc_frontend::parse("int main() {\n    puts(\"x\");\n}").unwrap();
        let err = Target::Python3.generate(&func).unwrap_err();

        assert_eq!(err.loc, Location::new(1, 4));

        let diagnostic = err.into_diagnostic(&SourceId(0));
        assert_eq!(diagnostic.message, "semantic error: unknown function `puts`");
        assert_eq!(diagnostic.snippets[0].width, 4);
    }
}
