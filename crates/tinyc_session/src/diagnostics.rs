use std::io::IsTerminal;

use crate::sourcemap::SourceMap;
use tinyc_diagnostic::termcolor::{ColorChoice, StandardStream};

pub use tinyc_diagnostic::*;

pub mod prelude {
    pub use super::{Diagnostic, IntoDiagnostic, Snippet};
    pub use crate::sourcemap::SourceId;
    pub use tinyc_diagnostic::location::Location;
}

pub type Diagnostic = tinyc_diagnostic::Diagnostic<SourceMap>;
pub type Snippet = tinyc_diagnostic::Snippet<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

/// Renders diagnostics to stderr, in colour only when stderr is a terminal.
#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        let colors = color_choice(std::io::stderr().is_terminal());

        Self {
            stream: StandardStream::stderr(colors),
            config: Config::default(),
        }
    }
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        diagnostic
            .write_to_stream(sources, &self.config, &mut self.stream)
            .expect("failed to emit diagnostic");
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}
