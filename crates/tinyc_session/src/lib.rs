pub mod diagnostics;
pub mod sourcemap;

use diagnostics::*;
use sourcemap::SourceMap;

/// Proof that a diagnostic has been emitted for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// State shared by every stage of one compilation.
pub struct Session<D: DiagnosticEmitter> {
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(diagnostics: D) -> Self {
        Self {
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn report<Context>(
        &mut self,
        error: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> ErrorsEmitted {
        let diagnostic = error.into_diagnostic(cx);
        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);
        ErrorsEmitted
    }
}
