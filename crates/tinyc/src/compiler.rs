use tinyc_backend::Target;
use tinyc_session::diagnostics::DiagnosticEmitter;
use tinyc_session::sourcemap::Source;
use tinyc_session::Session;

use crate::CompilerResult;

/// Compiles one source file, reporting any error to the session's emitter.
///
/// Returns the complete generated text; nothing is produced for a source
/// that fails at any stage.
pub fn compile<D: DiagnosticEmitter>(
    session: &mut Session<D>,
    name: impl Into<String>,
    source: impl Into<String>,
    target: Target,
) -> CompilerResult<String> {
    let source = Source::new(name, source);
    tracing::debug!(source = %source.name, %target, "compiling");

    let parsed = tinyc_frontend::parse(&source.source);
    let source_id = session.sources.insert(source);

    let func = parsed.map_err(|err| session.report(err, &source_id))?;

    target
        .generate(&func)
        .map_err(|err| session.report(err, &source_id).into())
}
