use std::ffi::OsString;

use tinyc_backend::Target;
use tinyc_session::diagnostics::termcolor::NoColor;
use tinyc_session::diagnostics::Config;
use tinyc_session::Session;

use crate::cli::Cli;
use crate::compiler::compile;
use crate::CompilerError;

fn test_compiles(source: &str, should_compile: bool) {
    for target in Target::ALL {
        let mut session = Session::new(vec![]);
        let compiled = compile(&mut session, "main.c", source, target).is_ok();

        match (compiled, should_compile) {
            (false, true) => panic!(
                "failed to compile for {target}: {source:?}, diagnostics: {:?}",
                session.diagnostics
            ),
            (true, false) => panic!("unexpectedly compiled for {target}: {source:?}"),
            _ => {}
        }
    }
}

/// Compiles `source`, returning either the output or the rendered diagnostics.
fn compile_to_string(source: &str, target: Target) -> String {
    let mut session = Session::new(vec![]);

    match compile(&mut session, "main.c", source, target) {
        Ok(output) => output,
        Err(_) => {
            let mut stream = NoColor::new(vec![]);
            for diagnostic in &session.diagnostics {
                diagnostic
                    .write_to_stream(&session.sources, &Config::default(), &mut stream)
                    .unwrap();
            }
            String::from_utf8(stream.into_inner()).unwrap()
        }
    }
}

#[test]
fn return_only() {
    test_compiles("int main() { return 0; }", true);
}

#[test]
fn hello_world() {
    test_compiles("int main(void) {\n    printf(\"Hello, World\\n\");\n    return 0;\n}\n", true);
}

#[test]
fn comments() {
    test_compiles("// entry\nint main() {\n    # nothing here\n    return 0;\n}", true);
}

#[test]
fn empty_source() {
    test_compiles("", false);
}

#[test]
fn missing_paren() {
    test_compiles("int main( { return 0; }", false);
}

#[test]
fn unknown_function() {
    test_compiles("int main() { puts(\"x\"); }", false);
}

#[test]
fn unclosed_string() {
    test_compiles("int main() { printf(\"x); }", false);
}

#[test]
fn python_output() {
    let output = compile_to_string(
        "int main() { printf(\"Hi\\n\"); printf(\"%d\\n\", 5); return 0; }",
        Target::Python3,
    );

    insta::assert_snapshot!(output, @r###"
    print("Hi")
    print("%d\n" % (5), end="")
    "###);
}

#[test]
fn fasm_output() {
    let output = compile_to_string(
        "int main() { printf(\"Hi\"); return 7; }",
        Target::FasmX86_64Linux,
    );

    insta::assert_snapshot!(output, @r###"
    format ELF64 executable 3
    segment readable executable
    entry start
    start:
        mov rax, 1
        mov rdi, 1
        mov rsi, str_0
        mov rdx, 2
        syscall
        mov rax, 60
        mov rdi, 7
        syscall
    segment readable writeable
    str_0 db 72,105
    "###);
}

#[test]
fn parse_error_diagnostic() {
    let mut session = Session::new(vec![]);
    let result = compile(&mut session, "main.c", "int main( { return 0; }", Target::Python3);

    assert!(result.is_err());
    assert_eq!(session.diagnostics.len(), 1);

    let output = compile_to_string("int main( { return 0; }", Target::Python3);
    insta::assert_snapshot!(output, @r###"
    main.c:1:11: error: parse error: expected `)` but got `{`
      │
    1 │ int main( { return 0; }
      │           ^ expected `)`
    "###);
}

#[test]
fn semantic_error_diagnostic() {
    let output = compile_to_string(
        "int main() {\n    printf(5);\n}",
        Target::FasmX86_64Linux,
    );

    insta::assert_snapshot!(output, @r###"
    main.c:2:5: error: semantic error: expected string argument but got integer
      │
    2 │     printf(5);
      │     ^^^^^^ in this call
    "###);
}

#[test]
fn error_messages() {
    let args = ["tinyc", "-target", "jvm", "main.c"].map(OsString::from);
    let err = CompilerError::from(Cli::try_parse_args(args).unwrap_err());

    let message = err.message().unwrap();
    assert!(message.starts_with("error: "));
    assert!(message.contains("unknown target `jvm`"));

    assert_eq!(
        CompilerError::NoInput.message().as_deref(),
        Some("error: no input is provided\n")
    );
    assert_eq!(CompilerError::HadErrors.message(), None);
    assert_eq!(CompilerError::TargetsListed.message(), None);
}
