use tinyc_diagnostic::location::Location;

use super::{ParseError, ParseResult};
use crate::ast::{Func, RetStmt, Stmt};
use crate::lexer::LexErrorKind;
use crate::token::Literal;

fn parse(source: &str) -> ParseResult<Func> {
    crate::parse(source)
}

fn test_parses(source: &str, should_parse: bool) {
    match (parse(source), should_parse) {
        (Err(err), true) => panic!("failed to parse: {source:?}, error: {err}"),
        (Ok(_), false) => panic!("unexpectedly parsed: {source:?}"),
        _ => {}
    }
}

fn expected_error(source: &str) -> (String, Location) {
    match parse(source) {
        Err(ParseError::Expected {
            expected,
            found,
            loc,
            ..
        }) => (format!("expected {expected} but got {found}"), loc),
        other => panic!("expected a token mismatch for {source:?}, got {other:?}"),
    }
}

#[test]
fn multi_digit() {
    test_parses("int main() { return 100; }", true);
}

#[test]
fn newlines() {
    test_parses("\nint\nmain\n(\n)\n{\nreturn\n0\n;\n}", true);
}

#[test]
fn no_newlines() {
    test_parses("int main(){return 0;}", true);
}

#[test]
fn spaces() {
    test_parses("   int   main    (  )  {   return  0 ; }", true);
}

#[test]
fn void_params() {
    test_parses("int main(void) { return 0; }", true);
}

#[test]
fn missing_paren() {
    test_parses("int main( { return 0; }", false);
}

#[test]
fn missing_retval() {
    test_parses("int main() { return; }", false);
}

#[test]
fn no_brace() {
    test_parses("int main() { return 0;", false);
}

#[test]
fn no_semicolon() {
    test_parses("int main() { return 0 }", false);
}

#[test]
fn wrong_case() {
    test_parses("int main() { RETURN 0; }", false);
}

#[test]
fn string_return_value() {
    test_parses("int main() { return \"0\"; }", false);
}

#[test]
fn trailing_tokens() {
    test_parses("int main() { } }", false);
}

#[test]
fn full_program() {
    let func = parse("int main(void) { printf(\"%d\\n\", 5); return 0; }").unwrap();

    insta::assert_debug_snapshot!(func, @r###"
    Func {
        name: Token {
            kind: Name,
            value: String(
                "main",
            ),
            loc: Location {
                row: 0,
                col: 4,
            },
            width: 4,
        },
        body: [
            Funcall(
                FuncallStmt {
                    callee: Token {
                        kind: Name,
                        value: String(
                            "printf",
                        ),
                        loc: Location {
                            row: 0,
                            col: 17,
                        },
                        width: 6,
                    },
                    args: [
                        String(
                            "%d\n",
                        ),
                        Integer(
                            5,
                        ),
                    ],
                },
            ),
            Ret(
                RetStmt {
                    value: 0,
                    loc: Location {
                        row: 0,
                        col: 36,
                    },
                },
            ),
        ],
    }
    "###);
}

#[test]
fn empty_body() {
    let func = parse("int main() { }").unwrap();

    assert_eq!(func.name(), "main");
    assert!(func.body.is_empty());
}

#[test]
fn statement_count_matches_semicolons() {
    let source = "int main() { printf(\"a\"); foo(); return 1; printf(\"b\", 2, \"c\"); return 0; }";
    let func = parse(source).unwrap();

    assert_eq!(func.body.len(), source.matches(';').count());
}

#[test]
fn return_anywhere() {
    let func = parse("int main() { return 1; return 2; printf(\"late\"); }").unwrap();

    let kinds: Vec<_> = func
        .body
        .iter()
        .map(|stmt| matches!(stmt, Stmt::Ret(_)))
        .collect();
    assert_eq!(kinds, [true, true, false]);
}

#[test]
fn return_values_in_order() {
    let func = parse("int main() {\n  return 1;\n  return 2;\n}").unwrap();

    let returns: Vec<RetStmt> = func
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Ret(ret) => Some(*ret),
            Stmt::Funcall(_) => None,
        })
        .collect();

    assert_eq!(
        returns,
        [
            RetStmt {
                value: 1,
                loc: Location::new(1, 2)
            },
            RetStmt {
                value: 2,
                loc: Location::new(2, 2)
            },
        ]
    );
}

#[test]
fn return_is_matched_by_text() {
    let func = parse("int main() { returnX(); }").unwrap();

    match &func.body[..] {
        [Stmt::Funcall(call)] => {
            assert_eq!(call.name(), "returnX");
            assert!(call.args.is_empty());
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn arguments_in_order() {
    let func = parse("int main() { printf(\"%s %d\", \"x\", 42); }").unwrap();

    let Stmt::Funcall(call) = &func.body[0] else {
        panic!("expected a call");
    };
    assert_eq!(
        call.args,
        [
            Literal::String("%s %d".to_owned()),
            Literal::String("x".to_owned()),
            Literal::Integer(42),
        ]
    );
}

#[test]
fn trailing_comma() {
    let (message, loc) = expected_error("int main() { printf(\"a\",); }");

    assert_eq!(message, "expected string or number but got `)`");
    assert_eq!(loc, Location::new(0, 24));
}

#[test]
fn leading_comma() {
    let (message, _) = expected_error("int main() { printf(, \"a\"); }");

    assert_eq!(message, "expected string or number but got `,`");
}

#[test]
fn missing_close_paren_after_main() {
    let (message, loc) = expected_error("int main( { return 0; }");

    assert_eq!(message, "expected `)` but got `{`");
    assert_eq!(loc, Location::new(0, 10));
}

#[test]
fn unexpected_end_of_input() {
    let (message, loc) = expected_error("int main() {\n  return 0;\n");

    assert_eq!(message, "expected name or `}` but got end of input");
    assert_eq!(loc, Location::new(2, 0));
}

#[test]
fn unsupported_type() {
    let err = parse("void main() { }").unwrap_err();

    assert_eq!(
        err,
        ParseError::UnsupportedType {
            ty: "void".to_owned(),
            loc: Location::new(0, 0),
            width: 4,
        }
    );
    assert_eq!(err.to_string(), "unsupported type `void`");
}

#[test]
fn lexer_errors_abort_parsing() {
    let err = parse("int main() { printf(\"\\q\"); }").unwrap_err();

    let ParseError::Lexer(err) = err else {
        panic!("expected a lexer error, got {err:?}");
    };
    assert_eq!(err.kind, LexErrorKind::UnknownEscape('q'));
}
