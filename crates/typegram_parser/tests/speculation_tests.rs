//! Speculative parsing: arrow functions, type arguments and assertions.
//!
//! A failed attempt must leave no trace: no diagnostics, no bindings and
//! no consumed tokens.

use bumpalo::Bump;
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_parser::Parser;

fn parse<'a>(arena: &'a Bump, source: &str) -> SourceFile<'a> {
    Parser::new(arena, "test.ts", source)
        .parse_source_file()
        .unwrap_or_else(|err| panic!("{source}: {err:?}"))
}

fn expression<'a>(file: &SourceFile<'a>, index: usize) -> Expression<'a> {
    match file.statements[index] {
        Statement::ExpressionStatement(statement) => *statement.expression,
        _ => panic!("statement {index} is not an expression"),
    }
}

#[test]
fn test_parsing_is_repeatable() {
    let source = "const f = <T>(x: T): x is T => true;\na < b;\nf<string>(c);\n(a, b);";
    let first = Bump::new();
    let second = Bump::new();
    let a = parse(&first, source);
    let b = parse(&second, source);
    assert_eq!(a.statements.len(), b.statements.len());
    for (left, right) in a.statements.iter().zip(b.statements) {
        assert_eq!(left.kind(), right.kind());
        assert_eq!(left.range(), right.range());
    }
}

#[test]
fn test_failed_attempts_leave_no_diagnostics() {
    let arena = Bump::new();
    let file = parse(&arena, "a < b;\n(x, y);\nc < d > e;\n(p) ? q : r;");
    assert!(file.diagnostics.is_empty());
    let Expression::Binary(compare) = expression(&file, 0) else { panic!() };
    assert_eq!(compare.operator, SyntaxKind::LessThanToken);
    assert!(matches!(expression(&file, 1), Expression::Parenthesized(_)));
    assert!(matches!(expression(&file, 3), Expression::Conditional(_)));
}

#[test]
fn test_type_arguments_followed_by_call() {
    let arena = Bump::new();
    let file = parse(&arena, "x < y > (z);\nnew Map<string, number>();\ntag<T>`text`;");
    let Expression::Call(call) = expression(&file, 0) else { panic!("expected call") };
    assert_eq!(call.type_arguments.map(|t| t.len()), Some(1));
    let Expression::New(new) = expression(&file, 1) else { panic!("expected new") };
    assert_eq!(new.type_arguments.map(|t| t.len()), Some(2));
    assert!(matches!(expression(&file, 2), Expression::TaggedTemplate(_)));
}

#[test]
fn test_generic_arrow_versus_type_assertion() {
    let arena = Bump::new();
    let file = parse(&arena, "<T>(x: T) => x;\n<T>value;");
    assert!(matches!(expression(&file, 0), Expression::ArrowFunction(_)));
    assert!(matches!(expression(&file, 1), Expression::TypeAssertion(_)));
}

#[test]
fn test_arrow_body_errors_point_into_the_body() {
    let arena = Bump::new();
    let err = Parser::new(&arena, "test.ts", "const f = (x: number) => x +;")
        .parse_source_file()
        .unwrap_err();
    assert_eq!(err.code(), 1109);
    assert_eq!(err.span().map(|span| span.start), Some(28));
}

#[test]
fn test_arrow_needs_arrow_on_same_line() {
    let arena = Bump::new();
    let err = Parser::new(&arena, "test.ts", "const f = (x)\n=> x;").parse_source_file().unwrap_err();
    assert_eq!(err.code(), 1109);
}

#[test]
fn test_rolled_back_parameters_do_not_bind() {
    let arena = Bump::new();
    // The parenthesized attempt sees `(a, b)` as parameters before rolling back.
    let file = parse(&arena, "(a, b);\nlet a = 1;\nlet b = 2;");
    assert_eq!(file.statements.len(), 3);
}

#[test]
fn test_declaration_lookahead_consumes_nothing() {
    let arena = Bump::new();
    let file = parse(&arena, "declare(x);\ntype\nT = 1;");
    assert_eq!(file.statements.len(), 3);
    let Expression::Call(call) = expression(&file, 0) else { panic!() };
    let Expression::Identifier(callee) = call.expression else { panic!() };
    assert_eq!(callee.text, "declare");
}
