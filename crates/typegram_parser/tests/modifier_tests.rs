//! Modifier ordering, exclusivity and placement.

use bumpalo::Bump;
use typegram_ast::node::*;
use typegram_ast::types::ModifierFlags;
use typegram_parser::Parser;

fn error_code(source: &str) -> u32 {
    let arena = Bump::new();
    Parser::new(&arena, "test.ts", source).parse_source_file().expect_err(source).code()
}

fn class_members<'a>(arena: &'a Bump, source: &str) -> &'a [ClassElement<'a>] {
    let file = Parser::new(arena, "test.ts", source)
        .parse_source_file()
        .unwrap_or_else(|err| panic!("{source}: {err:?}"));
    match file.statements[0] {
        Statement::ClassDeclaration(class) => class.members,
        _ => panic!("expected a class"),
    }
}

#[test]
fn test_modifier_order() {
    assert_eq!(error_code("class C { static public x; }"), 1029);
    assert_eq!(error_code("class C { readonly static x; }"), 1029);
    assert_eq!(error_code("class C { override public m() {} }"), 1029);
}

#[test]
fn test_repeated_modifiers() {
    assert_eq!(error_code("class C { public public x; }"), 1030);
    assert_eq!(error_code("class C { public private x; }"), 1028);
}

#[test]
fn test_exclusive_modifiers() {
    assert_eq!(error_code("abstract class C { static abstract m(): void; }"), 1243);
    assert_eq!(error_code("class C extends B { declare override x: number; }"), 1243);
}

#[test]
fn test_modifiers_out_of_place() {
    assert_eq!(error_code("class C { in x; }"), 1031);
    assert_eq!(error_code("interface I { public x: number }"), 1070);
    assert_eq!(error_code("class C { public [k: string]: number }"), 1071);
    assert_eq!(error_code("function f<public T>() {}"), 1273);
    assert_eq!(error_code("class C { constructor(static x) {} }"), 1042);
    assert_eq!(error_code("class C { readonly m() {} }"), 1024);
}

#[test]
fn test_variance_only_on_classes_interfaces_and_aliases() {
    assert_eq!(error_code("function f<in T>() {}"), 1274);
    let arena = Bump::new();
    let source = "class C<in out T> {}\ninterface I<out T> {}\ntype F<in T> = (x: T) => void;";
    assert!(Parser::new(&arena, "test.ts", source).parse_source_file().is_ok());
}

#[test]
fn test_modifier_words_as_member_names() {
    let arena = Bump::new();
    let members = class_members(&arena, "class C { static: number; readonly; public }");
    assert_eq!(members.len(), 3);
    assert!(members.iter().all(|m| matches!(m, ClassElement::PropertyDeclaration(_))));
    assert!(members.iter().all(|m| m.data().modifier_flags.is_empty()));
}

#[test]
fn test_line_break_ends_modifier() {
    let arena = Bump::new();
    let members = class_members(&arena, "class C { static\n x }");
    assert_eq!(members.len(), 2);
}

#[test]
fn test_modifier_flags_recorded() {
    let arena = Bump::new();
    let members = class_members(&arena, "class C { private static readonly x = 1; protected abstract accessor y: number; }");
    let flags = members[0].data().modifier_flags;
    assert!(flags.contains(ModifierFlags::PRIVATE | ModifierFlags::STATIC | ModifierFlags::READONLY));
    let flags = members[1].data().modifier_flags;
    assert!(flags.contains(ModifierFlags::PROTECTED | ModifierFlags::ABSTRACT | ModifierFlags::ACCESSOR));
}

#[test]
fn test_parameter_property_modifiers() {
    let arena = Bump::new();
    let members = class_members(&arena, "class C { constructor(public readonly a: string, private b?: number) {} }");
    let ClassElement::Constructor(constructor) = members[0] else { panic!() };
    let first = constructor.signature.parameters[0].data.modifier_flags;
    assert!(first.contains(ModifierFlags::PUBLIC | ModifierFlags::READONLY));
    assert!(constructor.signature.parameters[1].question);
}
