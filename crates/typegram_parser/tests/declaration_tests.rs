//! Declaration disambiguation and ambient context.

use bumpalo::Bump;
use typegram_ast::keyword::KeywordTypeKind;
use typegram_ast::node::*;
use typegram_ast::types::{ModifierFlags, NodeFlags};
use typegram_parser::{Parser, ParserOptions};

fn parse<'a>(arena: &'a Bump, source: &str) -> SourceFile<'a> {
    Parser::new(arena, "test.ts", source)
        .parse_source_file()
        .unwrap_or_else(|err| panic!("{source}: {err:?}"))
}

fn error_code(source: &str) -> u32 {
    let arena = Bump::new();
    Parser::new(&arena, "test.ts", source).parse_source_file().expect_err(source).code()
}

fn kinds(file: &SourceFile<'_>) -> Vec<&'static str> {
    file.statements
        .iter()
        .map(|statement| match statement {
            Statement::VariableStatement(_) => "variable",
            Statement::FunctionDeclaration(_) => "function",
            Statement::ClassDeclaration(_) => "class",
            Statement::InterfaceDeclaration(_) => "interface",
            Statement::TypeAliasDeclaration(_) => "type",
            Statement::EnumDeclaration(_) => "enum",
            Statement::ModuleDeclaration(_) => "module",
            Statement::ExpressionStatement(_) => "expression",
            Statement::ImportDeclaration(_) | Statement::ImportEqualsDeclaration(_) => "import",
            Statement::ExportDeclaration(_) | Statement::ExportAssignment(_) => "export",
            _ => "other",
        })
        .collect()
}

// ============================================================================
// Contextual words as identifiers
// ============================================================================

#[test]
fn test_contextual_words_fall_back_to_expressions() {
    let arena = Bump::new();
    let file = parse(&arena, "interface();\ntype = 1;\nnamespace.x;\nmodule\nFoo;\ndeclare;\nabstract\nclass C {}");
    assert_eq!(
        kinds(&file),
        vec!["expression", "expression", "expression", "expression", "expression", "expression", "expression", "class"]
    );
}

#[test]
fn test_declarations_are_recognized() {
    let arena = Bump::new();
    let file = parse(
        &arena,
        "interface Foo {}\ntype T = string;\nenum E { A }\nconst enum F { B }\nnamespace N {}\nmodule \"m\" {}\nabstract class A {}",
    );
    assert_eq!(kinds(&file), vec!["interface", "type", "enum", "enum", "module", "module", "class"]);
    let Statement::EnumDeclaration(const_enum) = file.statements[3] else { panic!() };
    assert!(const_enum.data.has_modifier(ModifierFlags::CONST));
}

#[test]
fn test_type_alias_needs_identifier_on_same_line() {
    let arena = Bump::new();
    let file = parse(&arena, "type\nFoo = 1;");
    assert_eq!(kinds(&file), vec!["expression", "expression"]);
}

#[test]
fn test_intrinsic_type_alias() {
    let arena = Bump::new();
    let file = parse(&arena, "type Upper<S extends string> = intrinsic;\ntype Ref = intrinsic.Name;");
    let Statement::TypeAliasDeclaration(upper) = file.statements[0] else { panic!("expected type alias") };
    assert!(matches!(upper.type_node, TypeNode::KeywordType(k) if k.keyword == KeywordTypeKind::Intrinsic));
    let Statement::TypeAliasDeclaration(reference) = file.statements[1] else { panic!("expected type alias") };
    assert!(matches!(reference.type_node, TypeNode::TypeReference(_)));

    // Anything but `.` after the word keeps the keyword, so `|` is left for the `;` check.
    assert_eq!(error_code("type A = intrinsic | B;"), 1005);
    assert_eq!(error_code("type A = intrinsic<T>;"), 1005);
}

// ============================================================================
// Ambient context
// ============================================================================

#[test]
fn test_declare_propagates_ambient_context() {
    let arena = Bump::new();
    let file = parse(&arena, "declare namespace N { function f(): void; const x: number; }");
    let Statement::ModuleDeclaration(module) = file.statements[0] else { panic!() };
    assert!(module.data.has_modifier(ModifierFlags::AMBIENT));
    let Some(ModuleBody::Block(block)) = module.body else { panic!() };
    for statement in block.statements {
        assert!(statement.data().flags.contains(NodeFlags::AMBIENT), "{:?}", statement.kind());
    }
}

#[test]
fn test_ambient_context_ends_with_the_declaration() {
    let arena = Bump::new();
    let file = parse(&arena, "declare const a: number;\nconst b = 1;");
    assert!(file.statements[0].data().is_ambient());
    assert!(!file.statements[1].data().is_ambient());
}

#[test]
fn test_declaration_files_start_ambient() {
    let arena = Bump::new();
    let options = ParserOptions::for_file("lib.d.ts");
    let file = Parser::with_options(&arena, "lib.d.ts", "function f(): void;\nlet x: number;", options)
        .parse_source_file()
        .unwrap();
    assert!(file.data.flags.contains(NodeFlags::AMBIENT));
    assert!(file.statements.iter().all(|s| s.data().is_ambient()));
}

#[test]
fn test_implementation_in_ambient_context_is_recoverable() {
    let arena = Bump::new();
    let file = parse(&arena, "declare function f() {}");
    let codes: Vec<u32> = file.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![1183]);
}

// ============================================================================
// Modules and namespaces
// ============================================================================

#[test]
fn test_dotted_namespace_nests() {
    let arena = Bump::new();
    let file = parse(&arena, "namespace A.B.C { export const x = 1; }");
    let Statement::ModuleDeclaration(outer) = file.statements[0] else { panic!() };
    assert!(outer.data.flags.contains(NodeFlags::NAMESPACE));
    let Some(ModuleBody::Namespace(inner)) = outer.body else { panic!("expected nested namespace") };
    assert!(inner.data.flags.contains(NodeFlags::NESTED_NAMESPACE));
    assert!(matches!(inner.body, Some(ModuleBody::Namespace(_))));
}

#[test]
fn test_global_augmentation() {
    let arena = Bump::new();
    let file = parse(&arena, "declare global { interface Window { x: number } }");
    let Statement::ModuleDeclaration(global) = file.statements[0] else { panic!() };
    assert!(global.data.flags.contains(NodeFlags::GLOBAL_AUGMENTATION));
}

#[test]
fn test_ambient_module_without_body() {
    let arena = Bump::new();
    let file = parse(&arena, "declare module \"shim\";");
    let Statement::ModuleDeclaration(module) = file.statements[0] else { panic!() };
    assert!(matches!(module.name, ModuleName::StringLiteral(_)));
    assert!(module.body.is_none());
}

// ============================================================================
// Interfaces, enums and classes
// ============================================================================

#[test]
fn test_interface_members() {
    let arena = Bump::new();
    let file = parse(
        &arena,
        "interface I<T> extends A, B<T> { (x: T): void; new (): I<T>; readonly [k: string]: T; m?(): T; get p(): T; q: T }",
    );
    let Statement::InterfaceDeclaration(interface) = file.statements[0] else { panic!() };
    assert_eq!(interface.heritage_clauses.len(), 1);
    assert_eq!(interface.members.len(), 6);
    assert!(matches!(interface.members[0], TypeElement::CallSignature(_)));
    assert!(matches!(interface.members[1], TypeElement::ConstructSignature(_)));
    assert!(matches!(interface.members[2], TypeElement::IndexSignature(_)));
    assert!(matches!(interface.members[4], TypeElement::GetAccessorSignature(_)));
}

#[test]
fn test_interface_cannot_implement() {
    assert_eq!(error_code("interface I implements J {}"), 1005);
}

#[test]
fn test_heritage_lists() {
    let arena = Bump::new();
    let file = parse(&arena, "class C extends Base<T> implements A, B {}\ninterface I extends A, B.C<D> {}");
    let Statement::ClassDeclaration(class) = &file.statements[0] else { panic!("expected class") };
    assert_eq!(class.heritage_clauses.len(), 2);
    assert_eq!(class.heritage_clauses[1].types.len(), 2);
    assert_eq!(error_code("class C extends A, {}"), 1009);
    assert_eq!(error_code("interface I extends A, {}"), 1009);
    assert_eq!(error_code("interface I extends {}"), 1097);
}

#[test]
fn test_const_enum_is_not_a_variable_name() {
    assert_eq!(error_code("const enum = 1;"), 1389);
}

#[test]
fn test_class_members() {
    let arena = Bump::new();
    let file = parse(
        &arena,
        "class C<T> extends Base<T> implements I {\n\
           static { init(); }\n\
           #secret = 1;\n\
           declare readonly id: string;\n\
           constructor(private readonly name: string) { super(); }\n\
           get value(): T { return this.#secret; }\n\
           set value(v: T) {}\n\
           [Symbol.iterator]() {}\n\
           ;\n\
         }",
    );
    let Statement::ClassDeclaration(class) = file.statements[0] else { panic!() };
    assert_eq!(class.heritage_clauses.len(), 2);
    assert!(matches!(class.members[0], ClassElement::StaticBlock(_)));
    assert!(matches!(class.members[3], ClassElement::Constructor(_)));
    assert!(matches!(class.members[7], ClassElement::Semicolon(_)));
}

#[test]
fn test_abstract_method_with_body_is_recoverable() {
    let arena = Bump::new();
    let file = parse(&arena, "abstract class A { abstract m() {} }");
    assert_eq!(file.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(), vec![1245]);
}

#[test]
fn test_constructor_rules() {
    assert_eq!(error_code("class C { constructor<T>() {} }"), 1092);
    assert_eq!(error_code("class C { get x<T>() { return 1; } }"), 1094);
    assert_eq!(error_code("class C { [k: string] }"), 1021);
}

#[test]
fn test_parameter_property_needs_constructor_body() {
    let arena = Bump::new();
    let file = parse(&arena, "function f(public x: number) {}");
    assert_eq!(file.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(), vec![2369]);
}

// ============================================================================
// Bindings
// ============================================================================

#[test]
fn test_duplicate_declarations() {
    assert_eq!(error_code("let a = 1; let a = 2;"), 2300);
    assert_eq!(error_code("class C {} class C {}"), 2300);
    assert_eq!(error_code("import { a } from \"m\"; const a = 1;"), 2300);
}

#[test]
fn test_declarations_that_merge() {
    let arena = Bump::new();
    let file = parse(&arena, "interface A {} interface A {}\nfunction f(): void;\nfunction f() {}\nvar v; var v;");
    assert!(file.diagnostics.is_empty());
}

#[test]
fn test_block_scopes_shadow() {
    let arena = Bump::new();
    parse(&arena, "let a = 1; { let a = 2; }");
}

#[test]
fn test_duplicate_private_names_are_recoverable() {
    let arena = Bump::new();
    let file = parse(&arena, "class C { #a = 1; #a = 2; get #b() { return 1; } set #b(v) {} }");
    assert_eq!(file.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(), vec![2300]);
}

// ============================================================================
// Imports and exports
// ============================================================================

#[test]
fn test_import_forms() {
    let arena = Bump::new();
    let file = parse(
        &arena,
        "import \"side\";\nimport d, { a, b as c, type T } from \"m\";\nimport * as ns from \"n\";\n\
         import type { U } from \"t\";\nimport x = require(\"r\");\nimport y = ns.inner;",
    );
    assert_eq!(kinds(&file), vec!["import"; 6]);
    let Statement::ImportDeclaration(named) = file.statements[1] else { panic!() };
    let clause = named.import_clause.unwrap();
    let Some(NamedImportBindings::NamedImports(imports)) = clause.named_bindings else { panic!() };
    assert_eq!(imports.elements.len(), 3);
    assert!(imports.elements[2].is_type_only);
    let Statement::ImportDeclaration(type_only) = file.statements[3] else { panic!() };
    assert!(type_only.import_clause.unwrap().is_type_only);
}

#[test]
fn test_export_forms() {
    let arena = Bump::new();
    let file = parse(
        &arena,
        "export const a = 1;\nexport interface I {}\nexport declare function f(): void;\n\
         export { a as b };\nexport * from \"m\";\nexport * as ns from \"n\";\nexport type { I as J };\n\
         export default interface K {}",
    );
    assert!(file.statements[0].data().has_modifier(ModifierFlags::EXPORT));
    assert!(file.statements[1].data().has_modifier(ModifierFlags::EXPORT));
    assert!(file.statements[2].data().has_modifier(ModifierFlags::EXPORT | ModifierFlags::AMBIENT));
    let Statement::ExportDeclaration(star) = file.statements[4] else { panic!() };
    assert!(star.export_clause.is_none() && star.module_specifier.is_some());
    let Statement::InterfaceDeclaration(default) = file.statements[7] else { panic!() };
    assert!(default.data.modifier_flags.contains(ModifierFlags::EXPORT_DEFAULT));
}

#[test]
fn test_export_assignment_and_namespace_export() {
    let arena = Bump::new();
    let options = ParserOptions::for_file("lib.d.ts");
    let file = Parser::with_options(&arena, "lib.d.ts", "export = Lib;\nexport as namespace Lib;", options)
        .parse_source_file()
        .unwrap();
    let Statement::ExportAssignment(assignment) = file.statements[0] else { panic!() };
    assert!(assignment.is_export_equals);
    assert!(matches!(file.statements[1], Statement::NamespaceExportDeclaration(_)));
}

#[test]
fn test_export_requires_declaration() {
    assert_eq!(error_code("export 1;"), 1128);
}

// ============================================================================
// Nesting limits
// ============================================================================

#[test]
fn test_nested_binding_patterns_hit_the_depth_limit() {
    let source = format!("let {}x{} = y;", "[".repeat(1000), "]".repeat(1000));
    assert_eq!(error_code(&source), 1400);
    let source = format!("let {}x{} = y;", "{ a: ".repeat(1000), " }".repeat(1000));
    assert_eq!(error_code(&source), 1400);
}

#[test]
fn test_nested_binding_in_function_type_parameter() {
    let source = format!("type F = ({}x{}) => void;", "[".repeat(1000), "]".repeat(1000));
    assert_eq!(error_code(&source), 1400);
}
