//! Type grammar integration tests.
//!
//! Each input is parsed as a standalone type unless a whole file is needed.

use bumpalo::Bump;
use typegram_ast::keyword::KeywordTypeKind;
use typegram_ast::node::*;
use typegram_ast::types::NodeFlags;
use typegram_parser::{Parser, StandaloneType};

fn parse_type<'a>(arena: &'a Bump, source: &str) -> StandaloneType<'a> {
    Parser::new(arena, "type.ts", source)
        .parse_standalone_type()
        .unwrap_or_else(|err| panic!("{source}: {err:?}"))
}

fn type_error_code(source: &str) -> u32 {
    let arena = Bump::new();
    Parser::new(&arena, "type.ts", source)
        .parse_standalone_type()
        .expect_err(source)
        .code()
}

fn codes(parsed: &StandaloneType<'_>) -> Vec<u32> {
    parsed.diagnostics.iter().map(|d| d.code).collect()
}

fn predicate_of<'a>(statement: &Statement<'a>) -> TypePredicateNode<'a> {
    let Statement::FunctionDeclaration(function) = statement else { panic!("expected function") };
    match function.signature.return_type {
        Some(TypeNode::TypePredicate(predicate)) => *predicate,
        other => panic!("expected predicate, got {other:?}"),
    }
}

// ============================================================================
// Unions, intersections and operators
// ============================================================================

#[test]
fn test_union_span_covers_every_member() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "string | number");
    let TypeNode::UnionType(union) = parsed.type_node else { panic!("expected union") };
    assert_eq!(union.types.len(), 2);
    assert_eq!(union.data.range.pos, 0);
    assert_eq!(union.data.range.end, 15);
}

#[test]
fn test_intersection_binds_tighter_than_union() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "A & B | C");
    let TypeNode::UnionType(union) = parsed.type_node else { panic!("expected union") };
    assert!(matches!(union.types[0], TypeNode::IntersectionType(_)));
}

#[test]
fn test_sibling_spans_are_ordered_and_disjoint() {
    let arena = Bump::new();
    let TypeNode::IntersectionType(intersection) = parse_type(&arena, "A & Bb & Ccc").type_node else {
        panic!("expected intersection")
    };
    let ranges: Vec<_> = intersection.types.iter().map(|t| (t.data().range.pos, t.data().range.end)).collect();
    assert_eq!(ranges, vec![(0, 1), (4, 6), (9, 12)]);

    let TypeNode::TupleType(tuple) = parse_type(&arena, "[a, bb, ...ccc[]]").type_node else {
        panic!("expected tuple")
    };
    assert_eq!((tuple.data.range.pos, tuple.data.range.end), (0, 17));
    for pair in tuple.elements.windows(2) {
        assert!(pair[0].data().range.end <= pair[1].data().range.pos);
    }
    for element in tuple.elements {
        assert!(element.data().range.pos >= tuple.data.range.pos);
        assert!(element.data().range.end <= tuple.data.range.end);
    }
}

#[test]
fn test_keyof_typeof() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "keyof typeof config");
    let TypeNode::TypeOperator(operator) = parsed.type_node else { panic!("expected operator") };
    assert_eq!(operator.operator, TypeOperatorKind::KeyOf);
    assert!(matches!(operator.type_node, TypeNode::TypeQuery(_)));
}

#[test]
fn test_readonly_requires_array_or_tuple() {
    let arena = Bump::new();
    assert!(codes(&parse_type(&arena, "readonly string[]")).is_empty());
    let parsed = parse_type(&arena, "readonly string");
    assert_eq!(codes(&parsed), vec![1354]);
    assert!(parsed.type_node.data().flags.contains(NodeFlags::THIS_NODE_HAS_ERROR));
}

#[test]
fn test_keyword_types_and_dotted_names() {
    let arena = Bump::new();
    let TypeNode::KeywordType(keyword) = parse_type(&arena, "unknown").type_node else { panic!() };
    assert_eq!(keyword.keyword, KeywordTypeKind::Unknown);
    assert!(matches!(parse_type(&arena, "string.Name").type_node, TypeNode::TypeReference(_)));
}

// ============================================================================
// Conditional types
// ============================================================================

#[test]
fn test_conditional_types_nest_to_the_right() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "A extends B ? C : D extends E ? F : G");
    let TypeNode::ConditionalType(outer) = parsed.type_node else { panic!("expected conditional") };
    assert!(matches!(outer.check_type, TypeNode::TypeReference(_)));
    assert!(matches!(outer.false_type, TypeNode::ConditionalType(_)));
}

#[test]
fn test_conditional_type_nests_in_true_branch() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "A extends B ? C extends D ? E : F : G");
    assert!(codes(&parsed).is_empty());
    let TypeNode::ConditionalType(outer) = parsed.type_node else { panic!("expected conditional") };
    let TypeNode::ConditionalType(inner) = outer.true_type else { panic!("expected nested conditional") };
    assert!(matches!(inner.false_type, TypeNode::TypeReference(_)));
    let TypeNode::TypeReference(g) = outer.false_type else { panic!("expected reference") };
    let EntityName::Identifier(name) = g.type_name else { panic!() };
    assert_eq!(name.text, "G");
}

#[test]
fn test_infer_with_constraint() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "T extends [infer H extends string, ...infer R] ? H : never");
    let TypeNode::ConditionalType(conditional) = parsed.type_node else { panic!() };
    let TypeNode::TupleType(tuple) = conditional.extends_type else { panic!() };
    let TypeNode::InferType(head) = tuple.elements[0] else { panic!() };
    assert_eq!(head.type_parameter.name.text, "H");
    assert!(head.type_parameter.constraint.is_some());
}

#[test]
fn test_function_type_return_is_not_conditional() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "T extends () => infer R ? R : never");
    let TypeNode::ConditionalType(conditional) = parsed.type_node else { panic!() };
    assert!(matches!(conditional.extends_type, TypeNode::FunctionType(_)));
}

// ============================================================================
// Object, mapped and tuple types
// ============================================================================

#[test]
fn test_mapped_type_versus_index_signature() {
    let arena = Bump::new();
    let TypeNode::MappedType(mapped) = parse_type(&arena, "{ readonly [K in keyof T]-?: T[K] }").type_node else {
        panic!("expected mapped type")
    };
    assert_eq!(mapped.type_parameter.name.text, "K");
    assert!(mapped.readonly_modifier.is_some());
    assert!(mapped.question_modifier.is_some());

    let TypeNode::TypeLiteral(literal) = parse_type(&arena, "{ [key: string]: number }").type_node else {
        panic!("expected type literal")
    };
    assert!(matches!(literal.members[0], TypeElement::IndexSignature(_)));
}

#[test]
fn test_mapped_type_with_as_clause() {
    let arena = Bump::new();
    let TypeNode::MappedType(mapped) = parse_type(&arena, "{ [K in keyof T as `on${K}`]: T[K] }").type_node else {
        panic!()
    };
    assert!(matches!(mapped.name_type, Some(TypeNode::TemplateLiteralType(_))));
}

#[test]
fn test_named_tuple_members() {
    let arena = Bump::new();
    let parsed = parse_type(&arena, "[first: string, second?: number, ...rest: boolean[]]");
    assert!(codes(&parsed).is_empty());
    let TypeNode::TupleType(tuple) = parsed.type_node else { panic!() };
    let TypeNode::NamedTupleMember(second) = tuple.elements[1] else { panic!() };
    assert!(second.question);
    let TypeNode::NamedTupleMember(rest) = tuple.elements[2] else { panic!() };
    assert!(rest.dot_dot_dot);
}

#[test]
fn test_tuple_element_rules() {
    let arena = Bump::new();
    assert_eq!(codes(&parse_type(&arena, "[a: string, number]")), vec![5084]);
    assert_eq!(codes(&parse_type(&arena, "[string?, number]")), vec![1257]);
    assert_eq!(codes(&parse_type(&arena, "[...string[], number?]")), vec![1266]);
    assert!(codes(&parse_type(&arena, "[string, number?, ...boolean[]]")).is_empty());
}

#[test]
fn test_tuple_label_must_be_identifier() {
    assert_eq!(type_error_code("[string[]: number]"), 5085);
}

// ============================================================================
// Function types, templates and predicates
// ============================================================================

#[test]
fn test_function_type_versus_parenthesized_type() {
    let arena = Bump::new();
    assert!(matches!(parse_type(&arena, "(a: string) => void").type_node, TypeNode::FunctionType(_)));
    assert!(matches!(parse_type(&arena, "() => void").type_node, TypeNode::FunctionType(_)));
    assert!(matches!(parse_type(&arena, "(...args: any[]) => void").type_node, TypeNode::FunctionType(_)));
    assert!(matches!(parse_type(&arena, "(string)").type_node, TypeNode::ParenthesizedType(_)));
    let TypeNode::ArrayType(array) = parse_type(&arena, "(string | number)[]").type_node else { panic!() };
    assert!(matches!(array.element_type, TypeNode::ParenthesizedType(_)));
}

#[test]
fn test_abstract_constructor_type() {
    let arena = Bump::new();
    let TypeNode::ConstructorType(ctor) = parse_type(&arena, "abstract new () => object").type_node else {
        panic!()
    };
    assert!(ctor.data.has_modifier(typegram_ast::types::ModifierFlags::ABSTRACT));
}

#[test]
fn test_template_literal_type() {
    let arena = Bump::new();
    let TypeNode::TemplateLiteralType(template) = parse_type(&arena, "`a${B}c${D}e`").type_node else {
        panic!()
    };
    assert_eq!(template.head.raw, "a");
    assert_eq!(template.spans.len(), 2);
}

#[test]
fn test_type_predicates_on_return_types() {
    let arena = Bump::new();
    let source = "function isString(x: unknown): x is string { return true; }\n\
                  function check(x: unknown): asserts x {}";
    let file = Parser::new(&arena, "t.ts", source).parse_source_file().unwrap();
    let Statement::FunctionDeclaration(first) = file.statements[0] else { panic!() };
    let Some(TypeNode::TypePredicate(predicate)) = first.signature.return_type else { panic!() };
    assert!(!predicate.asserts && predicate.type_node.is_some());
    let Statement::FunctionDeclaration(second) = file.statements[1] else { panic!() };
    let Some(TypeNode::TypePredicate(predicate)) = second.signature.return_type else { panic!() };
    assert!(predicate.asserts && predicate.type_node.is_none());
}

#[test]
fn test_asserts_predicates_with_types_and_this() {
    let arena = Bump::new();
    let source = "function isText(x: unknown): asserts x is string {}\n\
                  function isReady(this: Base): asserts this {}\n\
                  function isNode(this: Base): asserts this is Node {}";
    let file = Parser::new(&arena, "t.ts", source).parse_source_file().unwrap();
    assert!(file.diagnostics.is_empty());

    let typed = predicate_of(&file.statements[0]);
    assert!(typed.asserts);
    assert!(matches!(typed.parameter_name, TypePredicateParameterName::Identifier(ref name) if name.text == "x"));
    assert!(matches!(typed.type_node, Some(TypeNode::KeywordType(_))));

    let bare_this = predicate_of(&file.statements[1]);
    assert!(bare_this.asserts);
    assert!(matches!(bare_this.parameter_name, TypePredicateParameterName::This(_)));
    assert!(bare_this.type_node.is_none());

    let typed_this = predicate_of(&file.statements[2]);
    assert!(typed_this.asserts);
    assert!(matches!(typed_this.parameter_name, TypePredicateParameterName::This(_)));
    assert!(matches!(typed_this.type_node, Some(TypeNode::TypeReference(_))));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_type() {
    assert_eq!(type_error_code("string |"), 1110);
    assert_eq!(type_error_code("Map<>"), 1099);
}

#[test]
fn test_nesting_limit() {
    let source = format!("{}x{}", "(".repeat(400), ")".repeat(400));
    assert_eq!(type_error_code(&source), 1400);
}

#[test]
fn test_nesting_limit_for_type_operators() {
    let source = format!("{}T", "keyof ".repeat(1000));
    assert_eq!(type_error_code(&source), 1400);
    let source = format!("{}T[]", "readonly ".repeat(1000));
    assert_eq!(type_error_code(&source), 1400);
}
