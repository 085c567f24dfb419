//! Syntax tree node definitions.
//!
//! Nodes are plain `Copy` values allocated in a `bumpalo` arena and refer to
//! their children through `&'a` references and `&'a [T]` slices. Each node
//! family (types, type members, statements, class members, expressions) is a
//! closed enum so grammar dispatch can match exhaustively.

use crate::keyword::KeywordTypeKind;
use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use typegram_core::text::{LineMap, TextPos, TextRange};
use typegram_diagnostics::Diagnostic;

// ============================================================================
// Core Node Data
// ============================================================================

/// Data shared by all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub flags: NodeFlags,
    pub modifier_flags: ModifierFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
        }
    }

    #[inline]
    pub fn pos(&self) -> TextPos {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.range.end
    }

    /// Move the start of a node that was built before its leading tokens
    /// were known, e.g. a type annotation rewrapped as a predicate.
    #[inline]
    pub fn reset_start(&mut self, pos: TextPos) {
        self.range.pos = pos;
    }

    /// Move the end of a node whose production is extended after the fact.
    #[inline]
    pub fn reset_end(&mut self, end: TextPos) {
        self.range.end = end;
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifier_flags |= modifiers;
        self
    }

    #[inline]
    pub fn has_modifier(&self, modifier: ModifierFlags) -> bool {
        self.modifier_flags.intersects(modifier)
    }

    /// Whether the node is ambient, either by an explicit `declare` or by
    /// sitting inside an ambient region.
    #[inline]
    pub fn is_ambient(&self) -> bool {
        self.flags.contains(NodeFlags::AMBIENT) || self.modifier_flags.contains(ModifierFlags::AMBIENT)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

macro_rules! impl_node_data {
    ($name:ident { $($variant:ident $(($bind:ident))?),* $(,)? }) => {
        impl<'a> $name<'a> {
            pub fn data(&self) -> &NodeData {
                match self {
                    $($name::$variant(n) => impl_node_data!(@data n $($bind)?),)*
                }
            }

            #[inline]
            pub fn kind(&self) -> SyntaxKind {
                self.data().kind
            }

            #[inline]
            pub fn range(&self) -> TextRange {
                self.data().range
            }
        }
    };
    (@data $n:ident raw) => { $n };
    (@data $n:ident) => { &$n.data };
}

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    SingleLine,
    MultiLine,
}

/// A comment collected by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Text between the delimiters.
    pub text: String,
    pub range: TextRange,
}

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub file_name: String,
    pub statements: NodeList<'a, Statement<'a>>,
    pub comments: Vec<Comment>,
    /// Recoverable diagnostics; the tree is well-formed regardless.
    pub diagnostics: Vec<Diagnostic>,
    pub line_map: LineMap,
}

impl<'a> SourceFile<'a> {
    pub fn is_declaration_file(&self) -> bool {
        self.file_name.ends_with(".d.ts")
    }
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub enum EntityName<'a> {
    Identifier(Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

impl<'a> EntityName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::QualifiedName(n) => &n.data,
        }
    }

    /// The dotted name, e.g. `A.B.C`.
    pub fn to_text(&self) -> String {
        match self {
            EntityName::Identifier(id) => id.text.to_string(),
            EntityName::QualifiedName(q) => format!("{}.{}", q.left.to_text(), q.right.text),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral<'a>),
    Computed(ComputedPropertyName<'a>),
}

impl_node_data!(PropertyName { Identifier, PrivateIdentifier, StringLiteral, NumericLiteral, Computed });

impl<'a> PropertyName<'a> {
    /// Static text of the name; `None` for computed names.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => Some(id.text),
            PropertyName::StringLiteral(s) => Some(s.value),
            PropertyName::NumericLiteral(n) => Some(n.text),
            PropertyName::Computed(_) => None,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, PropertyName::PrivateIdentifier(_))
    }
}

// ============================================================================
// Binding Patterns
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum BindingName<'a> {
    Identifier(Identifier<'a>),
    ObjectPattern(&'a ObjectBindingPattern<'a>),
    ArrayPattern(&'a ArrayBindingPattern<'a>),
}

impl_node_data!(BindingName { Identifier, ObjectPattern, ArrayPattern });

#[derive(Debug, Clone, Copy)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrayBindingElement<'a> {
    Binding(BindingElement<'a>),
    Omitted(NodeData),
}

#[derive(Debug, Clone, Copy)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot: bool,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Signatures
// ============================================================================

/// `in`/`out`/`const` variance and constness live in `data.modifier_flags`.
#[derive(Debug, Clone, Copy)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub constraint: OptionalNode<'a, TypeNode<'a>>,
    pub default: OptionalNode<'a, TypeNode<'a>>,
}

/// Parameter-property modifiers (`public x`, `readonly y`) live in
/// `data.modifier_flags`.
#[derive(Debug, Clone, Copy)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot: bool,
    pub name: BindingName<'a>,
    pub question: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// Type parameters, parameters and return type shared by every
/// function-like node.
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a> {
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    KeywordType(KeywordTypeNode),
    TypeReference(TypeReferenceNode<'a>),
    FunctionType(FunctionTypeNode<'a>),
    ConstructorType(FunctionTypeNode<'a>),
    TypeQuery(TypeQueryNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    ArrayType(ArrayTypeNode<'a>),
    TupleType(TupleTypeNode<'a>),
    OptionalType(WrappedTypeNode<'a>),
    RestType(WrappedTypeNode<'a>),
    UnionType(UnionOrIntersectionTypeNode<'a>),
    IntersectionType(UnionOrIntersectionTypeNode<'a>),
    ConditionalType(ConditionalTypeNode<'a>),
    InferType(InferTypeNode<'a>),
    ParenthesizedType(WrappedTypeNode<'a>),
    ThisType(ThisTypeNode),
    TypeOperator(TypeOperatorNode<'a>),
    IndexedAccessType(IndexedAccessTypeNode<'a>),
    MappedType(MappedTypeNode<'a>),
    LiteralType(LiteralTypeNode<'a>),
    NamedTupleMember(NamedTupleMemberNode<'a>),
    TemplateLiteralType(TemplateLiteralTypeNode<'a>),
    ImportType(ImportTypeNode<'a>),
    TypePredicate(TypePredicateNode<'a>),
}

impl_node_data!(TypeNode {
    KeywordType, TypeReference, FunctionType, ConstructorType, TypeQuery, TypeLiteral,
    ArrayType, TupleType, OptionalType, RestType, UnionType, IntersectionType,
    ConditionalType, InferType, ParenthesizedType, ThisType, TypeOperator,
    IndexedAccessType, MappedType, LiteralType, NamedTupleMember, TemplateLiteralType,
    ImportType, TypePredicate,
});

impl<'a> TypeNode<'a> {
    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            TypeNode::KeywordType(n) => &mut n.data,
            TypeNode::TypeReference(n) => &mut n.data,
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => &mut n.data,
            TypeNode::TypeQuery(n) => &mut n.data,
            TypeNode::TypeLiteral(n) => &mut n.data,
            TypeNode::ArrayType(n) => &mut n.data,
            TypeNode::TupleType(n) => &mut n.data,
            TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => &mut n.data,
            TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => &mut n.data,
            TypeNode::ConditionalType(n) => &mut n.data,
            TypeNode::InferType(n) => &mut n.data,
            TypeNode::ThisType(n) => &mut n.data,
            TypeNode::TypeOperator(n) => &mut n.data,
            TypeNode::IndexedAccessType(n) => &mut n.data,
            TypeNode::MappedType(n) => &mut n.data,
            TypeNode::LiteralType(n) => &mut n.data,
            TypeNode::NamedTupleMember(n) => &mut n.data,
            TypeNode::TemplateLiteralType(n) => &mut n.data,
            TypeNode::ImportType(n) => &mut n.data,
            TypeNode::TypePredicate(n) => &mut n.data,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parens(&self) -> &TypeNode<'a> {
        let mut node = self;
        while let TypeNode::ParenthesizedType(inner) = node {
            node = inner.type_node;
        }
        node
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordTypeNode {
    pub data: NodeData,
    pub keyword: KeywordTypeKind,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

/// Function and constructor types. An `abstract new (...) => T` carries
/// `ModifierFlags::ABSTRACT`.
#[derive(Debug, Clone, Copy)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub signature: Signature<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

/// A single wrapped type: `T?` in a tuple, `...T`, or `(T)`.
#[derive(Debug, Clone, Copy)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalTypeNode<'a> {
    pub data: NodeData,
    pub check_type: &'a TypeNode<'a>,
    pub extends_type: &'a TypeNode<'a>,
    pub true_type: &'a TypeNode<'a>,
    pub false_type: &'a TypeNode<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct InferTypeNode<'a> {
    pub data: NodeData,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ThisTypeNode {
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOperatorKind {
    KeyOf,
    Unique,
    Readonly,
}

impl TypeOperatorKind {
    pub fn text(self) -> &'static str {
        match self {
            TypeOperatorKind::KeyOf => "keyof",
            TypeOperatorKind::Unique => "unique",
            TypeOperatorKind::Readonly => "readonly",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    pub operator: TypeOperatorKind,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

/// The `readonly` or `?` marker of a mapped type, optionally signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedModifier {
    Present,
    Plus,
    Minus,
}

/// `{ readonly [K in T as N]?: U }`. The type parameter holds `K` with `T`
/// as its constraint.
#[derive(Debug, Clone, Copy)]
pub struct MappedTypeNode<'a> {
    pub data: NodeData,
    pub readonly_modifier: Option<MappedModifier>,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
    pub name_type: OptionalNode<'a, TypeNode<'a>>,
    pub question_modifier: Option<MappedModifier>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

/// A literal type: string, number, bigint, boolean, `null`, negative number,
/// or a template literal without substitutions.
#[derive(Debug, Clone, Copy)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct NamedTupleMemberNode<'a> {
    pub data: NodeData,
    pub dot_dot_dot: bool,
    pub name: Identifier<'a>,
    pub question: bool,
    pub type_node: &'a TypeNode<'a>,
}

/// A raw template chunk: head, middle, tail, or a whole template without
/// substitutions.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePart<'a> {
    pub data: NodeData,
    pub raw: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateLiteralTypeNode<'a> {
    pub data: NodeData,
    pub head: TemplatePart<'a>,
    pub spans: NodeList<'a, TemplateLiteralTypeSpan<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateLiteralTypeSpan<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub literal: TemplatePart<'a>,
}

/// `import("mod").A.B<T>`, or with `is_type_of`, `typeof import("mod")`.
#[derive(Debug, Clone, Copy)]
pub struct ImportTypeNode<'a> {
    pub data: NodeData,
    pub is_type_of: bool,
    pub argument: StringLiteral<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TypePredicateNode<'a> {
    pub data: NodeData,
    pub asserts: bool,
    pub parameter_name: TypePredicateParameterName<'a>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum TypePredicateParameterName<'a> {
    Identifier(Identifier<'a>),
    This(ThisTypeNode),
}

impl<'a> TypePredicateParameterName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypePredicateParameterName::Identifier(n) => &n.data,
            TypePredicateParameterName::This(n) => &n.data,
        }
    }
}

// ============================================================================
// Type Elements (interface and type-literal members)
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignatureNode<'a>),
    MethodSignature(MethodSignatureNode<'a>),
    CallSignature(CallSignatureNode<'a>),
    ConstructSignature(CallSignatureNode<'a>),
    IndexSignature(IndexSignatureNode<'a>),
    GetAccessorSignature(MethodSignatureNode<'a>),
    SetAccessorSignature(MethodSignatureNode<'a>),
}

impl_node_data!(TypeElement {
    PropertySignature, MethodSignature, CallSignature, ConstructSignature,
    IndexSignature, GetAccessorSignature, SetAccessorSignature,
});

#[derive(Debug, Clone, Copy)]
pub struct PropertySignatureNode<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct MethodSignatureNode<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question: bool,
    pub signature: Signature<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct CallSignatureNode<'a> {
    pub data: NodeData,
    pub signature: Signature<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexSignatureNode<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral<'a>),
    BigIntLiteral(NumericLiteral<'a>),
    RegularExpressionLiteral(TemplatePart<'a>),
    NoSubstitutionTemplateLiteral(TemplatePart<'a>),
    TemplateExpression(TemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    New(CallExpression<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    TypeAssertion(TypeAssertionExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    FunctionExpression(&'a FunctionDeclaration<'a>),
    ArrowFunction(ArrowFunction<'a>),
    PrefixUnary(UnaryExpression<'a>),
    PostfixUnary(UnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Spread(ParenthesizedExpression<'a>),
    ClassExpression(&'a ClassDeclaration<'a>),
    Omitted(NodeData),
    As(TypeAssertionExpression<'a>),
    Satisfies(TypeAssertionExpression<'a>),
    NonNull(ParenthesizedExpression<'a>),
    This(NodeData),
    Super(NodeData),
    Null(NodeData),
    True(NodeData),
    False(NodeData),
}

impl_node_data!(Expression {
    Identifier, PrivateIdentifier, StringLiteral, NumericLiteral, BigIntLiteral,
    RegularExpressionLiteral, NoSubstitutionTemplateLiteral, TemplateExpression,
    ArrayLiteral, ObjectLiteral, PropertyAccess, ElementAccess, Call, New,
    TaggedTemplate, TypeAssertion, Parenthesized, FunctionExpression, ArrowFunction,
    PrefixUnary, PostfixUnary, Binary, Conditional, Spread, ClassExpression,
    Omitted(raw), As, Satisfies, NonNull, This(raw), Super(raw), Null(raw), True(raw), False(raw),
});

impl<'a> Expression<'a> {
    /// Whether this expression is a chain of identifiers joined by `.`,
    /// which is what heritage clauses and `export =` accept.
    pub fn is_entity_name_expression(&self) -> bool {
        match self {
            Expression::Identifier(_) => true,
            Expression::PropertyAccess(access) => {
                !access.question_dot && access.expression.is_entity_name_expression()
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// The literal's value with escapes resolved.
    pub value: &'a str,
    pub single_quote: bool,
}

/// Numeric and bigint literals, kept as written.
#[derive(Debug, Clone, Copy)]
pub struct NumericLiteral<'a> {
    pub data: NodeData,
    pub text: &'a str,
    pub numeric_flags: TokenFlags,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: TemplatePart<'a>,
    pub spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: TemplatePart<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    SpreadAssignment(ParenthesizedExpression<'a>),
    Method(MethodDeclaration<'a>),
    GetAccessor(MethodDeclaration<'a>),
    SetAccessor(MethodDeclaration<'a>),
}

impl_node_data!(ObjectLiteralElement {
    PropertyAssignment, ShorthandPropertyAssignment, SpreadAssignment, Method, GetAccessor, SetAccessor,
});

#[derive(Debug, Clone, Copy)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    /// An identifier, a reserved word used as a name, or a `#private` name.
    pub name: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    pub argument_expression: &'a Expression<'a>,
}

/// Calls and `new` expressions. A `new` without parentheses has no arguments.
#[derive(Debug, Clone, Copy)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub template: &'a Expression<'a>,
}

/// `<T>expr`, `expr as T`, and `expr satisfies T`. `as const` is an `as`
/// whose type is a reference to `const`.
#[derive(Debug, Clone, Copy)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

/// A single-operand wrapper: `(e)`, `...e`, or `e!`.
#[derive(Debug, Clone, Copy)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub signature: Signature<'a>,
    pub body: ArrowFunctionBody<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ArrowFunctionBody<'a> {
    Block(&'a Block<'a>),
    Expression(&'a Expression<'a>),
}

/// Prefix and postfix unary operators, including `typeof`, `void` and
/// `delete`.
#[derive(Debug, Clone, Copy)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    VariableStatement(VariableStatement<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    ClassDeclaration(ClassDeclaration<'a>),
    InterfaceDeclaration(InterfaceDeclaration<'a>),
    TypeAliasDeclaration(TypeAliasDeclaration<'a>),
    EnumDeclaration(EnumDeclaration<'a>),
    ModuleDeclaration(ModuleDeclaration<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ImportEqualsDeclaration(ImportEqualsDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExportAssignment(ExportAssignment<'a>),
    NamespaceExportDeclaration(NamespaceExportDeclaration<'a>),
    Block(Block<'a>),
    EmptyStatement(NodeData),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    ReturnStatement(ReturnStatement<'a>),
    ThrowStatement(ExpressionStatement<'a>),
}

impl_node_data!(Statement {
    VariableStatement, FunctionDeclaration, ClassDeclaration, InterfaceDeclaration,
    TypeAliasDeclaration, EnumDeclaration, ModuleDeclaration, ImportDeclaration,
    ImportEqualsDeclaration, ExportDeclaration, ExportAssignment, NamespaceExportDeclaration,
    Block, EmptyStatement(raw), ExpressionStatement, IfStatement, ReturnStatement, ThrowStatement,
});

impl<'a> Statement<'a> {
    pub fn data_mut(&mut self) -> &mut NodeData {
        match self {
            Statement::VariableStatement(n) => &mut n.data,
            Statement::FunctionDeclaration(n) => &mut n.data,
            Statement::ClassDeclaration(n) => &mut n.data,
            Statement::InterfaceDeclaration(n) => &mut n.data,
            Statement::TypeAliasDeclaration(n) => &mut n.data,
            Statement::EnumDeclaration(n) => &mut n.data,
            Statement::ModuleDeclaration(n) => &mut n.data,
            Statement::ImportDeclaration(n) => &mut n.data,
            Statement::ImportEqualsDeclaration(n) => &mut n.data,
            Statement::ExportDeclaration(n) => &mut n.data,
            Statement::ExportAssignment(n) => &mut n.data,
            Statement::NamespaceExportDeclaration(n) => &mut n.data,
            Statement::Block(n) => &mut n.data,
            Statement::EmptyStatement(d) => d,
            Statement::ExpressionStatement(n) | Statement::ThrowStatement(n) => &mut n.data,
            Statement::IfStatement(n) => &mut n.data,
            Statement::ReturnStatement(n) => &mut n.data,
        }
    }

    #[inline]
    pub fn is_ambient(&self) -> bool {
        self.data().is_ambient()
    }

    /// The declared name of a named declaration.
    pub fn declaration_name(&self) -> Option<&'a str> {
        match self {
            Statement::FunctionDeclaration(n) => n.name.map(|id| id.text),
            Statement::ClassDeclaration(n) => n.name.map(|id| id.text),
            Statement::InterfaceDeclaration(n) => Some(n.name.text),
            Statement::TypeAliasDeclaration(n) => Some(n.name.text),
            Statement::EnumDeclaration(n) => Some(n.name.text),
            Statement::ModuleDeclaration(n) => match n.name {
                ModuleName::Identifier(id) => Some(id.text),
                ModuleName::StringLiteral(s) => Some(s.value),
            },
            Statement::ImportEqualsDeclaration(n) => Some(n.name.text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

/// `var`, `let` or `const` (see `NodeFlags::LET`/`CONST` on the list).
#[derive(Debug, Clone, Copy)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// Expression statements and `throw` statements.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Declarations
// ============================================================================

/// Function declarations, overload signatures and function expressions.
/// Overloads and ambient functions have no body.
#[derive(Debug, Clone, Copy)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier<'a>>,
    pub asterisk: bool,
    pub signature: Signature<'a>,
    pub body: Option<&'a Block<'a>>,
}

/// Class declarations and class expressions.
#[derive(Debug, Clone, Copy)]
pub struct ClassDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeritageClauseKind {
    Extends,
    Implements,
}

impl HeritageClauseKind {
    pub fn text(self) -> &'static str {
        match self {
            HeritageClauseKind::Extends => "extends",
            HeritageClauseKind::Implements => "implements",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    pub token: HeritageClauseKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub type_node: &'a TypeNode<'a>,
}

/// `const enum` carries `ModifierFlags::CONST`.
#[derive(Debug, Clone, Copy)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub members: NodeList<'a, EnumMember<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// Namespaces, ambient external modules and `declare global`.
///
/// `namespace A.B {}` is a declaration `A` whose body is the declaration
/// `B` (flagged `NESTED_NAMESPACE`).
#[derive(Debug, Clone, Copy)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleName<'a> {
    Identifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
}

impl_node_data!(ModuleName { Identifier, StringLiteral });

#[derive(Debug, Clone, Copy)]
pub enum ModuleBody<'a> {
    Block(ModuleBlock<'a>),
    Namespace(&'a ModuleDeclaration<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Import/Export
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub import_clause: Option<ImportClause<'a>>,
    pub module_specifier: StringLiteral<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Option<Identifier<'a>>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(NamespaceImport<'a>),
    NamedImports(NamedImports<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct NamespaceImport<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ImportSpecifier<'a>>,
}

/// Import and export specifiers: `a`, `a as b`, `type a`.
#[derive(Debug, Clone, Copy)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<Identifier<'a>>,
    pub name: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<StringLiteral<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum NamedExportBindings<'a> {
    NamespaceExport(NamespaceImport<'a>),
    NamedExports(NamedImports<'a>),
}

/// `export = e` or `export default e`.
#[derive(Debug, Clone, Copy)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportEqualsDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Identifier<'a>,
    pub module_reference: ModuleReference<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum ModuleReference<'a> {
    External(ExternalModuleReference<'a>),
    EntityName(EntityName<'a>),
}

/// `require("mod")` on the right of `import x =`.
#[derive(Debug, Clone, Copy)]
pub struct ExternalModuleReference<'a> {
    pub data: NodeData,
    pub expression: StringLiteral<'a>,
}

/// `export as namespace Name;`
#[derive(Debug, Clone, Copy)]
pub struct NamespaceExportDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
}

// ============================================================================
// Class Elements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum ClassElement<'a> {
    PropertyDeclaration(PropertyDeclaration<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    Constructor(MethodDeclaration<'a>),
    GetAccessor(MethodDeclaration<'a>),
    SetAccessor(MethodDeclaration<'a>),
    IndexSignature(IndexSignatureNode<'a>),
    StaticBlock(ClassStaticBlockDeclaration<'a>),
    Semicolon(NodeData),
}

impl_node_data!(ClassElement {
    PropertyDeclaration, MethodDeclaration, Constructor, GetAccessor, SetAccessor,
    IndexSignature, StaticBlock, Semicolon(raw),
});

impl<'a> ClassElement<'a> {
    pub fn name(&self) -> Option<&PropertyName<'a>> {
        match self {
            ClassElement::PropertyDeclaration(n) => Some(&n.name),
            ClassElement::MethodDeclaration(n)
            | ClassElement::GetAccessor(n)
            | ClassElement::SetAccessor(n) => Some(&n.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question: bool,
    pub exclamation: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// Methods, constructors and accessors, in classes and object literals.
/// A constructor's name is the `constructor` identifier or string.
#[derive(Debug, Clone, Copy)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question: bool,
    pub asterisk: bool,
    pub signature: Signature<'a>,
    pub body: Option<&'a Block<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ClassStaticBlockDeclaration<'a> {
    pub data: NodeData,
    pub body: &'a Block<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_positions() {
        let mut data = NodeData::new(SyntaxKind::TypeReference, 10, 14);
        data.reset_start(4);
        data.reset_end(20);
        assert_eq!(data.range, TextRange::new(4, 20));
    }

    #[test]
    fn test_ambient_by_flag_or_modifier() {
        let plain = NodeData::new(SyntaxKind::FunctionDeclaration, 0, 1);
        assert!(!plain.is_ambient());
        assert!(plain.with_flags(NodeFlags::AMBIENT).is_ambient());
        assert!(plain.with_modifiers(ModifierFlags::AMBIENT).is_ambient());
    }

    #[test]
    fn test_entity_name_text() {
        let a = Identifier { data: NodeData::new(SyntaxKind::Identifier, 0, 1), text: "A" };
        let b = Identifier { data: NodeData::new(SyntaxKind::Identifier, 2, 3), text: "B" };
        let qualified = QualifiedName {
            data: NodeData::new(SyntaxKind::QualifiedName, 0, 3),
            left: EntityName::Identifier(a),
            right: b,
        };
        assert_eq!(EntityName::QualifiedName(&qualified).to_text(), "A.B");
    }

    #[test]
    fn test_skip_parens() {
        let inner = TypeNode::ThisType(ThisTypeNode { data: NodeData::new(SyntaxKind::ThisType, 1, 5) });
        let outer = TypeNode::ParenthesizedType(WrappedTypeNode {
            data: NodeData::new(SyntaxKind::ParenthesizedType, 0, 6),
            type_node: &inner,
        });
        assert_eq!(outer.skip_parens().kind(), SyntaxKind::ThisType);
    }
}
