//! The type grammar.
//!
//! Precedence, lowest first: conditional, union, intersection, type
//! operators (`keyof`, `unique`, `readonly`, `infer`), array and indexed
//! access postfixes, then primary types. Every entry point here expects a
//! type-position frame on the tokenizer context stack; use
//! [`Parser::in_type`] or [`Parser::parse_type_annotation`] from outside.

use typegram_ast::keyword::{ContextualKeyword, KeywordTypeKind, Modifier};
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::{ModifierFlags, NodeFlags};
use typegram_diagnostics::{messages, PResult};

use crate::host::HostGrammar;
use crate::lists::{Bracket, ListKind, SignatureReturn};
use crate::modifiers::ModifierRules;
use crate::parser::Parser;

impl<'a, H: HostGrammar> Parser<'a, H> {
    /// `: T` annotations and other types reached from value position.
    pub fn parse_type_annotation(&mut self) -> PResult<&'a TypeNode<'a>> {
        let type_node = self.in_type(|p| p.parse_type())?;
        Ok(self.alloc(type_node))
    }

    /// A return annotation, which may be a type predicate.
    pub fn parse_type_or_type_predicate_annotation(&mut self) -> PResult<&'a TypeNode<'a>> {
        let type_node = self.in_type(|p| p.parse_type_or_type_predicate())?;
        Ok(self.alloc(type_node))
    }

    pub fn parse_type(&mut self) -> PResult<TypeNode<'a>> {
        debug_assert!(self.current_context().is_type(), "parse_type outside a type position");
        self.guarded(|p| {
            if p.is_start_of_function_type() {
                return p.parse_function_or_constructor_type();
            }
            let pos = p.token_pos();
            let check_type = p.parse_union_type_or_higher()?;
            if p.in_disallow_conditional_types_context()
                || p.has_preceding_line_break()
                || !p.eat(SyntaxKind::ExtendsKeyword)?
            {
                return Ok(check_type);
            }
            // The extends operand may not itself be a conditional type.
            let extends_type = p.disallow_conditional_types(|p| p.parse_type())?;
            p.expect(SyntaxKind::QuestionToken)?;
            let true_type = p.allow_conditional_types(|p| p.parse_type())?;
            p.expect(SyntaxKind::ColonToken)?;
            let false_type = p.allow_conditional_types(|p| p.parse_type())?;
            Ok(TypeNode::ConditionalType(ConditionalTypeNode {
                data: p.finish(SyntaxKind::ConditionalType, pos),
                check_type: p.alloc(check_type),
                extends_type: p.alloc(extends_type),
                true_type: p.alloc(true_type),
                false_type: p.alloc(false_type),
            }))
        })
    }

    /// Everything except a conditional type.
    pub fn parse_non_conditional_type(&mut self) -> PResult<TypeNode<'a>> {
        if self.is_start_of_function_type() {
            return self.parse_function_or_constructor_type();
        }
        self.parse_union_type_or_higher()
    }

    pub fn parse_union_type_or_higher(&mut self) -> PResult<TypeNode<'a>> {
        self.parse_union_or_intersection(SyntaxKind::BarToken, |p| p.parse_intersection_type_or_higher())
    }

    pub fn parse_intersection_type_or_higher(&mut self) -> PResult<TypeNode<'a>> {
        self.parse_union_or_intersection(SyntaxKind::AmpersandToken, |p| p.parse_type_operator_or_higher())
    }

    /// A leading operator (`| A`) still produces a union or intersection
    /// node, even with a single constituent.
    fn parse_union_or_intersection(
        &mut self,
        operator: SyntaxKind,
        parse_constituent: fn(&mut Self) -> PResult<TypeNode<'a>>,
    ) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let has_leading_operator = self.eat(operator)?;
        let first = parse_constituent(self)?;
        if !has_leading_operator && !self.at(operator) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.eat(operator)? {
            types.push(parse_constituent(self)?);
        }
        let types = self.alloc_list(types);
        Ok(if operator == SyntaxKind::BarToken {
            TypeNode::UnionType(UnionOrIntersectionTypeNode { data: self.finish(SyntaxKind::UnionType, pos), types })
        } else {
            TypeNode::IntersectionType(UnionOrIntersectionTypeNode {
                data: self.finish(SyntaxKind::IntersectionType, pos),
                types,
            })
        })
    }

    pub fn parse_type_operator_or_higher(&mut self) -> PResult<TypeNode<'a>> {
        let operator = match self.token().contextual {
            Some(ContextualKeyword::KeyOf) => TypeOperatorKind::KeyOf,
            Some(ContextualKeyword::Unique) => TypeOperatorKind::Unique,
            Some(ContextualKeyword::Readonly) => TypeOperatorKind::Readonly,
            Some(ContextualKeyword::Infer) => return self.parse_infer_type(),
            _ => return self.allow_conditional_types(|p| p.parse_array_type_or_higher()),
        };
        let pos = self.token_pos();
        self.next_token()?;
        let operand = self.guarded(|p| p.parse_type_operator_or_higher())?;
        let mut data = self.finish(SyntaxKind::TypeOperator, pos);
        if operator == TypeOperatorKind::Readonly
            && !matches!(operand, TypeNode::ArrayType(_) | TypeNode::TupleType(_))
        {
            self.recoverable(
                data.range.to_span(),
                &messages::READONLY_TYPE_MODIFIER_IS_ONLY_PERMITTED_ON_ARRAY_AND_TUPLE_LITERAL_TYPES,
                &[],
            );
            data.flags.insert(NodeFlags::THIS_NODE_HAS_ERROR);
        }
        Ok(TypeNode::TypeOperator(TypeOperatorNode { data, operator, type_node: self.alloc(operand) }))
    }

    /// `infer U` or `infer U extends C`.
    fn parse_infer_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        self.next_token()?;
        let parameter_pos = self.token_pos();
        let name = self.parse_identifier()?;
        let constraint = self.try_parse(|p| p.try_parse_constraint_of_infer_type());
        let type_parameter = TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, parameter_pos),
            name,
            constraint,
            default: None,
        };
        Ok(TypeNode::InferType(InferTypeNode {
            data: self.finish(SyntaxKind::InferType, pos),
            type_parameter: self.alloc(type_parameter),
        }))
    }

    /// In `infer U extends C ? X : Y` inside a check type, the `extends`
    /// belongs to the enclosing conditional, not to `U`.
    fn try_parse_constraint_of_infer_type(&mut self) -> PResult<Option<&'a TypeNode<'a>>> {
        if !self.eat(SyntaxKind::ExtendsKeyword)? {
            return Ok(None);
        }
        let constraint = self.disallow_conditional_types(|p| p.parse_type())?;
        if self.in_disallow_conditional_types_context() || !self.at(SyntaxKind::QuestionToken) {
            return Ok(Some(self.alloc(constraint)));
        }
        Ok(None)
    }

    /// `T[]` and `T[K]`, which do not continue across a line break.
    pub fn parse_array_type_or_higher(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let mut type_node = self.parse_non_array_type()?;
        while self.at(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            self.next_token()?;
            if self.eat(SyntaxKind::CloseBracketToken)? {
                type_node = TypeNode::ArrayType(ArrayTypeNode {
                    data: self.finish(SyntaxKind::ArrayType, pos),
                    element_type: self.alloc(type_node),
                });
            } else {
                let index_type = self.parse_type()?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                type_node = TypeNode::IndexedAccessType(IndexedAccessTypeNode {
                    data: self.finish(SyntaxKind::IndexedAccessType, pos),
                    object_type: self.alloc(type_node),
                    index_type: self.alloc(index_type),
                });
            }
        }
        Ok(type_node)
    }

    pub fn parse_non_array_type(&mut self) -> PResult<TypeNode<'a>> {
        match self.kind() {
            SyntaxKind::Identifier => {
                if let Some(keyword) = self.keyword_type_here() {
                    return self.parse_keyword_type(keyword);
                }
                self.parse_type_reference()
            }
            SyntaxKind::VoidKeyword => self.parse_keyword_type(KeywordTypeKind::Void),
            SyntaxKind::ThisKeyword => {
                let this_type = self.parse_this_type()?;
                if self.is_contextual(ContextualKeyword::Is) && !self.has_preceding_line_break() {
                    return self.parse_type_predicate_rest(
                        this_type.data.pos(),
                        false,
                        TypePredicateParameterName::This(this_type),
                    );
                }
                Ok(TypeNode::ThisType(this_type))
            }
            SyntaxKind::TypeOfKeyword => {
                if self.next_token_is(|t| t.kind == SyntaxKind::ImportKeyword) {
                    self.parse_import_type()
                } else {
                    self.parse_type_query()
                }
            }
            SyntaxKind::OpenBraceToken => {
                if self.look_ahead(|p| p.is_start_of_mapped_type()) {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_type(),
            SyntaxKind::ImportKeyword => self.parse_import_type(),
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => self.parse_literal_type_node(false),
            SyntaxKind::MinusToken
                if self.next_token_is(|t| matches!(t.kind, SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral)) =>
            {
                self.parse_literal_type_node(true)
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            _ => Err(self.error_here(&messages::TYPE_EXPECTED, &[])),
        }
    }

    /// A predefined type name not followed by `.` (`string.x` is a
    /// qualified name).
    fn keyword_type_here(&self) -> Option<KeywordTypeKind> {
        let token = self.token();
        if token.is_escaped() {
            return None;
        }
        let keyword = KeywordTypeKind::from_type_name(&token.value)?;
        (self.host.next_char_after_trivia(token.end) != Some('.')).then_some(keyword)
    }

    fn parse_keyword_type(&mut self, keyword: KeywordTypeKind) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        self.next_token()?;
        Ok(TypeNode::KeywordType(KeywordTypeNode { data: self.finish(SyntaxKind::KeywordType, pos), keyword }))
    }

    fn parse_this_type(&mut self) -> PResult<ThisTypeNode> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ThisKeyword)?;
        Ok(ThisTypeNode { data: self.finish(SyntaxKind::ThisType, pos) })
    }

    fn parse_type_reference(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name(false)?;
        let type_arguments = self.parse_type_arguments_on_same_line()?;
        Ok(TypeNode::TypeReference(TypeReferenceNode {
            data: self.finish(SyntaxKind::TypeReference, pos),
            type_name,
            type_arguments,
        }))
    }

    fn parse_type_arguments_on_same_line(&mut self) -> PResult<Option<&'a [TypeNode<'a>]>> {
        if self.at(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            return Ok(Some(self.parse_type_arguments()?));
        }
        Ok(None)
    }

    /// `A`, `A.B.C`; names after a dot may be reserved words.
    pub fn parse_entity_name(&mut self, allow_this: bool) -> PResult<EntityName<'a>> {
        let pos = self.token_pos();
        let first = if allow_this && self.at(SyntaxKind::ThisKeyword) {
            self.parse_identifier_name()?
        } else {
            self.parse_identifier()?
        };
        self.parse_entity_name_rest(pos, EntityName::Identifier(first))
    }

    pub(crate) fn parse_entity_name_rest(&mut self, pos: u32, mut name: EntityName<'a>) -> PResult<EntityName<'a>> {
        while self.eat(SyntaxKind::DotToken)? {
            let right = self.parse_identifier_name()?;
            let qualified = QualifiedName { data: self.finish(SyntaxKind::QualifiedName, pos), left: name, right };
            name = EntityName::QualifiedName(self.alloc(qualified));
        }
        Ok(name)
    }

    /// `typeof a.b` with optional type arguments.
    pub fn parse_type_query(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::TypeOfKeyword)?;
        let expr_name = self.parse_entity_name(true)?;
        let type_arguments = self.parse_type_arguments_on_same_line()?;
        Ok(TypeNode::TypeQuery(TypeQueryNode { data: self.finish(SyntaxKind::TypeQuery, pos), expr_name, type_arguments }))
    }

    /// `import("mod").A.B<T>`, optionally prefixed by `typeof`.
    pub fn parse_import_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let is_type_of = self.eat(SyntaxKind::TypeOfKeyword)?;
        self.expect(SyntaxKind::ImportKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let argument = self.parse_string_literal()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let qualifier = if self.eat(SyntaxKind::DotToken)? {
            let qualifier_pos = self.token_pos();
            let first = self.parse_identifier_name()?;
            Some(self.parse_entity_name_rest(qualifier_pos, EntityName::Identifier(first))?)
        } else {
            None
        };
        let type_arguments = self.parse_type_arguments_on_same_line()?;
        Ok(TypeNode::ImportType(ImportTypeNode {
            data: self.finish(SyntaxKind::ImportType, pos),
            is_type_of,
            argument,
            qualifier,
            type_arguments,
        }))
    }

    fn parse_type_literal(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let members = self.parse_object_type_members()?;
        Ok(TypeNode::TypeLiteral(TypeLiteralNode { data: self.finish(SyntaxKind::TypeLiteral, pos), members }))
    }

    /// `{ member; member }` for type literals and interface bodies.
    pub(crate) fn parse_object_type_members(&mut self) -> PResult<&'a [TypeElement<'a>]> {
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at(SyntaxKind::EndOfFileToken) {
            members.push(self.parse_type_member()?);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.alloc_list(members))
    }

    // ========================================================================
    // Mapped types
    // ========================================================================

    /// At `{`: does `[+|-][readonly] [K in` follow?
    pub fn is_start_of_mapped_type(&mut self) -> PResult<bool> {
        self.next_token()?;
        if self.at(SyntaxKind::PlusToken) || self.at(SyntaxKind::MinusToken) {
            self.next_token()?;
            return Ok(self.is_contextual(ContextualKeyword::Readonly));
        }
        self.eat_if_contextual(ContextualKeyword::Readonly)?;
        if !self.eat(SyntaxKind::OpenBracketToken)? || !self.at(SyntaxKind::Identifier) {
            return Ok(false);
        }
        self.next_token()?;
        Ok(self.at(SyntaxKind::InKeyword))
    }

    pub fn parse_mapped_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let readonly_modifier = match self.parse_mapped_modifier_sign()? {
            Some(sign) => {
                self.expect_contextual(ContextualKeyword::Readonly)?;
                Some(sign)
            }
            None => self
                .eat_if_contextual(ContextualKeyword::Readonly)?
                .then_some(MappedModifier::Present),
        };
        self.expect(SyntaxKind::OpenBracketToken)?;
        let parameter_pos = self.token_pos();
        let name = self.parse_identifier()?;
        self.expect(SyntaxKind::InKeyword)?;
        let constraint = self.parse_type()?;
        let type_parameter = TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, parameter_pos),
            name,
            constraint: Some(self.alloc(constraint)),
            default: None,
        };
        let name_type = if self.eat_if_contextual(ContextualKeyword::As)? {
            let name_type = self.parse_type()?;
            Some(self.alloc(name_type))
        } else {
            None
        };
        self.expect(SyntaxKind::CloseBracketToken)?;
        let question_modifier = match self.parse_mapped_modifier_sign()? {
            Some(sign) => {
                self.expect(SyntaxKind::QuestionToken)?;
                Some(sign)
            }
            None => self.eat(SyntaxKind::QuestionToken)?.then_some(MappedModifier::Present),
        };
        let type_node = if self.eat(SyntaxKind::ColonToken)? {
            let type_node = self.parse_type()?;
            Some(self.alloc(type_node))
        } else {
            None
        };
        if !self.eat(SyntaxKind::SemicolonToken)? {
            self.eat(SyntaxKind::CommaToken)?;
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(TypeNode::MappedType(MappedTypeNode {
            data: self.finish(SyntaxKind::MappedType, pos),
            readonly_modifier,
            type_parameter: self.alloc(type_parameter),
            name_type,
            question_modifier,
            type_node,
        }))
    }

    fn parse_mapped_modifier_sign(&mut self) -> PResult<Option<MappedModifier>> {
        let sign = match self.kind() {
            SyntaxKind::PlusToken => MappedModifier::Plus,
            SyntaxKind::MinusToken => MappedModifier::Minus,
            _ => return Ok(None),
        };
        self.next_token()?;
        Ok(Some(sign))
    }

    // ========================================================================
    // Tuples
    // ========================================================================

    pub fn parse_tuple_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let list = self.parse_bracketed_list(ListKind::TupleElements, Bracket::Square, false, |p| {
            p.parse_tuple_element_name_or_type()
        })?;
        let mut data = self.finish(SyntaxKind::TupleType, pos);
        if self.check_tuple_elements(&list.elements) {
            data.flags.insert(NodeFlags::THIS_NODE_HAS_ERROR);
        }
        Ok(TypeNode::TupleType(TupleTypeNode { data, elements: self.alloc_list(list.elements) }))
    }

    fn parse_tuple_element_name_or_type(&mut self) -> PResult<TypeNode<'a>> {
        if !self.look_ahead(|p| p.is_tuple_element_name()) {
            return self.parse_tuple_element_type();
        }
        let pos = self.token_pos();
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
        let name = self.parse_identifier_name()?;
        let question = self.eat(SyntaxKind::QuestionToken)?;
        self.expect(SyntaxKind::ColonToken)?;
        let type_node = self.parse_tuple_element_type()?;
        Ok(TypeNode::NamedTupleMember(NamedTupleMemberNode {
            data: self.finish(SyntaxKind::NamedTupleMember, pos),
            dot_dot_dot,
            name,
            question,
            type_node: self.alloc(type_node),
        }))
    }

    /// `[...]name:` or `[...]name?:`
    fn is_tuple_element_name(&mut self) -> PResult<bool> {
        if self.at(SyntaxKind::DotDotDotToken) {
            self.next_token()?;
        }
        if !self.kind().is_identifier_or_keyword() {
            return Ok(false);
        }
        self.next_token()?;
        if self.eat(SyntaxKind::QuestionToken)? {
            return Ok(self.at(SyntaxKind::ColonToken));
        }
        Ok(self.at(SyntaxKind::ColonToken))
    }

    fn parse_tuple_element_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        if self.eat(SyntaxKind::DotDotDotToken)? {
            let type_node = self.parse_type()?;
            return Ok(TypeNode::RestType(WrappedTypeNode {
                data: self.finish(SyntaxKind::RestType, pos),
                type_node: self.alloc(type_node),
            }));
        }
        let type_node = self.parse_type()?;
        if self.at(SyntaxKind::ColonToken) {
            return Err(self.error_at(type_node.range().to_span(), &messages::INVALID_TUPLE_MEMBER_LABEL, &[]));
        }
        if self.eat(SyntaxKind::QuestionToken)? {
            return Ok(TypeNode::OptionalType(WrappedTypeNode {
                data: self.finish(SyntaxKind::OptionalType, pos),
                type_node: self.alloc(type_node),
            }));
        }
        Ok(type_node)
    }

    /// Report mixed labelling and misplaced optional elements. Returns
    /// whether anything was reported.
    pub fn check_tuple_elements(&mut self, elements: &[TypeNode<'a>]) -> bool {
        let mut has_error = false;
        let named = |element: &TypeNode<'a>| matches!(element, TypeNode::NamedTupleMember(_));
        if let Some(first) = elements.first() {
            if let Some(odd) = elements.iter().find(|element| named(element) != named(first)) {
                self.recoverable(
                    odd.range().to_span(),
                    &messages::TUPLE_MEMBERS_MUST_ALL_HAVE_NAMES_OR_ALL_NOT_HAVE_NAMES,
                    &[],
                );
                has_error = true;
            }
        }

        let mut seen_optional = false;
        let mut seen_rest = false;
        for element in elements {
            let (optional, rest) = match element {
                TypeNode::NamedTupleMember(member) => (member.question, member.dot_dot_dot),
                TypeNode::OptionalType(_) => (true, false),
                TypeNode::RestType(_) => (false, true),
                _ => (false, false),
            };
            if rest {
                seen_rest = true;
            } else if optional {
                if seen_rest {
                    self.recoverable(
                        element.range().to_span(),
                        &messages::AN_OPTIONAL_ELEMENT_CANNOT_FOLLOW_A_REST_ELEMENT,
                        &[],
                    );
                    has_error = true;
                }
                seen_optional = true;
            } else if seen_optional {
                self.recoverable(
                    element.range().to_span(),
                    &messages::A_REQUIRED_ELEMENT_CANNOT_FOLLOW_AN_OPTIONAL_ELEMENT,
                    &[],
                );
                has_error = true;
            }
        }
        has_error
    }

    // ========================================================================
    // Function types and parentheses
    // ========================================================================

    /// `<`, `new`, `abstract new`, or a `(` that can only open a parameter
    /// list.
    pub fn is_start_of_function_type(&mut self) -> bool {
        match self.kind() {
            SyntaxKind::LessThanToken | SyntaxKind::NewKeyword => true,
            SyntaxKind::OpenParenToken => self.look_ahead(|p| p.is_unambiguously_start_of_function_type()),
            _ => {
                self.is_contextual(ContextualKeyword::Abstract)
                    && self.next_token_is(|t| t.kind == SyntaxKind::NewKeyword)
            }
        }
    }

    fn is_unambiguously_start_of_function_type(&mut self) -> PResult<bool> {
        self.next_token()?;
        if self.at(SyntaxKind::CloseParenToken) || self.at(SyntaxKind::DotDotDotToken) {
            return Ok(true);
        }
        if !self.skip_parameter_start()? {
            return Ok(false);
        }
        match self.kind() {
            SyntaxKind::ColonToken | SyntaxKind::CommaToken | SyntaxKind::QuestionToken | SyntaxKind::EqualsToken => {
                Ok(true)
            }
            SyntaxKind::CloseParenToken => {
                self.next_token()?;
                Ok(self.at(SyntaxKind::EqualsGreaterThanToken))
            }
            _ => Ok(false),
        }
    }

    fn skip_parameter_start(&mut self) -> PResult<bool> {
        self.parse_modifiers(&ModifierRules::PARAMETER, None)?;
        if self.at(SyntaxKind::Identifier) || self.at(SyntaxKind::ThisKeyword) {
            self.next_token()?;
            return Ok(true);
        }
        if self.at(SyntaxKind::OpenBracketToken) || self.at(SyntaxKind::OpenBraceToken) {
            self.parse_binding_name()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_function_or_constructor_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let is_abstract = self.eat_if_contextual(ContextualKeyword::Abstract)?;
        let is_constructor = self.eat(SyntaxKind::NewKeyword)?;
        let signature = self.fill_signature(SignatureReturn::Arrow)?;
        if is_constructor {
            let mut data = self.finish(SyntaxKind::ConstructorType, pos);
            if is_abstract {
                data.modifier_flags.insert(ModifierFlags::ABSTRACT);
            }
            return Ok(TypeNode::ConstructorType(FunctionTypeNode { data, signature }));
        }
        Ok(TypeNode::FunctionType(FunctionTypeNode { data: self.finish(SyntaxKind::FunctionType, pos), signature }))
    }

    fn parse_parenthesized_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenParenToken)?;
        let type_node = self.parse_type()?;
        self.expect(SyntaxKind::CloseParenToken)?;
        Ok(TypeNode::ParenthesizedType(WrappedTypeNode {
            data: self.finish(SyntaxKind::ParenthesizedType, pos),
            type_node: self.alloc(type_node),
        }))
    }

    // ========================================================================
    // Literal and template types
    // ========================================================================

    /// String, numeric, bigint, boolean and `null` literal types, and
    /// negative numbers.
    fn parse_literal_type_node(&mut self, negative: bool) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let literal = if negative {
            self.expect(SyntaxKind::MinusToken)?;
            let operand = self.parse_literal_expression()?;
            Expression::PrefixUnary(UnaryExpression {
                data: self.finish(SyntaxKind::PrefixUnaryExpression, pos),
                operator: SyntaxKind::MinusToken,
                operand: self.alloc(operand),
            })
        } else {
            self.parse_literal_expression()?
        };
        Ok(TypeNode::LiteralType(LiteralTypeNode {
            data: self.finish(SyntaxKind::LiteralType, pos),
            literal: self.alloc(literal),
        }))
    }

    /// `` `prefix${T}middle${U}suffix` `` in type position.
    pub fn parse_template_literal_type(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        let head = self.parse_template_part(SyntaxKind::TemplateHead)?;
        let mut spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let type_node = self.parse_type()?;
            let literal = self.parse_template_continuation()?;
            let is_tail = literal.data.kind == SyntaxKind::TemplateTail;
            spans.push(TemplateLiteralTypeSpan {
                data: self.finish(SyntaxKind::TemplateLiteralTypeSpan, span_pos),
                type_node: self.alloc(type_node),
                literal,
            });
            if is_tail {
                break;
            }
        }
        Ok(TypeNode::TemplateLiteralType(TemplateLiteralTypeNode {
            data: self.finish(SyntaxKind::TemplateLiteralType, pos),
            head,
            spans: self.alloc_list(spans),
        }))
    }

    /// Consume the current template token of `kind`.
    pub(crate) fn parse_template_part(&mut self, kind: SyntaxKind) -> PResult<TemplatePart<'a>> {
        if !self.at(kind) {
            return Err(self.unexpected());
        }
        let pos = self.token_pos();
        let raw = self.alloc_str(&self.token().value);
        self.next_token()?;
        Ok(TemplatePart { data: self.finish(kind, pos), raw })
    }

    /// At the `}` closing a substitution: re-read it as a middle or tail.
    pub(crate) fn parse_template_continuation(&mut self) -> PResult<TemplatePart<'a>> {
        if !self.at(SyntaxKind::CloseBraceToken) {
            return Err(self.error_here(&messages::_0_EXPECTED, &["}"]));
        }
        let kind = self.host.rescan_template_token()?;
        self.parse_template_part(kind)
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// A return type that may be `x is T`, `asserts x`, `asserts x is T`
    /// or `asserts this`.
    pub fn parse_type_or_type_predicate(&mut self) -> PResult<TypeNode<'a>> {
        let pos = self.token_pos();
        if self.is_contextual(ContextualKeyword::Asserts)
            && self.next_token_is(|t| {
                !t.has_preceding_line_break() && matches!(t.kind, SyntaxKind::Identifier | SyntaxKind::ThisKeyword)
            })
        {
            self.next_token()?;
            let parameter_name = if self.at(SyntaxKind::ThisKeyword) {
                TypePredicateParameterName::This(self.parse_this_type()?)
            } else {
                TypePredicateParameterName::Identifier(self.parse_identifier()?)
            };
            return self.parse_type_predicate_rest(pos, true, parameter_name);
        }
        match self.try_parse(|p| p.parse_type_predicate_prefix()) {
            Some(name) => {
                let type_node = self.parse_type()?;
                Ok(TypeNode::TypePredicate(TypePredicateNode {
                    data: self.finish(SyntaxKind::TypePredicate, pos),
                    asserts: false,
                    parameter_name: TypePredicateParameterName::Identifier(name),
                    type_node: Some(self.alloc(type_node)),
                }))
            }
            None => self.parse_type(),
        }
    }

    /// `x is`
    fn parse_type_predicate_prefix(&mut self) -> PResult<Option<Identifier<'a>>> {
        if !self.at(SyntaxKind::Identifier) {
            return Ok(None);
        }
        let name = self.parse_identifier()?;
        if self.is_contextual(ContextualKeyword::Is) && !self.has_preceding_line_break() {
            self.next_token()?;
            return Ok(Some(name));
        }
        Ok(None)
    }

    /// After the parameter name: an optional `is T`.
    fn parse_type_predicate_rest(
        &mut self,
        pos: u32,
        asserts: bool,
        parameter_name: TypePredicateParameterName<'a>,
    ) -> PResult<TypeNode<'a>> {
        let type_node = if self.is_contextual(ContextualKeyword::Is) && !self.has_preceding_line_break() {
            self.next_token()?;
            let type_node = self.parse_type()?;
            Some(self.alloc(type_node))
        } else {
            None
        };
        Ok(TypeNode::TypePredicate(TypePredicateNode {
            data: self.finish(SyntaxKind::TypePredicate, pos),
            asserts,
            parameter_name,
            type_node,
        }))
    }

    // ========================================================================
    // Type arguments and parameters
    // ========================================================================

    /// `<A, B>`; the list may not be empty.
    pub fn parse_type_arguments(&mut self) -> PResult<&'a [TypeNode<'a>]> {
        self.in_type(|p| {
            let list = p.parse_bracketed_list(ListKind::TypeArguments, Bracket::Angle, false, |p| p.parse_type())?;
            if list.elements.is_empty() {
                return Err(p.error_at(list.span(), &messages::TYPE_ARGUMENT_LIST_CANNOT_BE_EMPTY, &[]));
            }
            Ok(p.alloc_list(list.elements))
        })
    }

    /// `<T extends C = D>`. `in` and `out` are only accepted with
    /// `allow_variance` (classes, interfaces and type aliases).
    pub fn parse_type_parameters(&mut self, allow_variance: bool) -> PResult<&'a [TypeParameterDeclaration<'a>]> {
        self.in_type(|p| {
            let list = p.parse_bracketed_list(ListKind::TypeParameters, Bracket::Angle, false, |p| {
                p.parse_type_parameter(allow_variance)
            })?;
            if list.elements.is_empty() {
                return Err(p.error_at(list.span(), &messages::TYPE_PARAMETER_LIST_CANNOT_BE_EMPTY, &[]));
            }
            Ok(p.alloc_list(list.elements))
        })
    }

    fn parse_type_parameter(&mut self, allow_variance: bool) -> PResult<TypeParameterDeclaration<'a>> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers(&ModifierRules::TYPE_PARAMETER, None)?;
        if !allow_variance {
            let variance = modifiers.entries.iter().find(|(m, _)| matches!(m, Modifier::In | Modifier::Out));
            if let Some((modifier, span)) = variance {
                return Err(self.error_at(
                    *span,
                    &messages::_0_MODIFIER_CAN_ONLY_APPEAR_ON_A_TYPE_PARAMETER_OF_A_CLASS_INTERFACE_OR_TYPE_ALIAS,
                    &[modifier.text()],
                ));
            }
        }
        let name = self.parse_identifier()?;
        let constraint = if self.eat(SyntaxKind::ExtendsKeyword)? {
            let constraint = self.parse_type()?;
            Some(self.alloc(constraint))
        } else {
            None
        };
        let default = if self.eat(SyntaxKind::EqualsToken)? {
            let default = self.parse_type()?;
            Some(self.alloc(default))
        } else {
            None
        };
        Ok(TypeParameterDeclaration {
            data: self.finish(SyntaxKind::TypeParameter, pos).with_modifiers(modifiers.flags),
            name,
            constraint,
            default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn parse_type<'a>(arena: &'a Bump, text: &str) -> PResult<TypeNode<'a>> {
        let mut parser = Parser::new(arena, "t.ts", text);
        parser.next_token()?;
        parser.in_type(|p| p.parse_type())
    }

    #[test]
    fn test_keyword_type_with_dot_is_reference() {
        let arena = Bump::new();
        assert!(matches!(parse_type(&arena, "string").unwrap(), TypeNode::KeywordType(_)));
        match parse_type(&arena, "string.Foo").unwrap() {
            TypeNode::TypeReference(reference) => assert_eq!(reference.type_name.to_text(), "string.Foo"),
            other => panic!("expected type reference, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_leading_bar_makes_union() {
        let arena = Bump::new();
        match parse_type(&arena, "| A").unwrap() {
            TypeNode::UnionType(union) => assert_eq!(union.types.len(), 1),
            other => panic!("expected union, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_infer_constraint_yields_to_conditional() {
        let arena = Bump::new();
        let TypeNode::ConditionalType(outer) = parse_type(&arena, "T extends [infer U extends string] ? U : never").unwrap()
        else {
            panic!("expected conditional");
        };
        let TypeNode::TupleType(tuple) = outer.extends_type else { panic!("expected tuple") };
        let TypeNode::InferType(infer) = &tuple.elements[0] else { panic!("expected infer") };
        assert!(infer.type_parameter.constraint.is_some());
    }

    #[test]
    fn test_array_postfix_stops_at_line_break() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "A\n[]");
        parser.next_token().unwrap();
        let node = parser.in_type(|p| p.parse_type()).unwrap();
        assert!(matches!(node, TypeNode::TypeReference(_)));
        assert!(parser.at(SyntaxKind::OpenBracketToken));
    }

    #[test]
    fn test_primary_failure_is_type_expected() {
        let arena = Bump::new();
        let err = parse_type(&arena, ")").unwrap_err();
        assert_eq!(err.code(), 1110);
    }
}
