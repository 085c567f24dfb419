//! Declaration disambiguation and the typed declarations.
//!
//! Words like `type`, `interface`, `declare` or `namespace` only start a
//! declaration when the tokens after them allow it; `type(x)` and
//! `interface()` are ordinary expressions. [`Parser::try_parse_declaration`]
//! decides from a lookahead and consumes nothing when it declines.

use rustc_hash::FxHashMap;
use tracing::debug;
use typegram_ast::keyword::{ContextualKeyword, KeywordTypeKind, Modifier};
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::{ModifierFlags, NodeFlags};
use typegram_core::text::{TextPos, TextSpan};
use typegram_diagnostics::{messages, PResult};
use typegram_scanner::Token;

use crate::host::HostGrammar;
use crate::lists::{Bracket, ListKind, SignatureReturn};
use crate::modifiers::{ModifierRules, ModifierSet};
use crate::parser::Parser;
use crate::scope::{BindingKind, ScopeKind};

/// The declaration a statement-initial word introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationStart {
    Declare,
    Global,
    Abstract,
    Module,
    Namespace,
    TypeAlias,
    Interface,
    Enum,
    ConstEnum,
}

impl<'a, H: HostGrammar> Parser<'a, H> {
    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Classify the current token as the start of a typed declaration,
    /// looking ahead as far as needed. Nothing is consumed.
    pub fn peek_declaration_start(&mut self) -> Option<DeclarationStart> {
        if self.at(SyntaxKind::ConstKeyword) {
            let is_const_enum = self.next_token_is(|t| t.is_contextual(ContextualKeyword::Enum));
            return is_const_enum.then_some(DeclarationStart::ConstEnum);
        }
        let start = match self.token().contextual? {
            ContextualKeyword::Declare => DeclarationStart::Declare,
            ContextualKeyword::Global => DeclarationStart::Global,
            ContextualKeyword::Abstract => DeclarationStart::Abstract,
            ContextualKeyword::Module => DeclarationStart::Module,
            ContextualKeyword::Namespace => DeclarationStart::Namespace,
            ContextualKeyword::Type => DeclarationStart::TypeAlias,
            ContextualKeyword::Interface => DeclarationStart::Interface,
            ContextualKeyword::Enum => DeclarationStart::Enum,
            _ => return None,
        };
        self.next_token_is(|next| can_follow_declaration_word(start, next)).then_some(start)
    }

    /// Parse a typed declaration if one starts here. `Ok(None)` means the
    /// caller should parse an ordinary statement; nothing was consumed.
    pub fn try_parse_declaration(&mut self) -> PResult<Option<Statement<'a>>> {
        let Some(start) = self.peek_declaration_start() else {
            return Ok(None);
        };
        debug!(?start, pos = self.token_pos(), "declaration");
        let pos = self.token_pos();
        let statement = match start {
            DeclarationStart::Declare => self.parse_declare_declaration()?,
            DeclarationStart::Global => self.parse_global_augmentation(pos, ModifierFlags::NONE)?,
            DeclarationStart::Abstract => self.parse_abstract_declaration()?,
            DeclarationStart::Module | DeclarationStart::Namespace => {
                self.parse_module_or_namespace(pos, ModifierFlags::NONE)?
            }
            DeclarationStart::TypeAlias => self.parse_type_alias_declaration(pos, ModifierFlags::NONE)?,
            DeclarationStart::Interface => self.parse_interface_declaration(pos, ModifierFlags::NONE)?,
            DeclarationStart::Enum => self.parse_enum_declaration(pos, ModifierFlags::NONE)?,
            DeclarationStart::ConstEnum => {
                self.next_token()?;
                self.parse_enum_declaration(pos, ModifierFlags::CONST)?
            }
        };
        Ok(Some(statement))
    }

    /// `declare` followed by any declaration. Everything inside is ambient.
    pub fn parse_declare_declaration(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        self.expect_contextual(ContextualKeyword::Declare)?;
        let mut statement = self.with_ambient_context(|p| match p.kind() {
            SyntaxKind::FunctionKeyword => p.parse_function_declaration(pos, ModifierFlags::AMBIENT),
            SyntaxKind::ClassKeyword => p.parse_class_declaration(pos, ModifierFlags::AMBIENT),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword if p.peek_declaration_start().is_none() => {
                p.parse_variable_statement(pos)
            }
            _ if p.is_contextual(ContextualKeyword::Let) => p.parse_variable_statement(pos),
            _ if p.is_contextual(ContextualKeyword::Global) => {
                p.parse_global_augmentation(pos, ModifierFlags::AMBIENT)
            }
            _ => match p.try_parse_declaration()? {
                Some(statement) => Ok(statement),
                None => Err(p.error_here(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[])),
            },
        })?;
        let data = statement.data_mut();
        data.reset_start(pos);
        data.modifier_flags.insert(ModifierFlags::AMBIENT);
        Ok(statement)
    }

    /// `abstract class`, or the invalid `abstract interface`.
    fn parse_abstract_declaration(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        let abstract_span = self.token_span();
        self.expect_contextual(ContextualKeyword::Abstract)?;
        if self.is_contextual(ContextualKeyword::Interface) {
            return Err(self.error_at(
                abstract_span,
                &messages::ABSTRACT_MODIFIER_CAN_ONLY_APPEAR_ON_A_CLASS_METHOD_OR_PROPERTY_DECLARATION,
                &[],
            ));
        }
        self.parse_class_declaration(pos, ModifierFlags::ABSTRACT)
    }

    pub(crate) fn declare_name(&mut self, name: &Identifier<'a>, kind: BindingKind) -> PResult<()> {
        self.host.declare_binding(name.text, kind, name.data.range.to_span())
    }

    // ========================================================================
    // Modules and namespaces
    // ========================================================================

    /// `module "x" {}`, `module A {}` or `namespace A.B {}`.
    pub fn parse_module_or_namespace(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let is_namespace = self.is_contextual(ContextualKeyword::Namespace);
        self.next_token()?;
        if !is_namespace && self.at(SyntaxKind::StringLiteral) {
            return self.parse_ambient_external_module(pos, modifiers);
        }
        let flags = if is_namespace { NodeFlags::NAMESPACE } else { NodeFlags::NONE };
        let declaration = self.parse_namespace_rest(pos, modifiers, flags)?;
        Ok(Statement::ModuleDeclaration(declaration))
    }

    /// After `namespace`: a dotted name and a block. `A.B.C {}` nests as
    /// `A { B { C {} } }`.
    fn parse_namespace_rest(
        &mut self,
        pos: TextPos,
        modifiers: ModifierFlags,
        flags: NodeFlags,
    ) -> PResult<ModuleDeclaration<'a>> {
        let name = self.parse_identifier()?;
        if !flags.contains(NodeFlags::NESTED_NAMESPACE) {
            self.declare_name(&name, BindingKind::Namespace)?;
        }
        let body = if self.at(SyntaxKind::DotToken) {
            self.next_token()?;
            let inner_pos = self.token_pos();
            let inner_flags = NodeFlags::NESTED_NAMESPACE | (flags & NodeFlags::NAMESPACE);
            let inner = self.parse_namespace_rest(inner_pos, ModifierFlags::NONE, inner_flags)?;
            ModuleBody::Namespace(self.alloc(inner))
        } else {
            ModuleBody::Block(self.parse_module_block()?)
        };
        Ok(ModuleDeclaration {
            data: self.finish(SyntaxKind::ModuleDeclaration, pos).with_flags(flags).with_modifiers(modifiers),
            name: ModuleName::Identifier(name),
            body: Some(body),
        })
    }

    /// `module "name" { ... }`, or the body-less shorthand `module "name";`.
    pub fn parse_ambient_external_module(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let name = self.parse_string_literal()?;
        let body = if self.at(SyntaxKind::OpenBraceToken) {
            Some(ModuleBody::Block(self.with_ambient_context(|p| p.parse_module_block())?))
        } else {
            self.expect_semicolon()?;
            None
        };
        Ok(Statement::ModuleDeclaration(ModuleDeclaration {
            data: self.finish(SyntaxKind::ModuleDeclaration, pos).with_modifiers(modifiers),
            name: ModuleName::StringLiteral(name),
            body,
        }))
    }

    /// `global { ... }`
    fn parse_global_augmentation(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let name = self.parse_identifier()?;
        let body = self.with_ambient_context(|p| p.parse_module_block())?;
        Ok(Statement::ModuleDeclaration(ModuleDeclaration {
            data: self
                .finish(SyntaxKind::ModuleDeclaration, pos)
                .with_flags(NodeFlags::GLOBAL_AUGMENTATION)
                .with_modifiers(modifiers),
            name: ModuleName::Identifier(name),
            body: Some(ModuleBody::Block(body)),
        }))
    }

    fn parse_module_block(&mut self) -> PResult<ModuleBlock<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let statements = self.with_scope(ScopeKind::Module, |p| p.parse_statement_list(SyntaxKind::CloseBraceToken))?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(ModuleBlock { data: self.finish(SyntaxKind::ModuleBlock, pos), statements })
    }

    // ========================================================================
    // Type aliases, interfaces and enums
    // ========================================================================

    /// `type Name<T> = Type;`
    pub fn parse_type_alias_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        self.expect_contextual(ContextualKeyword::Type)?;
        let name = self.parse_identifier()?;
        self.declare_name(&name, BindingKind::TypeAlias)?;
        let type_parameters = self.parse_optional_type_parameters(true)?;
        self.expect(SyntaxKind::EqualsToken)?;
        let type_node = match self.parse_intrinsic_keyword()? {
            Some(intrinsic) => self.alloc(intrinsic),
            None => self.parse_type_annotation()?,
        };
        self.expect_semicolon()?;
        Ok(Statement::TypeAliasDeclaration(TypeAliasDeclaration {
            data: self.finish(SyntaxKind::TypeAliasDeclaration, pos).with_modifiers(modifiers),
            name,
            type_parameters,
            type_node,
        }))
    }

    /// `intrinsic` as the whole right-hand side of a type alias.
    fn parse_intrinsic_keyword(&mut self) -> PResult<Option<TypeNode<'a>>> {
        if !self.is_contextual(ContextualKeyword::Intrinsic) {
            return Ok(None);
        }
        if self.lookahead().kind == SyntaxKind::DotToken {
            return Ok(None);
        }
        let pos = self.token_pos();
        self.next_token()?;
        Ok(Some(TypeNode::KeywordType(KeywordTypeNode {
            data: self.finish(SyntaxKind::KeywordType, pos),
            keyword: KeywordTypeKind::Intrinsic,
        })))
    }

    /// `interface Name<T> extends A, B { members }`
    pub fn parse_interface_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        self.expect_contextual(ContextualKeyword::Interface)?;
        let name = self.parse_identifier()?;
        self.declare_name(&name, BindingKind::Interface)?;
        let type_parameters = self.parse_optional_type_parameters(true)?;
        let heritage_clauses = self.parse_heritage_clauses()?;
        if let Some(clause) = heritage_clauses.iter().find(|c| c.token == HeritageClauseKind::Implements) {
            return Err(self.error_at(clause.data.range.to_span(), &messages::_0_EXPECTED, &["{"]));
        }
        let members = self.parse_object_type_members()?;
        Ok(Statement::InterfaceDeclaration(InterfaceDeclaration {
            data: self.finish(SyntaxKind::InterfaceDeclaration, pos).with_modifiers(modifiers),
            name,
            type_parameters,
            heritage_clauses,
            members,
        }))
    }

    /// `enum Name { A, B = 1 }`; `const` has been consumed when `modifiers`
    /// carries it.
    pub fn parse_enum_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        self.expect_contextual(ContextualKeyword::Enum)?;
        if !self.at(SyntaxKind::Identifier) {
            // `const enum = 0` reads as a variable named `enum`, which is not allowed.
            if modifiers.contains(ModifierFlags::CONST) && self.at(SyntaxKind::EqualsToken) {
                return Err(self.error_at(
                    TextSpan::from_bounds(pos, self.host.prev_token_end()),
                    &messages::_0_IS_NOT_ALLOWED_AS_A_VARIABLE_DECLARATION_NAME,
                    &["enum"],
                ));
            }
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        let name = self.parse_identifier()?;
        let binding = if modifiers.contains(ModifierFlags::CONST) {
            BindingKind::ConstEnum
        } else {
            BindingKind::Enum
        };
        self.declare_name(&name, binding)?;
        let list = self.parse_bracketed_list(ListKind::EnumMembers, Bracket::Brace, false, |p| p.parse_enum_member())?;
        Ok(Statement::EnumDeclaration(EnumDeclaration {
            data: self.finish(SyntaxKind::EnumDeclaration, pos).with_modifiers(modifiers),
            name,
            members: self.alloc_list(list.elements),
        }))
    }

    fn parse_enum_member(&mut self) -> PResult<EnumMember<'a>> {
        let pos = self.token_pos();
        let name = self.parse_property_name()?;
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            let expression = self.allow_in(|p| p.parse_assignment_expression())?;
            Some(self.alloc(expression))
        } else {
            None
        };
        Ok(EnumMember { data: self.finish(SyntaxKind::EnumMember, pos), name, initializer })
    }

    pub(crate) fn parse_optional_type_parameters(
        &mut self,
        allow_variance: bool,
    ) -> PResult<Option<&'a [TypeParameterDeclaration<'a>]>> {
        if self.at(SyntaxKind::LessThanToken) {
            return Ok(Some(self.parse_type_parameters(allow_variance)?));
        }
        Ok(None)
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `function name<T>(params): R { body }`, or a body-less overload.
    pub(crate) fn parse_function_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::FunctionKeyword)?;
        let asterisk = self.eat(SyntaxKind::AsteriskToken)?;
        let name = if modifiers.contains(ModifierFlags::DEFAULT) && !self.at(SyntaxKind::Identifier) {
            None
        } else {
            let name = self.parse_identifier()?;
            self.declare_name(&name, BindingKind::Function)?;
            Some(name)
        };
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        self.check_parameter_properties(&signature, false);
        let body = self.parse_function_block_or_semicolon()?;
        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            data: self.finish(SyntaxKind::FunctionDeclaration, pos).with_modifiers(modifiers),
            name,
            asterisk,
            signature,
            body,
        }))
    }

    /// A body, or `;` for overloads and ambient declarations.
    pub(crate) fn parse_function_block_or_semicolon(&mut self) -> PResult<Option<&'a Block<'a>>> {
        if self.at(SyntaxKind::OpenBraceToken) {
            return Ok(Some(self.parse_function_body()?));
        }
        self.expect_semicolon()?;
        Ok(None)
    }

    /// `{ statements }` in a new function scope.
    pub(crate) fn parse_function_body(&mut self) -> PResult<&'a Block<'a>> {
        let pos = self.token_pos();
        let ambient = self.in_ambient_context();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let statements = self.with_flag(NodeFlags::FUNCTION_CONTEXT, true, |p| {
            p.with_scope(ScopeKind::Function, |p| p.parse_statement_list(SyntaxKind::CloseBraceToken))
        })?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        let block = Block { data: self.finish(SyntaxKind::Block, pos), statements };
        if ambient {
            self.recoverable(
                TextSpan::new(pos, 1),
                &messages::AN_IMPLEMENTATION_CANNOT_BE_DECLARED_IN_AMBIENT_CONTEXTS,
                &[],
            );
        }
        Ok(self.alloc(block))
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn parse_class_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        let require_name = !modifiers.contains(ModifierFlags::DEFAULT);
        let class = self.parse_class_like(pos, modifiers, require_name, SyntaxKind::ClassDeclaration)?;
        Ok(Statement::ClassDeclaration(class))
    }

    /// Shared by declarations and class expressions.
    pub(crate) fn parse_class_like(
        &mut self,
        pos: TextPos,
        modifiers: ModifierFlags,
        require_name: bool,
        kind: SyntaxKind,
    ) -> PResult<ClassDeclaration<'a>> {
        self.expect(SyntaxKind::ClassKeyword)?;
        let name = if self.at(SyntaxKind::Identifier) && !self.is_contextual(ContextualKeyword::Implements) {
            let name = self.parse_identifier()?;
            if kind == SyntaxKind::ClassDeclaration {
                self.declare_name(&name, BindingKind::Class)?;
            }
            Some(name)
        } else if require_name {
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        } else {
            None
        };
        let type_parameters = self.parse_optional_type_parameters(true)?;
        let heritage_clauses = self.parse_heritage_clauses()?;
        let members = self.with_flag(NodeFlags::CLASS_CONTEXT, true, |p| p.parse_class_members())?;
        Ok(ClassDeclaration {
            data: self.finish(kind, pos).with_modifiers(modifiers),
            name,
            type_parameters,
            heritage_clauses,
            members,
        })
    }

    fn parse_class_members(&mut self) -> PResult<&'a [ClassElement<'a>]> {
        self.expect(SyntaxKind::OpenBraceToken)?;
        let mut members = Vec::new();
        let mut private_names = PrivateNames::default();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at(SyntaxKind::EndOfFileToken) {
            let member = self.parse_class_element()?;
            private_names.check(self, &member);
            members.push(member);
        }
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(self.alloc_list(members))
    }

    pub fn parse_class_element(&mut self) -> PResult<ClassElement<'a>> {
        let pos = self.token_pos();
        if self.eat(SyntaxKind::SemicolonToken)? {
            return Ok(ClassElement::Semicolon(self.finish(SyntaxKind::SemicolonClassElement, pos)));
        }
        if self.is_static_block_start() {
            return self.parse_static_block(pos);
        }
        let modifiers = self.parse_modifiers(&ModifierRules::CLASS_MEMBER, Some(Self::is_static_block_start))?;
        if self.is_static_block_start() {
            return Err(self.error_at(
                modifiers.first().map(|(_, span)| span).unwrap_or_else(|| self.token_span()),
                &messages::MODIFIERS_CANNOT_APPEAR_HERE,
                &[],
            ));
        }
        if self.at(SyntaxKind::OpenBracketToken) && self.look_ahead(|p| p.is_index_signature()) {
            self.check_modifiers(&modifiers, &ModifierRules::INDEX_SIGNATURE)?;
            let signature = self.parse_index_signature(pos, &modifiers)?;
            return Ok(ClassElement::IndexSignature(signature));
        }
        if let Some(kind) = self.accessor_keyword() {
            return self.parse_class_accessor(pos, modifiers, kind);
        }
        if self.is_constructor_name() {
            return self.parse_constructor(pos, modifiers);
        }

        let asterisk = self.eat(SyntaxKind::AsteriskToken)?;
        let name = self.parse_property_name()?;
        let question = self.eat(SyntaxKind::QuestionToken)?;
        if asterisk || self.at(SyntaxKind::OpenParenToken) || self.at(SyntaxKind::LessThanToken) {
            return self.parse_class_method(pos, modifiers, name, question, asterisk);
        }
        self.parse_property_declaration(pos, modifiers, name, question)
    }

    fn is_static_block_start(&mut self) -> bool {
        self.is_contextual(ContextualKeyword::Static) && self.next_token_is(|t| t.kind == SyntaxKind::OpenBraceToken)
    }

    fn parse_static_block(&mut self, pos: TextPos) -> PResult<ClassElement<'a>> {
        self.next_token()?;
        let body = self.parse_function_body()?;
        Ok(ClassElement::StaticBlock(ClassStaticBlockDeclaration {
            data: self.finish(SyntaxKind::ClassStaticBlockDeclaration, pos),
            body,
        }))
    }

    /// `get`/`set` followed by a name on the same line.
    pub(crate) fn accessor_keyword(&mut self) -> Option<SyntaxKind> {
        let kind = match self.token().contextual {
            Some(ContextualKeyword::Get) => SyntaxKind::GetAccessor,
            Some(ContextualKeyword::Set) => SyntaxKind::SetAccessor,
            _ => return None,
        };
        self.next_token_is(|t| {
            !t.has_preceding_line_break()
                && (t.kind.is_literal_property_name_start() || t.kind == SyntaxKind::OpenBracketToken)
        })
        .then_some(kind)
    }

    fn is_constructor_name(&mut self) -> bool {
        let token = self.token();
        let named = token.is_contextual(ContextualKeyword::Constructor)
            || (token.kind == SyntaxKind::StringLiteral && token.value == "constructor");
        named && self.next_token_is(|t| matches!(t.kind, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
    }

    fn parse_constructor(&mut self, pos: TextPos, modifiers: ModifierSet) -> PResult<ClassElement<'a>> {
        let name = self.parse_property_name()?;
        if self.at(SyntaxKind::LessThanToken) {
            let type_parameters_pos = self.token_pos();
            self.parse_type_parameters(false)?;
            return Err(self.error_at(
                TextSpan::from_bounds(type_parameters_pos, self.host.prev_token_end()),
                &messages::TYPE_PARAMETERS_CANNOT_APPEAR_ON_A_CONSTRUCTOR_DECLARATION,
                &[],
            ));
        }
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        let body = self.parse_function_block_or_semicolon()?;
        self.check_parameter_properties(&signature, body.is_some());
        Ok(ClassElement::Constructor(MethodDeclaration {
            data: self.finish(SyntaxKind::Constructor, pos).with_modifiers(modifiers.flags),
            name,
            question: false,
            asterisk: false,
            signature,
            body,
        }))
    }

    fn parse_class_accessor(&mut self, pos: TextPos, modifiers: ModifierSet, kind: SyntaxKind) -> PResult<ClassElement<'a>> {
        self.check_not_readonly(&modifiers)?;
        self.next_token()?;
        let name = self.parse_property_name()?;
        if self.at(SyntaxKind::LessThanToken) {
            return Err(self.error_here(&messages::AN_ACCESSOR_CANNOT_HAVE_TYPE_PARAMETERS, &[]));
        }
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        self.check_parameter_properties(&signature, false);
        let body = self.parse_function_block_or_semicolon()?;
        self.check_abstract_body(&modifiers, &name, body);
        let method = MethodDeclaration {
            data: self.finish(kind, pos).with_modifiers(modifiers.flags),
            name,
            question: false,
            asterisk: false,
            signature,
            body,
        };
        Ok(if kind == SyntaxKind::GetAccessor {
            ClassElement::GetAccessor(method)
        } else {
            ClassElement::SetAccessor(method)
        })
    }

    fn parse_class_method(
        &mut self,
        pos: TextPos,
        modifiers: ModifierSet,
        name: PropertyName<'a>,
        question: bool,
        asterisk: bool,
    ) -> PResult<ClassElement<'a>> {
        self.check_not_readonly(&modifiers)?;
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        self.check_parameter_properties(&signature, false);
        let body = self.parse_function_block_or_semicolon()?;
        self.check_abstract_body(&modifiers, &name, body);
        Ok(ClassElement::MethodDeclaration(MethodDeclaration {
            data: self.finish(SyntaxKind::MethodDeclaration, pos).with_modifiers(modifiers.flags),
            name,
            question,
            asterisk,
            signature,
            body,
        }))
    }

    fn parse_property_declaration(
        &mut self,
        pos: TextPos,
        modifiers: ModifierSet,
        name: PropertyName<'a>,
        question: bool,
    ) -> PResult<ClassElement<'a>> {
        let exclamation = !question && !self.has_preceding_line_break() && self.eat(SyntaxKind::ExclamationToken)?;
        let type_annotation = if self.eat(SyntaxKind::ColonToken)? {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            let expression = self.allow_in(|p| p.parse_assignment_expression())?;
            Some(self.alloc(expression))
        } else {
            None
        };
        self.expect_semicolon()?;
        Ok(ClassElement::PropertyDeclaration(PropertyDeclaration {
            data: self.finish(SyntaxKind::PropertyDeclaration, pos).with_modifiers(modifiers.flags),
            name,
            question,
            exclamation,
            type_annotation,
            initializer,
        }))
    }

    fn check_not_readonly(&self, modifiers: &ModifierSet) -> PResult<()> {
        match modifiers.span_of(Modifier::Readonly) {
            Some(span) => Err(self.error_at(
                span,
                &messages::READONLY_MODIFIER_CAN_ONLY_APPEAR_ON_A_PROPERTY_DECLARATION_OR_INDEX_SIGNATURE,
                &[],
            )),
            None => Ok(()),
        }
    }

    fn check_abstract_body(&mut self, modifiers: &ModifierSet, name: &PropertyName<'a>, body: Option<&'a Block<'a>>) {
        if let (true, Some(body)) = (modifiers.flags.contains(ModifierFlags::ABSTRACT), body) {
            let text = name.text().unwrap_or("[computed]");
            self.recoverable(
                body.data.range.to_span(),
                &messages::METHOD_0_CANNOT_HAVE_AN_IMPLEMENTATION_BECAUSE_IT_IS_MARKED_ABSTRACT,
                &[text],
            );
        }
    }

    // ========================================================================
    // Index signatures
    // ========================================================================

    /// At `[`: `[name:` or `[name,` or `[...`.
    pub(crate) fn is_index_signature(&mut self) -> PResult<bool> {
        self.next_token()?;
        if self.at(SyntaxKind::DotDotDotToken) {
            return Ok(true);
        }
        if !self.at(SyntaxKind::Identifier) {
            return Ok(false);
        }
        self.next_token()?;
        Ok(matches!(self.kind(), SyntaxKind::ColonToken | SyntaxKind::CommaToken))
    }

    pub(crate) fn parse_index_signature(&mut self, pos: TextPos, modifiers: &ModifierSet) -> PResult<IndexSignatureNode<'a>> {
        let list = self.parse_bracketed_list(ListKind::IndexSignatureParameters, Bracket::Square, false, |p| {
            p.parse_parameter()
        })?;
        if list.elements.is_empty() {
            return Err(self.error_at(list.span(), &messages::_0_LIST_CANNOT_BE_EMPTY, &["Index signature parameter"]));
        }
        if !self.at(SyntaxKind::ColonToken) {
            return Err(self.error_at(list.span(), &messages::AN_INDEX_SIGNATURE_MUST_HAVE_A_TYPE_ANNOTATION, &[]));
        }
        self.next_token()?;
        let type_annotation = Some(self.parse_type_annotation()?);
        self.parse_type_member_separator()?;
        Ok(IndexSignatureNode {
            data: self.finish(SyntaxKind::IndexSignature, pos).with_modifiers(modifiers.flags),
            parameters: self.alloc_list(list.elements),
            type_annotation,
        })
    }

    // ========================================================================
    // Type members
    // ========================================================================

    /// One member of an interface body or type literal.
    pub fn parse_type_member(&mut self) -> PResult<TypeElement<'a>> {
        let pos = self.token_pos();
        if self.at(SyntaxKind::OpenParenToken) || self.at(SyntaxKind::LessThanToken) {
            let signature = self.fill_signature(SignatureReturn::Colon)?;
            self.check_parameter_properties(&signature, false);
            self.parse_type_member_separator()?;
            return Ok(TypeElement::CallSignature(CallSignatureNode {
                data: self.finish(SyntaxKind::CallSignature, pos),
                signature,
            }));
        }
        if self.at(SyntaxKind::NewKeyword)
            && self.next_token_is(|t| matches!(t.kind, SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken))
        {
            self.next_token()?;
            let signature = self.fill_signature(SignatureReturn::Colon)?;
            self.check_parameter_properties(&signature, false);
            self.parse_type_member_separator()?;
            return Ok(TypeElement::ConstructSignature(CallSignatureNode {
                data: self.finish(SyntaxKind::ConstructSignature, pos),
                signature,
            }));
        }

        let modifiers = self.parse_modifiers(&ModifierRules::TYPE_MEMBER, None)?;
        if self.at(SyntaxKind::OpenBracketToken) && self.look_ahead(|p| p.is_index_signature()) {
            return Ok(TypeElement::IndexSignature(self.parse_index_signature(pos, &modifiers)?));
        }
        if let Some(kind) = self.accessor_keyword() {
            self.check_not_readonly(&modifiers)?;
            self.next_token()?;
            let name = self.parse_property_name()?;
            let signature = self.fill_signature(SignatureReturn::Colon)?;
            self.parse_type_member_separator()?;
            let node = MethodSignatureNode {
                data: self.finish(
                    if kind == SyntaxKind::GetAccessor {
                        SyntaxKind::GetAccessorSignature
                    } else {
                        SyntaxKind::SetAccessorSignature
                    },
                    pos,
                ),
                name,
                question: false,
                signature,
            };
            return Ok(if kind == SyntaxKind::GetAccessor {
                TypeElement::GetAccessorSignature(node)
            } else {
                TypeElement::SetAccessorSignature(node)
            });
        }

        let name = self.parse_property_name()?;
        let question = self.eat(SyntaxKind::QuestionToken)?;
        if self.at(SyntaxKind::OpenParenToken) || self.at(SyntaxKind::LessThanToken) {
            self.check_not_readonly(&modifiers)?;
            let signature = self.fill_signature(SignatureReturn::Colon)?;
            self.check_parameter_properties(&signature, false);
            self.parse_type_member_separator()?;
            return Ok(TypeElement::MethodSignature(MethodSignatureNode {
                data: self.finish(SyntaxKind::MethodSignature, pos),
                name,
                question,
                signature,
            }));
        }
        let type_annotation = if self.eat(SyntaxKind::ColonToken)? {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        self.parse_type_member_separator()?;
        Ok(TypeElement::PropertySignature(PropertySignatureNode {
            data: self.finish(SyntaxKind::PropertySignature, pos).with_modifiers(modifiers.flags),
            name,
            question,
            type_annotation,
        }))
    }

    /// `,` or `;`, or nothing before `}` or a line break.
    fn parse_type_member_separator(&mut self) -> PResult<()> {
        if self.eat(SyntaxKind::CommaToken)? {
            return Ok(());
        }
        self.expect_semicolon()
    }
}

/// Whether `next` lets the word for `start` begin a declaration.
fn can_follow_declaration_word(start: DeclarationStart, next: &Token) -> bool {
    if start == DeclarationStart::Global {
        return next.kind == SyntaxKind::OpenBraceToken;
    }
    if next.has_preceding_line_break() {
        return false;
    }
    match start {
        DeclarationStart::Declare => {
            matches!(
                next.kind,
                SyntaxKind::FunctionKeyword | SyntaxKind::ClassKeyword | SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword
            ) || matches!(
                next.contextual,
                Some(
                    ContextualKeyword::Let
                        | ContextualKeyword::Global
                        | ContextualKeyword::Module
                        | ContextualKeyword::Namespace
                        | ContextualKeyword::Interface
                        | ContextualKeyword::Type
                        | ContextualKeyword::Enum
                        | ContextualKeyword::Abstract
                )
            )
        }
        DeclarationStart::Abstract => {
            next.kind == SyntaxKind::ClassKeyword || next.is_contextual(ContextualKeyword::Interface)
        }
        DeclarationStart::Module => matches!(next.kind, SyntaxKind::StringLiteral | SyntaxKind::Identifier),
        _ => next.kind == SyntaxKind::Identifier,
    }
}

/// Private member names seen in one class body. A name may be declared
/// once, or as one getter plus one setter.
#[derive(Default)]
struct PrivateNames<'a> {
    seen: FxHashMap<&'a str, (bool, bool, bool)>,
}

impl<'a> PrivateNames<'a> {
    fn check<H: HostGrammar>(&mut self, parser: &mut Parser<'a, H>, member: &ClassElement<'a>) {
        let Some(name) = member.name().filter(|name| name.is_private()) else {
            return;
        };
        let Some(text) = name.text() else {
            return;
        };
        let (getter, setter) = match member {
            ClassElement::GetAccessor(_) => (true, false),
            ClassElement::SetAccessor(_) => (false, true),
            _ => (false, false),
        };
        let entry = self.seen.entry(text).or_insert((false, false, false));
        let (has_getter, has_setter, has_other) = *entry;
        let duplicate = has_other
            || (!getter && !setter && (has_getter || has_setter))
            || (getter && has_getter)
            || (setter && has_setter);
        *entry = (has_getter || getter, has_setter || setter, has_other || (!getter && !setter));
        if duplicate {
            parser.recoverable(name.range().to_span(), &messages::DUPLICATE_IDENTIFIER_0, &[text]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn peek(text: &str) -> Option<DeclarationStart> {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", text);
        parser.next_token().unwrap();
        parser.peek_declaration_start()
    }

    #[test]
    fn test_peek_requires_following_name() {
        assert_eq!(peek("type T = 1"), Some(DeclarationStart::TypeAlias));
        assert_eq!(peek("type(x)"), None);
        assert_eq!(peek("interface I {}"), Some(DeclarationStart::Interface));
        assert_eq!(peek("interface()"), None);
        assert_eq!(peek("namespace\nA {}"), None);
        assert_eq!(peek("module \"x\" {}"), Some(DeclarationStart::Module));
        assert_eq!(peek("declare const x: number"), Some(DeclarationStart::Declare));
        assert_eq!(peek("declare = 1"), None);
        assert_eq!(peek("const enum E {}"), Some(DeclarationStart::ConstEnum));
        assert_eq!(peek("const e = 1"), None);
        assert_eq!(peek("global {}"), Some(DeclarationStart::Global));
    }

    #[test]
    fn test_peek_consumes_nothing() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "abstract class C {}");
        parser.next_token().unwrap();
        assert_eq!(parser.peek_declaration_start(), Some(DeclarationStart::Abstract));
        assert!(parser.is_contextual(ContextualKeyword::Abstract));
        assert_eq!(parser.token_pos(), 0);
    }
}
