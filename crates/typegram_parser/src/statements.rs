//! Statements, variable declarations, binding patterns, imports and exports.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::{ModifierFlags, NodeFlags};
use typegram_core::text::TextPos;
use typegram_diagnostics::{messages, PResult};

use crate::host::HostGrammar;
use crate::lists::{Bracket, ListKind};
use crate::parser::Parser;
use crate::scope::{BindingKind, ScopeKind};

impl<'a, H: HostGrammar> Parser<'a, H> {
    /// Statements up to (not including) `terminator`.
    pub fn parse_statement_list(&mut self, terminator: SyntaxKind) -> PResult<&'a [Statement<'a>]> {
        let mut statements = Vec::new();
        while !self.at(terminator) && !self.at(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement()?);
        }
        Ok(self.alloc_list(statements))
    }

    pub fn parse_statement(&mut self) -> PResult<Statement<'a>> {
        self.guarded(|p| {
            let pos = p.token_pos();
            match p.kind() {
                SyntaxKind::SemicolonToken => {
                    p.next_token()?;
                    Ok(Statement::EmptyStatement(p.finish(SyntaxKind::EmptyStatement, pos)))
                }
                SyntaxKind::OpenBraceToken => Ok(Statement::Block(p.parse_block()?)),
                SyntaxKind::ConstKeyword => match p.try_parse_declaration()? {
                    Some(statement) => Ok(statement),
                    None => p.parse_variable_statement(pos),
                },
                SyntaxKind::VarKeyword => p.parse_variable_statement(pos),
                SyntaxKind::FunctionKeyword => p.parse_function_declaration(pos, ModifierFlags::NONE),
                SyntaxKind::ClassKeyword => p.parse_class_declaration(pos, ModifierFlags::NONE),
                SyntaxKind::IfKeyword => p.parse_if_statement(),
                SyntaxKind::ReturnKeyword => p.parse_return_statement(),
                SyntaxKind::ThrowKeyword => p.parse_throw_statement(),
                SyntaxKind::ImportKeyword
                    if !p.next_token_is(|t| matches!(t.kind, SyntaxKind::OpenParenToken | SyntaxKind::DotToken)) =>
                {
                    p.parse_import_declaration(pos, ModifierFlags::NONE)
                }
                SyntaxKind::ExportKeyword => p.parse_export(),
                SyntaxKind::Identifier if p.is_let_declaration() => p.parse_variable_statement(pos),
                SyntaxKind::Identifier => match p.try_parse_declaration()? {
                    Some(statement) => Ok(statement),
                    None => p.parse_expression_statement(),
                },
                _ => p.parse_expression_statement(),
            }
        })
    }

    pub(crate) fn parse_block(&mut self) -> PResult<Block<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken)?;
        let statements = self.with_scope(ScopeKind::Block, |p| p.parse_statement_list(SyntaxKind::CloseBraceToken))?;
        self.expect(SyntaxKind::CloseBraceToken)?;
        Ok(Block { data: self.finish(SyntaxKind::Block, pos), statements })
    }

    fn parse_expression_statement(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        let expression = self.allow_in(|p| p.parse_expression())?;
        self.expect_semicolon()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish(SyntaxKind::ExpressionStatement, pos),
            expression: self.alloc(expression),
        }))
    }

    fn parse_if_statement(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::IfKeyword)?;
        self.expect(SyntaxKind::OpenParenToken)?;
        let expression = self.allow_in(|p| p.parse_expression())?;
        self.expect(SyntaxKind::CloseParenToken)?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.eat(SyntaxKind::ElseKeyword)? {
            let statement = self.parse_statement()?;
            Some(self.alloc(statement))
        } else {
            None
        };
        Ok(Statement::IfStatement(IfStatement {
            data: self.finish(SyntaxKind::IfStatement, pos),
            expression: self.alloc(expression),
            then_statement: self.alloc(then_statement),
            else_statement,
        }))
    }

    fn parse_return_statement(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        if !self.in_function_context() && !self.options.allow_return_outside_function {
            return Err(self.error_here(&messages::A_RETURN_STATEMENT_CAN_ONLY_BE_USED_WITHIN_A_FUNCTION_BODY, &[]));
        }
        self.expect(SyntaxKind::ReturnKeyword)?;
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            let expression = self.allow_in(|p| p.parse_expression())?;
            Some(self.alloc(expression))
        };
        self.expect_semicolon()?;
        Ok(Statement::ReturnStatement(ReturnStatement { data: self.finish(SyntaxKind::ReturnStatement, pos), expression }))
    }

    fn parse_throw_statement(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ThrowKeyword)?;
        if self.has_preceding_line_break() {
            return Err(self.error_here(&messages::EXPRESSION_EXPECTED, &[]));
        }
        let expression = self.allow_in(|p| p.parse_expression())?;
        self.expect_semicolon()?;
        Ok(Statement::ThrowStatement(ExpressionStatement {
            data: self.finish(SyntaxKind::ThrowStatement, pos),
            expression: self.alloc(expression),
        }))
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// `let` starts a declaration only before a name or a binding pattern.
    fn is_let_declaration(&mut self) -> bool {
        self.is_contextual(ContextualKeyword::Let)
            && self.next_token_is(|t| {
                matches!(t.kind, SyntaxKind::Identifier | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken)
            })
    }

    /// At `var`, `let` or `const`.
    pub(crate) fn parse_variable_statement(&mut self, pos: TextPos) -> PResult<Statement<'a>> {
        let list_pos = self.token_pos();
        let flags = match self.kind() {
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            SyntaxKind::VarKeyword => NodeFlags::NONE,
            _ if self.is_contextual(ContextualKeyword::Let) => NodeFlags::LET,
            _ => return Err(self.unexpected()),
        };
        self.next_token()?;
        let binding = if flags.intersects(NodeFlags::BLOCK_SCOPED) {
            BindingKind::Lexical
        } else {
            BindingKind::Var
        };
        let list = self.parse_delimited_list(ListKind::VariableDeclarations, |p| {
            p.parse_variable_declaration(flags, binding)
        })?;
        if list.elements.is_empty() {
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        let declaration_list = VariableDeclarationList {
            data: self.finish(SyntaxKind::VariableDeclarationList, list_pos).with_flags(flags),
            declarations: self.alloc_list(list.elements),
        };
        self.expect_semicolon()?;
        Ok(Statement::VariableStatement(VariableStatement {
            data: self.finish(SyntaxKind::VariableStatement, pos),
            declaration_list,
        }))
    }

    fn parse_variable_declaration(&mut self, flags: NodeFlags, binding: BindingKind) -> PResult<VariableDeclaration<'a>> {
        let pos = self.token_pos();
        if flags.intersects(NodeFlags::BLOCK_SCOPED) && self.is_contextual(ContextualKeyword::Let) {
            return Err(self.error_here(&messages::_0_IS_NOT_ALLOWED_AS_A_VARIABLE_DECLARATION_NAME, &["let"]));
        }
        let name = self.parse_binding_name()?;
        self.declare_binding_name(&name, binding)?;
        let exclamation = matches!(name, BindingName::Identifier(_))
            && !self.has_preceding_line_break()
            && self.eat(SyntaxKind::ExclamationToken)?;
        let type_annotation = if self.eat(SyntaxKind::ColonToken)? {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            let expression = self.parse_assignment_expression()?;
            Some(self.alloc(expression))
        } else {
            None
        };
        Ok(VariableDeclaration {
            data: self.finish(SyntaxKind::VariableDeclaration, pos),
            name,
            exclamation,
            type_annotation,
            initializer,
        })
    }

    /// Declare every identifier a binding name introduces.
    fn declare_binding_name(&mut self, name: &BindingName<'a>, kind: BindingKind) -> PResult<()> {
        match name {
            BindingName::Identifier(id) => self.declare_name(id, kind),
            BindingName::ObjectPattern(pattern) => {
                for element in pattern.elements {
                    self.declare_binding_name(&element.name, kind)?;
                }
                Ok(())
            }
            BindingName::ArrayPattern(pattern) => {
                for element in pattern.elements {
                    if let ArrayBindingElement::Binding(element) = element {
                        self.declare_binding_name(&element.name, kind)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// An identifier or an object or array destructuring pattern.
    pub fn parse_binding_name(&mut self) -> PResult<BindingName<'a>> {
        self.guarded(|p| p.parse_binding_name_inner())
    }

    fn parse_binding_name_inner(&mut self) -> PResult<BindingName<'a>> {
        match self.kind() {
            SyntaxKind::OpenBraceToken => {
                let pos = self.token_pos();
                let list = self.parse_bracketed_list(ListKind::ObjectBindingElements, Bracket::Brace, false, |p| {
                    p.parse_object_binding_element()
                })?;
                let pattern = ObjectBindingPattern {
                    data: self.finish(SyntaxKind::ObjectBindingPattern, pos),
                    elements: self.alloc_list(list.elements),
                };
                Ok(BindingName::ObjectPattern(self.alloc(pattern)))
            }
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                let list = self.parse_bracketed_list(ListKind::ArrayBindingElements, Bracket::Square, false, |p| {
                    p.parse_array_binding_element()
                })?;
                let pattern = ArrayBindingPattern {
                    data: self.finish(SyntaxKind::ArrayBindingPattern, pos),
                    elements: self.alloc_list(list.elements),
                };
                Ok(BindingName::ArrayPattern(self.alloc(pattern)))
            }
            _ => Ok(BindingName::Identifier(self.parse_identifier()?)),
        }
    }

    /// `a`, `a = 1`, `key: name`, `...rest`
    fn parse_object_binding_element(&mut self) -> PResult<BindingElement<'a>> {
        let pos = self.token_pos();
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
        let shorthand = dot_dot_dot
            || (self.at(SyntaxKind::Identifier) && !self.next_token_is(|t| t.kind == SyntaxKind::ColonToken));
        let (property_name, name) = if shorthand {
            (None, BindingName::Identifier(self.parse_identifier()?))
        } else {
            let property_name = self.parse_property_name()?;
            self.expect(SyntaxKind::ColonToken)?;
            (Some(property_name), self.parse_binding_name()?)
        };
        let initializer = self.parse_binding_initializer()?;
        Ok(BindingElement {
            data: self.finish(SyntaxKind::BindingElement, pos),
            dot_dot_dot,
            property_name,
            name,
            initializer,
        })
    }

    fn parse_array_binding_element(&mut self) -> PResult<ArrayBindingElement<'a>> {
        let pos = self.token_pos();
        if self.at(SyntaxKind::CommaToken) {
            return Ok(ArrayBindingElement::Omitted(self.finish(SyntaxKind::OmittedExpression, pos)));
        }
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
        let name = self.parse_binding_name()?;
        let initializer = self.parse_binding_initializer()?;
        Ok(ArrayBindingElement::Binding(BindingElement {
            data: self.finish(SyntaxKind::BindingElement, pos),
            dot_dot_dot,
            property_name: None,
            name,
            initializer,
        }))
    }

    fn parse_binding_initializer(&mut self) -> PResult<Option<&'a Expression<'a>>> {
        if !self.eat(SyntaxKind::EqualsToken)? {
            return Ok(None);
        }
        let expression = self.allow_in(|p| p.parse_assignment_expression())?;
        Ok(Some(self.alloc(expression)))
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// `import "m"`, `import d, { a as b, type c } from "m"`,
    /// `import * as ns from "m"`, `import x = require("m")`, `import x = A.B`.
    pub(crate) fn parse_import_declaration(&mut self, pos: TextPos, modifiers: ModifierFlags) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::ImportKeyword)?;
        if self.at(SyntaxKind::StringLiteral) {
            let module_specifier = self.parse_string_literal()?;
            self.expect_semicolon()?;
            return Ok(Statement::ImportDeclaration(ImportDeclaration {
                data: self.finish(SyntaxKind::ImportDeclaration, pos).with_modifiers(modifiers),
                import_clause: None,
                module_specifier,
            }));
        }

        let clause_pos = self.token_pos();
        let is_type_only = self.is_contextual(ContextualKeyword::Type)
            && self.next_token_is(|t| {
                matches!(t.kind, SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)
                    || (t.kind == SyntaxKind::Identifier && !t.is_contextual(ContextualKeyword::From))
            });
        if is_type_only {
            self.next_token()?;
        }

        let name = if self.at(SyntaxKind::Identifier) {
            let name = self.parse_identifier()?;
            if self.at(SyntaxKind::EqualsToken) {
                return self.parse_import_equals_rest(pos, modifiers, is_type_only, name);
            }
            self.declare_name(&name, BindingKind::Import)?;
            Some(name)
        } else {
            None
        };
        let named_bindings = if name.is_none() || self.eat(SyntaxKind::CommaToken)? {
            Some(self.parse_named_import_bindings()?)
        } else {
            None
        };
        let import_clause = ImportClause {
            data: self.finish(SyntaxKind::ImportClause, clause_pos),
            is_type_only,
            name,
            named_bindings,
        };
        self.expect_contextual(ContextualKeyword::From)?;
        let module_specifier = self.parse_string_literal()?;
        self.expect_semicolon()?;
        Ok(Statement::ImportDeclaration(ImportDeclaration {
            data: self.finish(SyntaxKind::ImportDeclaration, pos).with_modifiers(modifiers),
            import_clause: Some(import_clause),
            module_specifier,
        }))
    }

    fn parse_named_import_bindings(&mut self) -> PResult<NamedImportBindings<'a>> {
        let pos = self.token_pos();
        if self.eat(SyntaxKind::AsteriskToken)? {
            self.expect_contextual(ContextualKeyword::As)?;
            let name = self.parse_identifier()?;
            self.declare_name(&name, BindingKind::Import)?;
            return Ok(NamedImportBindings::NamespaceImport(NamespaceImport {
                data: self.finish(SyntaxKind::NamespaceImport, pos),
                name,
            }));
        }
        let list = self.parse_bracketed_list(ListKind::ImportOrExportSpecifiers, Bracket::Brace, false, |p| {
            p.parse_specifier(SyntaxKind::ImportSpecifier)
        })?;
        for specifier in &list.elements {
            self.declare_name(&specifier.name, BindingKind::Import)?;
        }
        Ok(NamedImportBindings::NamedImports(NamedImports {
            data: self.finish(SyntaxKind::NamedImports, pos),
            elements: self.alloc_list(list.elements),
        }))
    }

    /// `name`, `name as alias` or `type name`, for imports and exports.
    fn parse_specifier(&mut self, kind: SyntaxKind) -> PResult<ImportSpecifier<'a>> {
        let pos = self.token_pos();
        let is_type_only = self.is_contextual(ContextualKeyword::Type)
            && self.next_token_is(|t| t.kind.is_identifier_or_keyword() && !t.is_contextual(ContextualKeyword::As));
        if is_type_only {
            self.next_token()?;
        }
        let first = self.parse_identifier_name()?;
        let (property_name, name) = if self.eat_if_contextual(ContextualKeyword::As)? {
            let alias = self.parse_identifier_name()?;
            (Some(first), alias)
        } else {
            (None, first)
        };
        Ok(ImportSpecifier { data: self.finish(kind, pos), is_type_only, property_name, name })
    }

    fn parse_import_equals_rest(
        &mut self,
        pos: TextPos,
        modifiers: ModifierFlags,
        is_type_only: bool,
        name: Identifier<'a>,
    ) -> PResult<Statement<'a>> {
        self.expect(SyntaxKind::EqualsToken)?;
        self.declare_name(&name, BindingKind::Import)?;
        let module_reference = if self.is_contextual(ContextualKeyword::Require)
            && self.next_token_is(|t| t.kind == SyntaxKind::OpenParenToken)
        {
            let reference_pos = self.token_pos();
            self.next_token()?;
            self.expect(SyntaxKind::OpenParenToken)?;
            let expression = self.parse_string_literal()?;
            self.expect(SyntaxKind::CloseParenToken)?;
            ModuleReference::External(ExternalModuleReference {
                data: self.finish(SyntaxKind::ExternalModuleReference, reference_pos),
                expression,
            })
        } else {
            ModuleReference::EntityName(self.parse_entity_name(false)?)
        };
        self.expect_semicolon()?;
        Ok(Statement::ImportEqualsDeclaration(ImportEqualsDeclaration {
            data: self.finish(SyntaxKind::ImportEqualsDeclaration, pos).with_modifiers(modifiers),
            is_type_only,
            name,
            module_reference,
        }))
    }

    // ========================================================================
    // Exports
    // ========================================================================

    fn parse_export(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::ExportKeyword)?;
        match self.kind() {
            SyntaxKind::EqualsToken => {
                self.next_token()?;
                self.parse_export_assignment_rest(pos, true)
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token()?;
                self.parse_export_default(pos)
            }
            SyntaxKind::ImportKeyword => self.parse_import_declaration(pos, ModifierFlags::EXPORT),
            SyntaxKind::AsteriskToken | SyntaxKind::OpenBraceToken => self.parse_export_declaration(pos, false),
            _ if self.is_contextual(ContextualKeyword::Type)
                && self.next_token_is(|t| matches!(t.kind, SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken)) =>
            {
                self.next_token()?;
                self.parse_export_declaration(pos, true)
            }
            _ if self.is_contextual(ContextualKeyword::As)
                && self.next_token_is(|t| t.is_contextual(ContextualKeyword::Namespace)) =>
            {
                self.next_token()?;
                self.next_token()?;
                let name = self.parse_identifier()?;
                self.expect_semicolon()?;
                Ok(Statement::NamespaceExportDeclaration(NamespaceExportDeclaration {
                    data: self.finish(SyntaxKind::NamespaceExportDeclaration, pos),
                    name,
                }))
            }
            _ => {
                let mut statement = self.parse_exported_declaration()?;
                let data = statement.data_mut();
                data.reset_start(pos);
                data.modifier_flags.insert(ModifierFlags::EXPORT);
                Ok(statement)
            }
        }
    }

    /// The declaration after `export`.
    fn parse_exported_declaration(&mut self) -> PResult<Statement<'a>> {
        let pos = self.token_pos();
        match self.kind() {
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, ModifierFlags::EXPORT),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, ModifierFlags::EXPORT),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos),
            SyntaxKind::ConstKeyword => match self.try_parse_declaration()? {
                Some(statement) => Ok(statement),
                None => self.parse_variable_statement(pos),
            },
            SyntaxKind::Identifier if self.is_let_declaration() => self.parse_variable_statement(pos),
            _ => match self.try_parse_declaration()? {
                Some(statement) => Ok(statement),
                None => Err(self.error_here(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[])),
            },
        }
    }

    fn parse_export_default(&mut self, pos: TextPos) -> PResult<Statement<'a>> {
        match self.kind() {
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, ModifierFlags::EXPORT_DEFAULT),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(pos, ModifierFlags::EXPORT_DEFAULT),
            _ if self.is_contextual(ContextualKeyword::Abstract)
                && self.next_token_is(|t| t.kind == SyntaxKind::ClassKeyword && !t.has_preceding_line_break()) =>
            {
                self.next_token()?;
                self.parse_class_declaration(pos, ModifierFlags::EXPORT_DEFAULT | ModifierFlags::ABSTRACT)
            }
            _ if self.is_contextual(ContextualKeyword::Interface)
                && self.next_token_is(|t| t.kind == SyntaxKind::Identifier && !t.has_preceding_line_break()) =>
            {
                self.parse_interface_declaration(pos, ModifierFlags::EXPORT_DEFAULT)
            }
            _ => self.parse_export_assignment_rest(pos, false),
        }
    }

    fn parse_export_assignment_rest(&mut self, pos: TextPos, is_export_equals: bool) -> PResult<Statement<'a>> {
        let expression = self.allow_in(|p| p.parse_assignment_expression())?;
        self.expect_semicolon()?;
        Ok(Statement::ExportAssignment(ExportAssignment {
            data: self.finish(SyntaxKind::ExportAssignment, pos),
            is_export_equals,
            expression: self.alloc(expression),
        }))
    }

    /// `export * from "m"`, `export * as ns from "m"`, `export { a, b as c } from "m"`.
    fn parse_export_declaration(&mut self, pos: TextPos, is_type_only: bool) -> PResult<Statement<'a>> {
        let clause_pos = self.token_pos();
        let export_clause = if self.eat(SyntaxKind::AsteriskToken)? {
            if self.eat_if_contextual(ContextualKeyword::As)? {
                let name = self.parse_identifier_name()?;
                Some(NamedExportBindings::NamespaceExport(NamespaceImport {
                    data: self.finish(SyntaxKind::NamespaceExport, clause_pos),
                    name,
                }))
            } else {
                None
            }
        } else {
            let list = self.parse_bracketed_list(ListKind::ImportOrExportSpecifiers, Bracket::Brace, false, |p| {
                p.parse_specifier(SyntaxKind::ExportSpecifier)
            })?;
            Some(NamedExportBindings::NamedExports(NamedImports {
                data: self.finish(SyntaxKind::NamedExports, clause_pos),
                elements: self.alloc_list(list.elements),
            }))
        };
        let module_specifier = if export_clause.is_none() || self.is_contextual(ContextualKeyword::From) {
            self.expect_contextual(ContextualKeyword::From)?;
            Some(self.parse_string_literal()?)
        } else {
            None
        };
        self.expect_semicolon()?;
        Ok(Statement::ExportDeclaration(ExportDeclaration {
            data: self.finish(SyntaxKind::ExportDeclaration, pos),
            is_type_only,
            export_clause,
            module_specifier,
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::options::ParserOptions;
    use crate::parser::Parser;
    use bumpalo::Bump;
    use typegram_ast::node::*;
    use typegram_ast::types::NodeFlags;

    #[test]
    fn test_let_as_identifier() {
        let arena = Bump::new();
        let file = Parser::new(&arena, "t.ts", "let = 1;\nlet x = 2;").parse_source_file().unwrap();
        assert!(matches!(file.statements[0], Statement::ExpressionStatement(_)));
        let Statement::VariableStatement(var) = &file.statements[1] else { panic!("expected variable") };
        assert!(var.declaration_list.data.flags.contains(NodeFlags::LET));
    }

    #[test]
    fn test_return_outside_function() {
        let arena = Bump::new();
        let err = Parser::new(&arena, "t.ts", "return 1;").parse_source_file().unwrap_err();
        assert_eq!(err.code(), 1108);
        let options = ParserOptions { allow_return_outside_function: true, ..ParserOptions::default() };
        assert!(Parser::with_options(&arena, "t.ts", "return 1;", options).parse_source_file().is_ok());
    }

    #[test]
    fn test_destructuring_declares_every_name() {
        let arena = Bump::new();
        let err = Parser::new(&arena, "t.ts", "const { a, b: [c] } = o; let c = 1;")
            .parse_source_file()
            .unwrap_err();
        assert_eq!(err.code(), 2300);
    }
}
