//! The parser: state, entry points and token-level helpers.
//!
//! The grammar itself is split across sibling modules that each add an
//! `impl` block to [`Parser`]: speculation, context frames, contextual
//! keywords, lists and signatures, modifiers, types, declarations,
//! statements and expressions.

use bumpalo::Bump;
use tracing::debug;
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::*;
use typegram_core::text::{TextPos, TextSpan};
use typegram_diagnostics::{messages, Diagnostic, DiagnosticMessage, PResult, ParseError};
use typegram_scanner::{ContextFrame, Token};

use crate::host::{HostGrammar, SourceHost};
use crate::options::ParserOptions;
use crate::scope::ScopeKind;

/// Recursive-descent parser over a [`HostGrammar`].
pub struct Parser<'a, H: HostGrammar = SourceHost> {
    pub(crate) arena: &'a Bump,
    pub(crate) host: H,
    pub(crate) options: ParserOptions,
    pub(crate) context_flags: NodeFlags,
    /// Current nesting depth of types, expressions and statements.
    pub(crate) depth: u32,
    /// Inside the `?` branch of a conditional expression, where an arrow
    /// function's return type must be followed by `:`.
    pub(crate) in_conditional_consequent: bool,
}

/// A type parsed from a whole input string.
#[derive(Debug)]
pub struct StandaloneType<'a> {
    pub type_node: &'a TypeNode<'a>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a, SourceHost> {
    pub fn new(arena: &'a Bump, file_name: &str, source_text: &str) -> Self {
        Self::with_options(arena, file_name, source_text, ParserOptions::default())
    }

    pub fn with_options(arena: &'a Bump, file_name: &str, source_text: &str, options: ParserOptions) -> Self {
        let mut host = SourceHost::new(file_name, source_text);
        host.set_collect_comments(options.collect_comments);
        Self::with_host(arena, host, options)
    }
}

impl<'a, H: HostGrammar> Parser<'a, H> {
    pub fn with_host(arena: &'a Bump, host: H, options: ParserOptions) -> Self {
        let mut context_flags = NodeFlags::NONE;
        context_flags.set(NodeFlags::AMBIENT, options.ambient);
        Self {
            arena,
            host,
            options,
            context_flags,
            depth: 0,
            in_conditional_consequent: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse a whole source file. A fatal diagnostic aborts the parse.
    pub fn parse_source_file(mut self) -> PResult<SourceFile<'a>> {
        debug!(file = self.host.file_name(), ambient = self.in_ambient_context(), "parse begin");
        self.host.skip_shebang();
        self.next_token()?;

        let statements = self.with_scope(ScopeKind::File, |p| p.parse_statement_list(SyntaxKind::EndOfFileToken))?;
        let end = self.host.text_len();
        let data = NodeData::new(SyntaxKind::SourceFile, 0, end)
            .with_flags(self.context_flags & NodeFlags::INHERITED_CONTEXT);
        let diagnostics = self.host.take_diagnostics();
        debug!(
            file = self.host.file_name(),
            statements = statements.len(),
            recoverable = diagnostics.len(),
            "parse end"
        );

        Ok(SourceFile {
            data,
            file_name: self.host.file_name().to_string(),
            statements,
            comments: self.host.take_comments(),
            diagnostics,
            line_map: self.host.line_map(),
        })
    }

    /// Parse the whole input as a single type.
    pub fn parse_standalone_type(mut self) -> PResult<StandaloneType<'a>> {
        self.next_token()?;
        let type_node = self.parse_type_annotation()?;
        if !self.at(SyntaxKind::EndOfFileToken) {
            return Err(self.unexpected());
        }
        Ok(StandaloneType { type_node, diagnostics: self.host.take_diagnostics() })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> &Token {
        self.host.token()
    }

    #[inline]
    pub(crate) fn kind(&self) -> SyntaxKind {
        self.host.token().kind
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.host.token().kind == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> TextPos {
        self.host.start_node()
    }

    #[inline]
    pub(crate) fn token_span(&self) -> TextSpan {
        let token = self.host.token();
        TextSpan::from_bounds(token.start, token.end)
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.host.token().has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn next_token(&mut self) -> PResult<SyntaxKind> {
        self.host.next_token()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> PResult<bool> {
        if self.at(kind) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> PResult<()> {
        if self.eat(kind)? {
            return Ok(());
        }
        Err(self.expected_error(kind))
    }

    pub(crate) fn expected_error(&self, kind: SyntaxKind) -> ParseError {
        match kind {
            SyntaxKind::Identifier => self.error_here(&messages::IDENTIFIER_EXPECTED, &[]),
            _ => self.error_here(&messages::_0_EXPECTED, &[kind.text().unwrap_or("token")]),
        }
    }

    /// `;`, `}`, end of file, or a line break before the current token.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.kind(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    pub(crate) fn expect_semicolon(&mut self) -> PResult<()> {
        if self.eat(SyntaxKind::SemicolonToken)? || self.can_parse_semicolon() {
            return Ok(());
        }
        Err(self.error_here(&messages::_0_EXPECTED, &[";"]))
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub(crate) fn error_at(&self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        self.host.raise(span, message, args)
    }

    pub(crate) fn error_here(&self, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        self.error_at(self.token_span(), message, args)
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        self.error_here(&messages::UNEXPECTED_TOKEN, &[])
    }

    pub(crate) fn recoverable(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        self.host.raise_recoverable(span, message, args);
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Close a node that started at `pos`, stamping the inherited context bits.
    pub(crate) fn finish(&self, kind: SyntaxKind, pos: TextPos) -> NodeData {
        self.host
            .finish_node(kind, pos)
            .with_flags(self.context_flags & NodeFlags::INHERITED_CONTEXT)
    }

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub(crate) fn alloc_list<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    #[inline]
    pub(crate) fn alloc_str(&self, text: &str) -> &'a str {
        self.arena.alloc_str(text)
    }

    // ========================================================================
    // Scoping and recursion limits
    // ========================================================================

    /// Run `f` one level deeper, failing once the nesting limit is reached.
    pub(crate) fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_recursion_depth {
            let limit = self.options.max_recursion_depth.to_string();
            return Err(self.error_here(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[&limit]));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` inside a new scope, which is exited on every path.
    pub(crate) fn with_scope<T>(&mut self, kind: ScopeKind, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.host.enter_scope(kind);
        let result = f(self);
        self.host.exit_scope();
        result
    }

    // ========================================================================
    // Names and literals
    // ========================================================================

    /// An identifier, including soft keywords but not reserved words.
    pub(crate) fn parse_identifier(&mut self) -> PResult<Identifier<'a>> {
        if !self.at(SyntaxKind::Identifier) {
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        self.parse_identifier_token(SyntaxKind::Identifier)
    }

    /// An identifier or any reserved word, as after `.` or in a property name.
    pub(crate) fn parse_identifier_name(&mut self) -> PResult<Identifier<'a>> {
        if !self.kind().is_identifier_or_keyword() {
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        self.parse_identifier_token(SyntaxKind::Identifier)
    }

    pub(crate) fn parse_private_identifier(&mut self) -> PResult<Identifier<'a>> {
        if !self.at(SyntaxKind::PrivateIdentifier) {
            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
        }
        self.parse_identifier_token(SyntaxKind::PrivateIdentifier)
    }

    fn parse_identifier_token(&mut self, kind: SyntaxKind) -> PResult<Identifier<'a>> {
        let pos = self.token_pos();
        let text = self.alloc_str(&self.token().value);
        self.next_token()?;
        Ok(Identifier { data: self.finish(kind, pos), text })
    }

    pub(crate) fn parse_string_literal(&mut self) -> PResult<StringLiteral<'a>> {
        if !self.at(SyntaxKind::StringLiteral) {
            return Err(self.error_here(&messages::STRING_LITERAL_EXPECTED, &[]));
        }
        let pos = self.token_pos();
        let value = self.alloc_str(&self.token().value);
        let single_quote = self.token().flags.contains(TokenFlags::SINGLE_QUOTE);
        self.next_token()?;
        Ok(StringLiteral { data: self.finish(SyntaxKind::StringLiteral, pos), value, single_quote })
    }

    pub(crate) fn parse_numeric_literal(&mut self) -> PResult<NumericLiteral<'a>> {
        let kind = self.kind();
        if !matches!(kind, SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral) {
            return Err(self.unexpected());
        }
        let pos = self.token_pos();
        let text = self.alloc_str(&self.token().value);
        let numeric_flags = self.token().flags & TokenFlags::NUMERIC_LITERAL_FLAGS;
        self.next_token()?;
        Ok(NumericLiteral { data: self.finish(kind, pos), text, numeric_flags })
    }

    /// Property names of members, enum members and object literal entries.
    pub(crate) fn parse_property_name(&mut self) -> PResult<PropertyName<'a>> {
        match self.kind() {
            SyntaxKind::StringLiteral => Ok(PropertyName::StringLiteral(self.parse_string_literal()?)),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                Ok(PropertyName::NumericLiteral(self.parse_numeric_literal()?))
            }
            SyntaxKind::PrivateIdentifier => Ok(PropertyName::PrivateIdentifier(self.parse_private_identifier()?)),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token()?;
                // `[expr]` reads as an expression even inside a type literal.
                let expression = self.with_context(ContextFrame::statement(), |p| p.parse_assignment_expression())?;
                self.expect(SyntaxKind::CloseBracketToken)?;
                Ok(PropertyName::Computed(ComputedPropertyName {
                    data: self.finish(SyntaxKind::ComputedPropertyName, pos),
                    expression: self.alloc(expression),
                }))
            }
            kind if kind.is_identifier_or_keyword() => Ok(PropertyName::Identifier(self.parse_identifier_name()?)),
            _ => Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[])),
        }
    }
}
