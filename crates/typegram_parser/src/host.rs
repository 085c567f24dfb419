//! The host grammar capability set.
//!
//! The type grammar engine does not own a tokenizer, a scope chain or a
//! diagnostics sink. It reaches them through [`HostGrammar`], which
//! [`SourceHost`] implements over the typegram scanner and
//! [`ScopeTracker`].

use crate::scope::{BindingKind, ScopeKind, ScopeMark, ScopeTracker};
use typegram_ast::node::{Comment, NodeData};
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_core::text::{LineMap, TextPos, TextSpan};
use typegram_diagnostics::{
    messages, Diagnostic, DiagnosticCollection, DiagnosticMessage, PResult, ParseError, Severity,
};
use typegram_scanner::{ContextStack, Scanner, ScannerState, Token};

/// Everything the engine needs from the host parser.
pub trait HostGrammar {
    /// Saved host state for speculative parsing.
    type State;

    fn file_name(&self) -> &str;

    // Token stream

    fn token(&self) -> &Token;
    /// Advance to the next token. A lexical error is fatal.
    fn next_token(&mut self) -> PResult<SyntaxKind>;
    /// End of the last consumed token.
    fn prev_token_end(&self) -> TextPos;
    fn skip_shebang(&mut self);
    fn rescan_relational(&mut self) -> SyntaxKind;
    fn rescan_template_token(&mut self) -> PResult<SyntaxKind>;
    fn rescan_slash_token(&mut self) -> PResult<SyntaxKind>;
    /// Set the lexer's speculating flag; returns the previous value.
    fn set_speculating(&mut self, speculating: bool) -> bool;

    // Raw text

    fn text_len(&self) -> TextPos;
    fn next_char_after_trivia(&self, pos: TextPos) -> Option<char>;
    fn matches_word_at(&self, pos: TextPos, word: &str) -> bool;
    fn line_break_between(&self, start: TextPos, end: TextPos) -> bool;

    // Tokenizer context hook

    fn context(&self) -> &ContextStack;
    fn context_mut(&mut self) -> &mut ContextStack;

    // Node lifecycle

    fn start_node(&self) -> TextPos {
        self.token().start
    }

    fn start_node_at(&self, pos: TextPos) -> TextPos {
        pos
    }

    /// Close a node that started at `pos` and ends with the last consumed token.
    fn finish_node(&self, kind: SyntaxKind, pos: TextPos) -> NodeData {
        NodeData::new(kind, pos, self.prev_token_end().max(pos))
    }

    // Scopes

    fn enter_scope(&mut self, kind: ScopeKind);
    fn exit_scope(&mut self);
    fn declare_binding(&mut self, name: &str, kind: BindingKind, span: TextSpan) -> PResult<()>;

    // Diagnostics

    /// Build a fatal error. The caller returns it.
    fn raise(&self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> ParseError;
    /// Record a diagnostic that leaves the tree usable.
    fn raise_recoverable(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]);

    // Speculation

    fn checkpoint(&mut self) -> Self::State;
    fn rewind(&mut self, state: Self::State);
    fn commit(&mut self, state: Self::State);

    // Results

    fn take_comments(&mut self) -> Vec<Comment>;
    fn take_diagnostics(&mut self) -> Vec<Diagnostic>;
    fn line_map(&self) -> LineMap;
}

/// Host over a source string.
pub struct SourceHost {
    file_name: String,
    line_map: LineMap,
    scanner: Scanner,
    prev_end: TextPos,
    diagnostics: DiagnosticCollection,
    scopes: ScopeTracker,
}

/// Saved [`SourceHost`] state.
#[derive(Debug, Clone)]
pub struct SourceHostState {
    scanner: ScannerState,
    prev_end: TextPos,
    diagnostic_count: usize,
    scope: ScopeMark,
}

impl SourceHost {
    pub fn new(file_name: &str, source_text: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            line_map: LineMap::new(source_text),
            scanner: Scanner::new(source_text),
            prev_end: 0,
            diagnostics: DiagnosticCollection::new(),
            scopes: ScopeTracker::new(),
        }
    }

    pub fn set_collect_comments(&mut self, collect: bool) {
        self.scanner.set_collect_comments(collect);
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn scopes(&self) -> &ScopeTracker {
        &self.scopes
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    fn check_lexical_error(&mut self, kind: SyntaxKind) -> PResult<SyntaxKind> {
        match self.scanner.take_error() {
            Some(diagnostic) => Err(ParseError::new(diagnostic.with_file(self.file_name.as_str()))),
            None => Ok(kind),
        }
    }
}

impl HostGrammar for SourceHost {
    type State = SourceHostState;

    fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    fn token(&self) -> &Token {
        self.scanner.token()
    }

    fn next_token(&mut self) -> PResult<SyntaxKind> {
        self.prev_end = self.scanner.token().end;
        let kind = self.scanner.scan_token();
        self.check_lexical_error(kind)
    }

    #[inline]
    fn prev_token_end(&self) -> TextPos {
        self.prev_end
    }

    fn skip_shebang(&mut self) {
        self.scanner.skip_shebang();
    }

    fn rescan_relational(&mut self) -> SyntaxKind {
        self.scanner.rescan_relational()
    }

    fn rescan_template_token(&mut self) -> PResult<SyntaxKind> {
        let kind = self.scanner.rescan_template_token();
        self.check_lexical_error(kind)
    }

    fn rescan_slash_token(&mut self) -> PResult<SyntaxKind> {
        let kind = self.scanner.rescan_slash_token();
        self.check_lexical_error(kind)
    }

    fn set_speculating(&mut self, speculating: bool) -> bool {
        self.scanner.set_speculating(speculating)
    }

    fn text_len(&self) -> TextPos {
        self.scanner.text_len()
    }

    fn next_char_after_trivia(&self, pos: TextPos) -> Option<char> {
        self.scanner.next_char_after_trivia(pos)
    }

    fn matches_word_at(&self, pos: TextPos, word: &str) -> bool {
        self.scanner.matches_word_at(pos, word)
    }

    fn line_break_between(&self, start: TextPos, end: TextPos) -> bool {
        self.scanner.line_break_between(start, end)
    }

    fn context(&self) -> &ContextStack {
        self.scanner.context()
    }

    fn context_mut(&mut self) -> &mut ContextStack {
        self.scanner.context_mut()
    }

    fn enter_scope(&mut self, kind: ScopeKind) {
        self.scopes.enter_scope(kind);
    }

    fn exit_scope(&mut self) {
        self.scopes.exit_scope();
    }

    fn declare_binding(&mut self, name: &str, kind: BindingKind, span: TextSpan) -> PResult<()> {
        self.scopes
            .declare(name, kind, span)
            .map_err(|_| self.raise(span, &messages::DUPLICATE_IDENTIFIER_0, &[name]))
    }

    fn raise(&self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        ParseError::new(Diagnostic::with_location(self.file_name.as_str(), span, message, args))
    }

    fn raise_recoverable(&mut self, span: TextSpan, message: &DiagnosticMessage, args: &[&str]) {
        let diagnostic = Diagnostic::with_location(self.file_name.as_str(), span, message, args)
            .with_severity(Severity::Recoverable);
        self.diagnostics.add(diagnostic);
    }

    fn checkpoint(&mut self) -> SourceHostState {
        SourceHostState {
            scanner: self.scanner.snapshot(),
            prev_end: self.prev_end,
            diagnostic_count: self.diagnostics.len(),
            scope: self.scopes.mark(),
        }
    }

    fn rewind(&mut self, state: SourceHostState) {
        self.scanner.restore(state.scanner);
        self.prev_end = state.prev_end;
        self.diagnostics.truncate(state.diagnostic_count);
        self.scopes.rollback(state.scope);
    }

    fn commit(&mut self, state: SourceHostState) {
        self.scopes.commit(state.scope);
    }

    fn take_comments(&mut self) -> Vec<Comment> {
        self.scanner.take_comments()
    }

    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort();
        diagnostics.into_diagnostics()
    }

    fn line_map(&self) -> LineMap {
        self.line_map.clone()
    }
}
