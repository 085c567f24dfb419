//! Tokens produced by the scanner.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::TokenFlags;
use typegram_core::text::{LineAndColumn, TextPos, TextRange};

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Cooked value: identifier names with escapes resolved, string literal
    /// contents, raw template chunks, numeric text. Empty for punctuation.
    pub value: String,
    pub start: TextPos,
    pub end: TextPos,
    pub start_loc: LineAndColumn,
    pub end_loc: LineAndColumn,
    pub flags: TokenFlags,
    /// Set for identifiers that spell a soft keyword without escapes.
    pub contextual: Option<ContextualKeyword>,
}

impl Token {
    pub fn new(kind: SyntaxKind, start: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            value: String::new(),
            start,
            end,
            start_loc: LineAndColumn::default(),
            end_loc: LineAndColumn::default(),
            flags: TokenFlags::NONE,
            contextual: None,
        }
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Whether the identifier was spelled with a `\u` escape.
    #[inline]
    pub fn is_escaped(&self) -> bool {
        self.flags.contains(TokenFlags::UNICODE_ESCAPE)
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Whether this token is the unescaped soft keyword `keyword`.
    #[inline]
    pub fn is_contextual(&self, keyword: ContextualKeyword) -> bool {
        self.contextual == Some(keyword)
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new(SyntaxKind::Unknown, 0, 0)
    }
}
