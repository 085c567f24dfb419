//! The scanner.
//!
//! Converts source text into tokens on demand. The parser drives it one
//! token at a time and asks for rescans where the grammar decides how a
//! character should be read (`/` as a regex, `}` as a template
//! continuation, `>>` as two closing angle brackets).

use crate::char_codes::*;
use crate::context::{ContextFrame, ContextStack};
use crate::token::Token;
use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::node::{Comment, CommentKind};
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::TokenFlags;
use typegram_core::text::{LineAndColumn, TextPos, TextRange, TextSpan};
use typegram_diagnostics::{messages, Diagnostic, DiagnosticMessage};

/// Incremental line counter: the line number and line start of `pos`.
#[derive(Debug, Clone, Copy, Default)]
struct LineCursor {
    pos: usize,
    line: u32,
    line_start: usize,
}

/// Everything needed to put the scanner back where it was.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token: Token,
    context: ContextStack,
    lines: LineCursor,
    comment_count: usize,
    error: Option<Diagnostic>,
}

impl ScannerState {
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn pos(&self) -> TextPos {
        self.pos as TextPos
    }
}

pub struct Scanner {
    text: Vec<char>,
    /// Current position: the end of the current token.
    pos: usize,
    token: Token,
    context: ContextStack,
    /// Set during lookahead. Comments are not collected while set.
    speculating: bool,
    collect_comments: bool,
    comments: Vec<Comment>,
    lines: LineCursor,
    /// First lexical error since the last [`Scanner::take_error`].
    error: Option<Diagnostic>,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            token: Token::default(),
            context: ContextStack::new(),
            speculating: false,
            collect_comments: true,
            comments: Vec::new(),
            lines: LineCursor::default(),
            error: None,
        }
    }

    pub fn set_collect_comments(&mut self, collect: bool) {
        self.collect_comments = collect;
    }

    /// Skip a `#!` line at the very beginning of the file. Call this before
    /// the first `scan_token()`.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.text.starts_with(&['#', '!']) {
            while self.current_char().is_some_and(|ch| !is_line_break(ch)) {
                self.pos += 1;
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.token.kind
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.token.value
    }

    /// Position right after the current token.
    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos as TextPos
    }

    pub fn text_len(&self) -> TextPos {
        self.text.len() as TextPos
    }

    #[inline]
    pub fn char_at(&self, pos: TextPos) -> Option<char> {
        self.text.get(pos as usize).copied()
    }

    pub fn slice(&self, start: TextPos, end: TextPos) -> String {
        let end = (end as usize).min(self.text.len());
        let start = (start as usize).min(end);
        self.text[start..end].iter().collect()
    }

    #[inline]
    pub fn is_speculating(&self) -> bool {
        self.speculating
    }

    /// Set the speculating flag and return its previous value.
    pub fn set_speculating(&mut self, speculating: bool) -> bool {
        std::mem::replace(&mut self.speculating, speculating)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    pub fn error(&self) -> Option<&Diagnostic> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<Diagnostic> {
        self.error.take()
    }

    // ========================================================================
    // Context stack
    // ========================================================================

    pub fn context(&self) -> &ContextStack {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ContextStack {
        &mut self.context
    }

    pub fn current_context(&self) -> &ContextFrame {
        self.context.current()
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    pub fn snapshot(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token: self.token.clone(),
            context: self.context.clone(),
            lines: self.lines,
            comment_count: self.comments.len(),
            error: self.error.clone(),
        }
    }

    pub fn restore(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token = state.token;
        self.context = state.context;
        self.lines = state.lines;
        self.comments.truncate(state.comment_count);
        self.error = state.error;
    }

    // ========================================================================
    // Raw text peeking
    // ========================================================================

    /// Position of the first character at or after `pos` that is not
    /// whitespace or part of a comment. Does not touch scanner state.
    pub fn skip_trivia_from(&self, pos: TextPos) -> TextPos {
        let mut i = pos as usize;
        while let Some(&ch) = self.text.get(i) {
            if is_line_break(ch) || is_white_space_single_line(ch) {
                i += 1;
            } else if ch == '/' && self.text.get(i + 1) == Some(&'/') {
                while self.text.get(i).is_some_and(|&c| !is_line_break(c)) {
                    i += 1;
                }
            } else if ch == '/' && self.text.get(i + 1) == Some(&'*') {
                i += 2;
                while i < self.text.len() && !(self.text[i] == '*' && self.text.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(self.text.len());
            } else {
                break;
            }
        }
        i as TextPos
    }

    /// The next significant character at or after `pos`.
    pub fn next_char_after_trivia(&self, pos: TextPos) -> Option<char> {
        self.char_at(self.skip_trivia_from(pos))
    }

    /// Whether the next word at or after `pos` is exactly `word`.
    pub fn matches_word_at(&self, pos: TextPos, word: &str) -> bool {
        let mut i = self.skip_trivia_from(pos) as usize;
        for expected in word.chars() {
            if self.text.get(i) != Some(&expected) {
                return false;
            }
            i += 1;
        }
        !self.text.get(i).is_some_and(|&c| is_identifier_part(c) || c == '\\')
    }

    pub fn line_break_between(&self, start: TextPos, end: TextPos) -> bool {
        let end = (end as usize).min(self.text.len());
        let start = (start as usize).min(end);
        self.text[start..end].iter().any(|&c| is_line_break(c))
    }

    /// Zero-based line and column of `pos`.
    pub fn line_and_column_of(&mut self, pos: TextPos) -> LineAndColumn {
        self.location_of(pos as usize)
    }

    fn location_of(&mut self, pos: usize) -> LineAndColumn {
        let target = pos.min(self.text.len());
        if target < self.lines.pos {
            self.lines = LineCursor::default();
        }
        let mut cursor = self.lines;
        while cursor.pos < target {
            let ch = self.text[cursor.pos];
            let is_break = match ch {
                '\r' => self.text.get(cursor.pos + 1) != Some(&'\n'),
                c => is_line_break(c),
            };
            cursor.pos += 1;
            if is_break {
                cursor.line += 1;
                cursor.line_start = cursor.pos;
            }
        }
        self.lines = cursor;
        LineAndColumn::new(cursor.line, (target - cursor.line_start) as u32)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    fn report(&mut self, message: &DiagnosticMessage, start: usize, end: usize) {
        if self.error.is_none() {
            let span = TextSpan::from_bounds(start as TextPos, end.max(start) as TextPos);
            self.error = Some(Diagnostic::new(message, &[]).with_span(span));
        }
    }

    fn record_comment(&mut self, kind: CommentKind, start: usize, text_start: usize, text_end: usize) {
        if self.collect_comments && !self.speculating {
            let text = self.text[text_start..text_end].iter().collect();
            let range = TextRange::new(start as TextPos, self.pos as TextPos);
            self.comments.push(Comment { kind, text, range });
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                '\r' | '\n' | '\u{2028}' | '\u{2029}' => {
                    self.token.flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                '/' if self.peek(1) == Some('/') => {
                    let start = self.pos;
                    self.pos += 2;
                    while self.current_char().is_some_and(|c| !is_line_break(c)) {
                        self.pos += 1;
                    }
                    self.record_comment(CommentKind::SingleLine, start, start + 2, self.pos);
                }
                '/' if self.peek(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    let text_end = loop {
                        match self.current_char() {
                            None => {
                                self.report(&messages::ASTERISK_SLASH_EXPECTED, self.pos, self.pos);
                                break self.pos;
                            }
                            Some('*') if self.peek(1) == Some('/') => {
                                self.pos += 2;
                                break self.pos - 2;
                            }
                            Some(c) => {
                                if is_line_break(c) {
                                    self.token.flags |= TokenFlags::PRECEDING_LINE_BREAK;
                                }
                                self.pos += 1;
                            }
                        }
                    };
                    self.record_comment(CommentKind::MultiLine, start, start + 2, text_end);
                }
                c if is_white_space_single_line(c) => self.pos += 1,
                _ => return,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan_token(&mut self) -> SyntaxKind {
        self.token.flags = TokenFlags::NONE;
        self.token.value.clear();
        let frame = *self.context.current();
        if !frame.preserve_space {
            self.skip_trivia();
        }
        let start = self.pos;
        let kind = match self.current_char() {
            None => SyntaxKind::EndOfFileToken,
            Some(ch) => match frame.override_token.and_then(|read| read(self, ch)) {
                Some(kind) => kind,
                None => self.scan_from_char(ch),
            },
        };
        self.finish_token(kind, start)
    }

    fn finish_token(&mut self, kind: SyntaxKind, start: usize) -> SyntaxKind {
        self.token.kind = kind;
        self.token.start = start as TextPos;
        self.token.end = self.pos as TextPos;
        self.token.start_loc = self.location_of(start);
        self.token.end_loc = self.location_of(self.pos);
        self.token.contextual = if kind == SyntaxKind::Identifier && !self.token.is_escaped() {
            ContextualKeyword::classify(&self.token.value)
        } else {
            None
        };
        kind
    }

    fn scan_from_char(&mut self, ch: char) -> SyntaxKind {
        match ch {
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            ';' => self.single(SyntaxKind::SemicolonToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '@' => self.single(SyntaxKind::AtToken),
            ':' => self.single(SyntaxKind::ColonToken),

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_operator('+', SyntaxKind::PlusToken, Some(SyntaxKind::PlusPlusToken), SyntaxKind::PlusEqualsToken),
            '-' => self.scan_operator('-', SyntaxKind::MinusToken, Some(SyntaxKind::MinusMinusToken), SyntaxKind::MinusEqualsToken),
            '*' => self.scan_asterisk(),
            '/' => self.scan_operator('/', SyntaxKind::SlashToken, None, SyntaxKind::SlashEqualsToken),
            '%' => self.scan_operator('%', SyntaxKind::PercentToken, None, SyntaxKind::PercentEqualsToken),
            '^' => self.scan_operator('^', SyntaxKind::CaretToken, None, SyntaxKind::CaretEqualsToken),
            '&' => self.scan_logical('&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken, SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandAmpersandEqualsToken),
            '|' => self.scan_logical('|', SyntaxKind::BarToken, SyntaxKind::BarEqualsToken, SyntaxKind::BarBarToken, SyntaxKind::BarBarEqualsToken),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => {
                let start = self.pos;
                self.pos += 1;
                self.scan_template_chunk(start, true)
            }
            '#' => self.scan_private_identifier(),

            '0'..='9' => self.scan_number(),
            '\\' if self.peek(1) == Some('u') => self.scan_identifier(),
            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.pos += 1;
                self.report(&messages::INVALID_CHARACTER, self.pos - 1, self.pos);
                SyntaxKind::Unknown
            }
        }
    }

    // ========================================================================
    // Punctuation
    // ========================================================================

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    #[inline]
    fn take(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.peek(1) == Some('.') && self.peek(2) == Some('.') {
            self.take(3, SyntaxKind::DotDotDotToken)
        } else if self.peek(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.single(SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some('?'), Some('=')) => self.take(3, SyntaxKind::QuestionQuestionEqualsToken),
            (Some('?'), _) => self.take(2, SyntaxKind::QuestionQuestionToken),
            // `a?.5:b` is a conditional, not optional chaining.
            (Some('.'), next) if !next.is_some_and(is_digit) => self.take(2, SyntaxKind::QuestionDotToken),
            _ => self.single(SyntaxKind::QuestionToken),
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some('<'), Some('=')) => self.take(3, SyntaxKind::LessThanLessThanEqualsToken),
            (Some('<'), _) => self.take(2, SyntaxKind::LessThanLessThanToken),
            (Some('='), _) => self.take(2, SyntaxKind::LessThanEqualsToken),
            _ => self.single(SyntaxKind::LessThanToken),
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2), self.peek(3)) {
            (Some('>'), Some('>'), Some('=')) => self.take(4, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
            (Some('>'), Some('>'), _) => self.take(3, SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            (Some('>'), Some('='), _) => self.take(3, SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (Some('>'), _, _) => self.take(2, SyntaxKind::GreaterThanGreaterThanToken),
            (Some('='), _, _) => self.take(2, SyntaxKind::GreaterThanEqualsToken),
            _ => self.single(SyntaxKind::GreaterThanToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::EqualsEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::EqualsEqualsToken),
            (Some('>'), _) => self.take(2, SyntaxKind::EqualsGreaterThanToken),
            _ => self.single(SyntaxKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::ExclamationEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::ExclamationEqualsToken),
            _ => self.single(SyntaxKind::ExclamationToken),
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some('*'), Some('=')) => self.take(3, SyntaxKind::AsteriskAsteriskEqualsToken),
            (Some('*'), _) => self.take(2, SyntaxKind::AsteriskAsteriskToken),
            (Some('='), _) => self.take(2, SyntaxKind::AsteriskEqualsToken),
            _ => self.single(SyntaxKind::AsteriskToken),
        }
    }

    /// `c`, `cc` (when `doubled` is given) or `c=`.
    fn scan_operator(&mut self, c: char, plain: SyntaxKind, doubled: Option<SyntaxKind>, assign: SyntaxKind) -> SyntaxKind {
        match (self.peek(1), doubled) {
            (Some(next), Some(kind)) if next == c => self.take(2, kind),
            (Some('='), _) => self.take(2, assign),
            _ => self.single(plain),
        }
    }

    /// `&`, `&=`, `&&`, `&&=` and the `|` family.
    fn scan_logical(
        &mut self,
        c: char,
        plain: SyntaxKind,
        assign: SyntaxKind,
        doubled: SyntaxKind,
        doubled_assign: SyntaxKind,
    ) -> SyntaxKind {
        match (self.peek(1), self.peek(2)) {
            (Some(n), Some('=')) if n == c => self.take(3, doubled_assign),
            (Some(n), _) if n == c => self.take(2, doubled),
            (Some('='), _) => self.take(2, assign),
            _ => self.single(plain),
        }
    }

    // ========================================================================
    // Rescanning
    // ========================================================================

    /// Re-read the current relational or shift token under the innermost
    /// context frame. Called when a frame is pushed or popped while such a
    /// token is current.
    pub fn rescan_relational(&mut self) -> SyntaxKind {
        if !is_relational_kind(self.token.kind) {
            return self.token.kind;
        }
        let start = self.token.start as usize;
        self.pos = start;
        let ch = self.text[start];
        let frame = *self.context.current();
        let kind = match frame.override_token.and_then(|read| read(self, ch)) {
            Some(kind) => kind,
            None => self.scan_from_char(ch),
        };
        self.finish_token(kind, start)
    }

    /// Re-read a `}` that closes a template substitution as a template
    /// middle or tail.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        let start = self.token.start as usize;
        self.pos = start + 1;
        self.token.value.clear();
        let kind = self.scan_template_chunk(start, false);
        self.finish_token(kind, start)
    }

    /// Re-read a `/` or `/=` as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        let start = self.token.start as usize;
        self.pos = start + 1;
        let mut in_character_class = false;
        loop {
            let Some(ch) = self.current_char() else {
                self.report(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, start, self.pos);
                self.token.flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if is_line_break(ch) {
                self.report(&messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL, start, self.pos);
                self.token.flags |= TokenFlags::UNTERMINATED;
                break;
            }
            self.pos += 1;
            match ch {
                '\\' => {
                    if self.current_char().is_some_and(|c| !is_line_break(c)) {
                        self.pos += 1;
                    }
                }
                '[' => in_character_class = true,
                ']' => in_character_class = false,
                '/' if !in_character_class => {
                    while self.current_char().is_some_and(is_identifier_part) {
                        self.pos += 1;
                    }
                    break;
                }
                _ => {}
            }
        }
        self.token.value = self.text[start..self.pos].iter().collect();
        self.finish_token(SyntaxKind::RegularExpressionLiteral, start)
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        if quote == '\'' {
            self.token.flags |= TokenFlags::SINGLE_QUOTE;
        }
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.current_char() {
                None | Some('\r') | Some('\n') => {
                    self.report(&messages::UNTERMINATED_STRING_LITERAL, start, self.pos);
                    self.token.flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some(ch) if ch == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => self.scan_escape(&mut value),
                Some(ch) => {
                    value.push(ch);
                    self.pos += 1;
                }
            }
        }
        self.token.value = value;
        SyntaxKind::StringLiteral
    }

    /// Decode one escape sequence starting at a backslash.
    fn scan_escape(&mut self, out: &mut String) {
        let start = self.pos;
        self.pos += 1;
        let Some(ch) = self.current_char() else {
            return;
        };
        self.pos += 1;
        match ch {
            '0' if !self.current_char().is_some_and(is_digit) => out.push('\0'),
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'v' => out.push('\u{B}'),
            'f' => out.push('\u{C}'),
            'r' => out.push('\r'),
            'x' => {
                if let Some(c) = self.scan_hex_value(2, start).and_then(char::from_u32) {
                    out.push(c);
                }
            }
            'u' => {
                if let Some(c) = self.scan_unicode_escape_body(start) {
                    out.push(c);
                }
            }
            // Line continuations contribute nothing.
            '\r' => {
                if self.current_char() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            c => out.push(c),
        }
    }

    fn scan_hex_value(&mut self, count: usize, escape_start: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            match self.current_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.pos += 1;
                }
                None => {
                    self.report(&messages::HEXADECIMAL_DIGIT_EXPECTED, escape_start, self.pos);
                    return None;
                }
            }
        }
        Some(value)
    }

    /// The part of a `\u` escape after the `u`: `XXXX` or `{X...}`.
    fn scan_unicode_escape_body(&mut self, escape_start: usize) -> Option<char> {
        if self.current_char() != Some('{') {
            return self.scan_hex_value(4, escape_start).and_then(char::from_u32);
        }
        self.pos += 1;
        let digits_start = self.pos;
        let mut value = 0u32;
        while let Some(digit) = self.current_char().and_then(|c| c.to_digit(16)) {
            value = value.saturating_mul(16).saturating_add(digit);
            self.pos += 1;
        }
        let closed = self.current_char() == Some('}');
        if closed {
            self.pos += 1;
        }
        if !closed || self.pos - 1 == digits_start || value > 0x10FFFF {
            self.report(&messages::INVALID_UNICODE_ESCAPE_SEQUENCE, escape_start, self.pos);
            return None;
        }
        char::from_u32(value)
    }

    /// Scan a template chunk up to a backtick or `${`. The value is the raw
    /// text with `\r\n` normalized to `\n`.
    fn scan_template_chunk(&mut self, start: usize, is_start: bool) -> SyntaxKind {
        let mut raw = String::new();
        let kind = loop {
            let Some(ch) = self.current_char() else {
                self.report(&messages::UNTERMINATED_TEMPLATE_LITERAL, start, self.pos);
                self.token.flags |= TokenFlags::UNTERMINATED;
                break if is_start { SyntaxKind::NoSubstitutionTemplateLiteral } else { SyntaxKind::TemplateTail };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if is_start { SyntaxKind::NoSubstitutionTemplateLiteral } else { SyntaxKind::TemplateTail };
                }
                '$' if self.peek(1) == Some('{') => {
                    self.pos += 2;
                    break if is_start { SyntaxKind::TemplateHead } else { SyntaxKind::TemplateMiddle };
                }
                '\\' => {
                    raw.push(ch);
                    self.pos += 1;
                    if let Some(next) = self.current_char() {
                        raw.push(next);
                        self.pos += 1;
                    }
                }
                '\r' => {
                    raw.push('\n');
                    self.pos += 1;
                    if self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
                }
                _ => {
                    raw.push(ch);
                    self.pos += 1;
                }
            }
        };
        self.token.value = raw;
        kind
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.current_char() == Some('0') {
            let radix = match self.peek(1) {
                Some('x' | 'X') => Some((16, TokenFlags::HEX_SPECIFIER)),
                Some('b' | 'B') => Some((2, TokenFlags::BINARY_SPECIFIER)),
                Some('o' | 'O') => Some((8, TokenFlags::OCTAL_SPECIFIER)),
                _ => None,
            };
            if let Some((radix, flag)) = radix {
                self.pos += 2;
                self.token.flags |= flag;
                if self.scan_digits(radix) == 0 {
                    let message = if radix == 16 { &messages::HEXADECIMAL_DIGIT_EXPECTED } else { &messages::DIGIT_EXPECTED };
                    self.report(message, start, self.pos);
                }
                return self.finish_number(start);
            }
        }

        self.scan_digits(10);
        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits(10);
        }
        if let Some('e' | 'E') = self.current_char() {
            self.pos += 1;
            self.token.flags |= TokenFlags::SCIENTIFIC;
            if let Some('+' | '-') = self.current_char() {
                self.pos += 1;
            }
            if self.scan_digits(10) == 0 {
                self.report(&messages::DIGIT_EXPECTED, start, self.pos);
            }
        }
        self.finish_number(start)
    }

    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.current_char() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token.value = self.text[start..self.pos].iter().collect();
        kind
    }

    /// Scan digits of `radix` with `_` separators; returns the digit count.
    fn scan_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current_char() {
            if ch == '_' {
                self.token.flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else if ch.is_digit(radix) {
                count += 1;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Read an identifier name, resolving `\u` escapes. Returns the cooked
    /// name, or an empty string if the first character is not a valid start.
    fn read_word(&mut self) -> String {
        let mut value = String::new();
        loop {
            let first = value.is_empty();
            match self.current_char() {
                Some('\\') if self.peek(1) == Some('u') => {
                    let escape_start = self.pos;
                    self.pos += 2;
                    match self.scan_unicode_escape_body(escape_start) {
                        Some(c) if (first && is_identifier_start(c)) || (!first && is_identifier_part(c)) => {
                            value.push(c);
                            self.token.flags |= TokenFlags::UNICODE_ESCAPE;
                        }
                        _ => {
                            self.report(&messages::INVALID_UNICODE_ESCAPE_SEQUENCE, escape_start, self.pos);
                            break;
                        }
                    }
                }
                Some(c) if (first && is_identifier_start(c)) || (!first && is_identifier_part(c)) => {
                    value.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        value
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let value = self.read_word();
        let kind = if value.is_empty() {
            SyntaxKind::Unknown
        } else if self.token.is_escaped() {
            // Escaped reserved words are plain identifiers.
            SyntaxKind::Identifier
        } else {
            SyntaxKind::from_keyword(&value).unwrap_or(SyntaxKind::Identifier)
        };
        self.token.value = value;
        kind
    }

    fn scan_private_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let name = self.read_word();
        if name.is_empty() {
            self.report(&messages::INVALID_CHARACTER, start, start + 1);
            return SyntaxKind::Unknown;
        }
        self.token.value = format!("#{name}");
        SyntaxKind::PrivateIdentifier
    }
}

/// Override used by type-position frames: `<` and `>` are always single
/// tokens.
pub(crate) fn scan_single_relational(scanner: &mut Scanner, ch: char) -> Option<SyntaxKind> {
    match ch {
        '<' => Some(scanner.single(SyntaxKind::LessThanToken)),
        '>' => Some(scanner.single(SyntaxKind::GreaterThanToken)),
        _ => None,
    }
}

fn is_relational_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LessThanToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::LessThanLessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
    )
}

/// Scans tokens up to, but not including, the end of file.
impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.scan_token() {
            SyntaxKind::EndOfFileToken => None,
            _ => Some(self.token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextFrame;

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        Scanner::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , :"),
            vec![
                SyntaxKind::OpenParenToken,
                SyntaxKind::CloseParenToken,
                SyntaxKind::OpenBraceToken,
                SyntaxKind::CloseBraceToken,
                SyntaxKind::OpenBracketToken,
                SyntaxKind::CloseBracketToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::CommaToken,
                SyntaxKind::ColonToken,
            ]
        );
    }

    #[test]
    fn test_shift_operators_in_statement_frame() {
        assert_eq!(
            kinds(">> >>> >>= <<="),
            vec![
                SyntaxKind::GreaterThanGreaterThanToken,
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
                SyntaxKind::GreaterThanGreaterThanEqualsToken,
                SyntaxKind::LessThanLessThanEqualsToken,
            ]
        );
    }

    #[test]
    fn test_type_frame_splits_angle_brackets() {
        let mut scanner = Scanner::new(">>=");
        scanner.context_mut().push(ContextFrame::type_position());
        assert_eq!(scanner.scan_token(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.scan_token(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.scan_token(), SyntaxKind::EqualsToken);
    }

    #[test]
    fn test_rescan_relational_after_push() {
        let mut scanner = Scanner::new("<<T>");
        assert_eq!(scanner.scan_token(), SyntaxKind::LessThanLessThanToken);
        scanner.context_mut().push(ContextFrame::type_position());
        assert_eq!(scanner.rescan_relational(), SyntaxKind::LessThanToken);
        assert_eq!(scanner.token().end, 1);
        assert_eq!(scanner.scan_token(), SyntaxKind::LessThanToken);
    }

    #[test]
    fn test_contextual_tag_skips_escaped_words() {
        let mut scanner = Scanner::new(r"declare \u0064eclare interfaceX");
        scanner.scan_token();
        assert_eq!(scanner.token().contextual, Some(ContextualKeyword::Declare));
        scanner.scan_token();
        assert_eq!(scanner.value(), "declare");
        assert!(scanner.token().is_escaped());
        assert_eq!(scanner.token().contextual, None);
        scanner.scan_token();
        assert_eq!(scanner.token().contextual, None);
    }

    #[test]
    fn test_escaped_reserved_word_is_identifier() {
        let mut scanner = Scanner::new(r"\u{63}lass");
        assert_eq!(scanner.scan_token(), SyntaxKind::Identifier);
        assert_eq!(scanner.value(), "class");
    }

    #[test]
    fn test_string_escapes_are_cooked() {
        let mut scanner = Scanner::new(r#"'a\n\x41\u{1F600}'"#);
        assert_eq!(scanner.scan_token(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.value(), "a\nA\u{1F600}");
        assert!(scanner.token().flags.contains(TokenFlags::SINGLE_QUOTE));
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let mut scanner = Scanner::new("\"abc\n");
        scanner.scan_token();
        let error = scanner.take_error().map(|d| d.code);
        assert_eq!(error, Some(1002));
    }

    #[test]
    fn test_template_rescan() {
        let mut scanner = Scanner::new("`a${b}c`");
        assert_eq!(scanner.scan_token(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.value(), "a");
        assert_eq!(scanner.scan_token(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan_token(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.value(), "c");
        assert_eq!(scanner.token().range(), TextRange::new(5, 8));
    }

    #[test]
    fn test_regex_rescan() {
        let mut scanner = Scanner::new("/[/]x/gi;");
        assert_eq!(scanner.scan_token(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.value(), "/[/]x/gi");
        assert_eq!(scanner.scan_token(), SyntaxKind::SemicolonToken);
    }

    #[test]
    fn test_numbers() {
        let mut scanner = Scanner::new("0xFFn 1_000 1e-3 .5");
        assert_eq!(scanner.scan_token(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.scan_token(), SyntaxKind::NumericLiteral);
        assert!(scanner.token().flags.contains(TokenFlags::CONTAINS_SEPARATOR));
        assert_eq!(scanner.scan_token(), SyntaxKind::NumericLiteral);
        assert!(scanner.token().flags.contains(TokenFlags::SCIENTIFIC));
        assert_eq!(scanner.scan_token(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.value(), ".5");
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#secret");
        assert_eq!(scanner.scan_token(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.value(), "#secret");
    }

    #[test]
    fn test_line_and_column() {
        let mut scanner = Scanner::new("a\r\n  bb\n c");
        scanner.scan_token();
        scanner.scan_token();
        assert_eq!(scanner.token().start_loc, LineAndColumn::new(1, 2));
        assert!(scanner.token().has_preceding_line_break());
        scanner.scan_token();
        assert_eq!(scanner.token().start_loc, LineAndColumn::new(2, 1));
    }

    #[test]
    fn test_snapshot_restores_everything() {
        let mut scanner = Scanner::new("a /* one */ b // two\n c");
        scanner.scan_token();
        let state = scanner.snapshot();
        scanner.scan_token();
        scanner.scan_token();
        assert_eq!(scanner.comments().len(), 2);
        scanner.restore(state);
        assert_eq!(scanner.value(), "a");
        assert!(scanner.comments().is_empty());
        scanner.scan_token();
        assert_eq!(scanner.value(), "b");
    }

    #[test]
    fn test_speculation_suppresses_comments() {
        let mut scanner = Scanner::new("/* c */ a");
        scanner.set_speculating(true);
        scanner.scan_token();
        assert!(scanner.comments().is_empty());
    }

    #[test]
    fn test_matches_word_at() {
        let scanner = Scanner::new("x  /* c */ interface Foo");
        assert!(scanner.matches_word_at(1, "interface"));
        assert!(!scanner.matches_word_at(1, "inter"));
        assert_eq!(scanner.next_char_after_trivia(1), Some('i'));
    }

    #[test]
    fn test_preserve_space_frame() {
        let mut scanner = Scanner::new(" a");
        scanner.context_mut().push(ContextFrame::custom("raw", true, None));
        assert_eq!(scanner.scan_token(), SyntaxKind::Unknown);
    }
}
