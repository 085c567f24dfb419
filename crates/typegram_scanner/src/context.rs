//! The tokenizer context stack.
//!
//! The innermost frame decides how ambiguous characters are read. In the
//! statement frame `>>` is a shift operator; in a type frame every `<` and
//! `>` is a single relational token so that `A<B<C>>` closes two argument
//! lists.

use crate::scanner::{scan_single_relational, Scanner};
use typegram_ast::syntax_kind::SyntaxKind;

/// Reinterprets the character at the scanner position before default
/// dispatch runs. Returning `None` falls through to the default rules.
pub type TokenOverride = fn(&mut Scanner, char) -> Option<SyntaxKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Statement,
    Type,
    /// Embedders can push their own frames (e.g. markup bodies).
    Custom,
}

#[derive(Debug, Clone, Copy)]
pub struct ContextFrame {
    pub kind: FrameKind,
    pub tag: &'static str,
    /// Whitespace and comments are significant and not skipped.
    pub preserve_space: bool,
    pub override_token: Option<TokenOverride>,
}

impl ContextFrame {
    pub const fn statement() -> Self {
        Self { kind: FrameKind::Statement, tag: "statement", preserve_space: false, override_token: None }
    }

    pub const fn type_position() -> Self {
        Self {
            kind: FrameKind::Type,
            tag: "type",
            preserve_space: false,
            override_token: Some(scan_single_relational),
        }
    }

    pub const fn custom(tag: &'static str, preserve_space: bool, override_token: Option<TokenOverride>) -> Self {
        Self { kind: FrameKind::Custom, tag, preserve_space, override_token }
    }

    #[inline]
    pub fn is_type(&self) -> bool {
        self.kind == FrameKind::Type
    }
}

/// A stack of frames that always keeps its outermost statement frame.
#[derive(Debug, Clone)]
pub struct ContextStack {
    frames: Vec<ContextFrame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self { frames: vec![ContextFrame::statement()] }
    }

    pub fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
    }

    /// Pop the innermost frame. The outermost frame is never popped.
    pub fn pop(&mut self) -> Option<ContextFrame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &ContextFrame {
        // The outermost frame is never removed.
        &self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Remove every frame above the outermost one and return them.
    pub fn collapse(&mut self) -> Vec<ContextFrame> {
        self.frames.split_off(1)
    }

    /// Put back frames removed by [`ContextStack::collapse`], dropping any
    /// frames pushed since.
    pub fn reinstate(&mut self, frames: Vec<ContextFrame>) {
        self.frames.truncate(1);
        self.frames.extend(frames);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContextFrame> {
        self.frames.iter()
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}
