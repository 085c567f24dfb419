//! Scoped parser context: tokenizer frames and context flags.
//!
//! Every helper here restores what it changed on all exit paths, including
//! when the inner parse returns an error.

use tracing::trace;
use typegram_ast::types::NodeFlags;
use typegram_diagnostics::PResult;
use typegram_scanner::ContextFrame;

use crate::host::HostGrammar;
use crate::parser::Parser;

impl<'a, H: HostGrammar> Parser<'a, H> {
    // ========================================================================
    // Tokenizer frames
    // ========================================================================

    /// Push a frame and re-read the current token under it.
    pub fn push_context(&mut self, frame: ContextFrame) {
        trace!(frame = frame.tag, depth = self.host.context().depth(), "push context");
        self.host.context_mut().push(frame);
        self.host.rescan_relational();
    }

    /// Pop the innermost frame and re-read the current token under the
    /// frame below it.
    pub fn pop_context(&mut self) {
        if let Some(frame) = self.host.context_mut().pop() {
            trace!(frame = frame.tag, depth = self.host.context().depth(), "pop context");
        }
        self.host.rescan_relational();
    }

    pub fn current_context(&self) -> &ContextFrame {
        self.host.context().current()
    }

    pub fn with_context<T>(&mut self, frame: ContextFrame, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.push_context(frame);
        let result = f(self);
        self.pop_context();
        result
    }

    /// Run `f` in type position.
    pub fn in_type<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_flag(NodeFlags::TYPE_CONTEXT, true, |p| p.with_context(ContextFrame::type_position(), f))
    }

    /// Run `f` with only the outermost frame active.
    pub fn run_with_empty_context<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let saved = self.host.context_mut().collapse();
        self.host.rescan_relational();
        let result = f(self);
        self.host.context_mut().reinstate(saved);
        self.host.rescan_relational();
        result
    }

    // ========================================================================
    // Context flags
    // ========================================================================

    /// Run `f` with `flag` set to `value`, restoring only that bit.
    pub(crate) fn with_flag<T>(
        &mut self,
        flag: NodeFlags,
        value: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = self.context_flags & flag;
        self.context_flags.set(flag, value);
        let result = f(self);
        self.context_flags.remove(flag);
        self.context_flags.insert(saved);
        result
    }

    #[inline]
    pub fn in_ambient_context(&self) -> bool {
        self.context_flags.contains(NodeFlags::AMBIENT)
    }

    pub fn with_ambient_context<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_flag(NodeFlags::AMBIENT, true, f)
    }

    #[inline]
    pub(crate) fn in_disallow_conditional_types_context(&self) -> bool {
        self.context_flags.contains(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT)
    }

    pub(crate) fn disallow_conditional_types<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_flag(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, true, f)
    }

    pub(crate) fn allow_conditional_types<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_flag(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, false, f)
    }

    #[inline]
    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.context_flags.contains(NodeFlags::DISALLOW_IN_CONTEXT)
    }

    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.with_flag(NodeFlags::DISALLOW_IN_CONTEXT, false, f)
    }

    #[inline]
    pub(crate) fn in_function_context(&self) -> bool {
        self.context_flags.contains(NodeFlags::FUNCTION_CONTEXT)
    }

    /// Set or clear the conditional-consequent marker around `f`.
    pub(crate) fn with_conditional_consequent<T>(
        &mut self,
        value: bool,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let saved = std::mem::replace(&mut self.in_conditional_consequent, value);
        let result = f(self);
        self.in_conditional_consequent = saved;
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::host::HostGrammar;
    use crate::options::ParserOptions;
    use crate::parser::Parser;
    use bumpalo::Bump;
    use typegram_ast::syntax_kind::SyntaxKind;
    use typegram_ast::types::NodeFlags;
    use typegram_diagnostics::{messages, PResult};
    use typegram_scanner::ContextFrame;

    #[test]
    fn test_type_frame_splits_and_merges_closers() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", ">> x");
        parser.next_token().unwrap();
        assert_eq!(parser.kind(), SyntaxKind::GreaterThanGreaterThanToken);
        parser.push_context(ContextFrame::type_position());
        assert_eq!(parser.kind(), SyntaxKind::GreaterThanToken);
        parser.pop_context();
        assert_eq!(parser.kind(), SyntaxKind::GreaterThanGreaterThanToken);
    }

    #[test]
    fn test_frames_pop_on_error() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "x");
        let depth = parser.host.context().depth();
        let result: PResult<()> = parser.in_type(|p| Err(p.error_here(&messages::TYPE_EXPECTED, &[])));
        assert!(result.is_err());
        assert_eq!(parser.host.context().depth(), depth);
        assert!(!parser.context_flags.contains(NodeFlags::TYPE_CONTEXT));
    }

    #[test]
    fn test_with_flag_restores_only_its_bit() {
        let arena = Bump::new();
        let options = ParserOptions { ambient: true, ..ParserOptions::default() };
        let mut parser = Parser::with_options(&arena, "t.ts", "x", options);
        let inner = parser
            .disallow_conditional_types(|p| {
                p.context_flags.remove(NodeFlags::AMBIENT);
                Ok(p.in_disallow_conditional_types_context())
            })
            .unwrap();
        assert!(inner);
        assert!(!parser.in_disallow_conditional_types_context());
        assert!(!parser.in_ambient_context());
    }

    #[test]
    fn test_empty_context_collapses_and_restores() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "x");
        parser.push_context(ContextFrame::type_position());
        let depth = parser
            .run_with_empty_context(|p| Ok(p.host.context().depth()))
            .unwrap();
        assert_eq!(depth, 1);
        assert!(parser.current_context().is_type());
    }
}
