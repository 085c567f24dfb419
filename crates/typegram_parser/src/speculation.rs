//! Lookahead and speculative parsing.
//!
//! A [`ParserState`] captures everything a speculative attempt can disturb:
//! the host's scanner, diagnostics and scopes, plus the parser's own context
//! bits. Restoring it leaves no trace of the attempt. Nested attempts each
//! hold their own snapshot.

use tracing::trace;
use typegram_ast::types::NodeFlags;
use typegram_diagnostics::PResult;
use typegram_scanner::Token;

use crate::host::HostGrammar;
use crate::parser::Parser;

/// Saved parser state.
pub struct ParserState<S> {
    host: S,
    context_flags: NodeFlags,
    depth: u32,
    in_conditional_consequent: bool,
}

impl<'a, H: HostGrammar> Parser<'a, H> {
    pub fn snapshot(&mut self) -> ParserState<H::State> {
        ParserState {
            host: self.host.checkpoint(),
            context_flags: self.context_flags,
            depth: self.depth,
            in_conditional_consequent: self.in_conditional_consequent,
        }
    }

    pub fn restore(&mut self, state: ParserState<H::State>) {
        self.host.rewind(state.host);
        self.context_flags = state.context_flags;
        self.depth = state.depth;
        self.in_conditional_consequent = state.in_conditional_consequent;
    }

    fn commit(&mut self, state: ParserState<H::State>) {
        self.host.commit(state.host);
    }

    /// Run `f` and keep its result only if it matched.
    ///
    /// `Ok(None)` means "not this production". An error raised inside the
    /// attempt is also treated as no match; either way the parser is put back
    /// exactly where it was.
    pub fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<Option<T>>) -> Option<T> {
        let state = self.snapshot();
        match f(self) {
            Ok(Some(value)) => {
                self.commit(state);
                Some(value)
            }
            Ok(None) => {
                trace!(pos = self.token_pos(), "speculation did not match");
                self.restore(state);
                None
            }
            Err(err) => {
                trace!(pos = self.token_pos(), code = err.code(), "speculation failed");
                self.restore(state);
                None
            }
        }
    }

    /// Run `f` with the lexer speculating and always rewind afterwards.
    /// An error counts as the default answer.
    pub fn look_ahead<T: Default>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> T {
        let state = self.snapshot();
        let was_speculating = self.host.set_speculating(true);
        let result = f(self);
        self.host.set_speculating(was_speculating);
        self.restore(state);
        result.unwrap_or_default()
    }

    /// The token after the current one.
    pub fn lookahead(&mut self) -> Token {
        self.look_ahead(|p| {
            p.next_token()?;
            Ok(p.token().clone())
        })
    }

    pub(crate) fn next_token_is(&mut self, predicate: impl FnOnce(&Token) -> bool) -> bool {
        let next = self.lookahead();
        predicate(&next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SourceHost;
    use bumpalo::Bump;
    use typegram_ast::syntax_kind::SyntaxKind;
    use typegram_diagnostics::messages;

    type SourceParser<'a> = Parser<'a, SourceHost>;

    /// Current token, diagnostic count and comment count.
    fn observe(parser: &SourceParser<'_>) -> (Token, usize, usize) {
        (
            parser.token().clone(),
            parser.host().diagnostics().len(),
            parser.host().scanner().comments().len(),
        )
    }

    fn consume_then_fail(p: &mut SourceParser<'_>) -> PResult<Option<SyntaxKind>> {
        p.next_token()?;
        p.next_token()?;
        p.recoverable(p.token_span(), &messages::_0_EXPECTED, &[","]);
        p.next_token()?;
        Err(p.error_here(&messages::_0_EXPECTED, &[")"]))
    }

    fn consume_two(p: &mut SourceParser<'_>) -> PResult<Option<SyntaxKind>> {
        p.next_token()?;
        p.next_token()?;
        Ok(Some(p.kind()))
    }

    #[test]
    fn test_failed_attempt_is_idempotent() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "a /* one */ < b /* two */ > (c);");
        parser.next_token().unwrap();
        let before = observe(&parser);

        assert_eq!(parser.try_parse(consume_then_fail), None);
        let first = observe(&parser);
        assert_eq!(parser.try_parse(consume_then_fail), None);
        let second = observe(&parser);

        assert_eq!(first, before);
        assert_eq!(second, before);
        assert_eq!(parser.kind(), SyntaxKind::Identifier);
    }

    #[test]
    fn test_successful_attempt_is_idempotent() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "a /* one */ < b /* two */ > (c);");
        parser.next_token().unwrap();
        let before = observe(&parser);

        let state = parser.snapshot();
        let first_result = parser.try_parse(consume_two);
        let first = observe(&parser);
        parser.restore(state);
        assert_eq!(observe(&parser), before);

        let state = parser.snapshot();
        let second_result = parser.try_parse(consume_two);
        let second = observe(&parser);
        parser.restore(state);

        assert_eq!(first_result, Some(SyntaxKind::Identifier));
        assert_eq!(first_result, second_result);
        assert_eq!(first, second);
        assert_eq!(first.1, 0);
        assert_eq!(first.2, 1);
        assert_eq!(observe(&parser), before);
    }
}
