//! Contextual keyword checks.
//!
//! Soft keywords arrive from the scanner as identifiers tagged with
//! [`Token::contextual`]. The tag is only set for words spelled without
//! escapes, and the scanner always reads a whole word, so `interfaceX` is
//! never mistaken for `interface`.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_core::text::TextPos;
use typegram_diagnostics::{messages, PResult};
use typegram_scanner::Token;

use crate::host::HostGrammar;
use crate::parser::Parser;

impl<'a, H: HostGrammar> Parser<'a, H> {
    pub fn is_contextual_keyword(&self, token: &Token) -> bool {
        token.kind == SyntaxKind::Identifier && token.contextual.is_some()
    }

    /// Whether the current token is the soft keyword `keyword`.
    #[inline]
    pub fn is_contextual(&self, keyword: ContextualKeyword) -> bool {
        self.token().is_contextual(keyword)
    }

    /// Whether the raw text at `pos`, after trivia, is exactly the word
    /// `keyword`. Nothing is tokenized.
    pub fn matches_unparsed_contextual(&self, pos: TextPos, keyword: ContextualKeyword) -> bool {
        self.host.matches_word_at(pos, keyword.text())
    }

    /// Consume the current token if it is `keyword`; reports whether it did.
    pub fn eat_if_contextual(&mut self, keyword: ContextualKeyword) -> PResult<bool> {
        if self.is_contextual(keyword) {
            self.next_token()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn expect_contextual(&mut self, keyword: ContextualKeyword) -> PResult<()> {
        if self.eat_if_contextual(keyword)? {
            return Ok(());
        }
        Err(self.error_here(&messages::_0_EXPECTED, &[keyword.text()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    #[test]
    fn test_eat_if_contextual_reports_consumption() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "readonly x");
        parser.next_token().unwrap();
        assert!(!parser.eat_if_contextual(ContextualKeyword::KeyOf).unwrap());
        assert!(parser.eat_if_contextual(ContextualKeyword::Readonly).unwrap());
        assert_eq!(parser.token().value, "x");
        assert!(!parser.eat_if_contextual(ContextualKeyword::Readonly).unwrap());
    }

    #[test]
    fn test_escaped_word_is_not_a_keyword() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", r"\u0074ype T");
        parser.next_token().unwrap();
        assert_eq!(parser.token().value, "type");
        assert!(!parser.is_contextual(ContextualKeyword::Type));
        assert!(!parser.is_contextual_keyword(parser.token()));
    }

    #[test]
    fn test_unparsed_match_respects_word_boundary() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "x interfaceX /* c */ interface");
        parser.next_token().unwrap();
        assert!(!parser.matches_unparsed_contextual(1, ContextualKeyword::Interface));
        assert!(parser.matches_unparsed_contextual(13, ContextualKeyword::Interface));
    }

    #[test]
    fn test_expect_contextual_error() {
        let arena = Bump::new();
        let mut parser = Parser::new(&arena, "t.ts", "foo");
        parser.next_token().unwrap();
        let err = parser.expect_contextual(ContextualKeyword::As).unwrap_err();
        assert_eq!(err.code(), 1005);
    }
}
