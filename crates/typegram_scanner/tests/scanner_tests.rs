//! Scanner integration tests.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::TokenFlags;
use typegram_scanner::{ContextFrame, Scanner};

/// Scan all tokens and return (kind, value) pairs.
fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    Scanner::new(source).map(|t| (t.kind, t.value)).collect()
}

fn scan_kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_source() {
    assert!(scan_all("").is_empty());
    assert!(scan_all("   \n\t  ").is_empty());
}

#[test]
fn test_reserved_words_only() {
    let kinds = scan_kinds("if class const interface type enum declare");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::IfKeyword,
            SyntaxKind::ClassKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_soft_keywords_are_tagged() {
    let tags: Vec<_> = Scanner::new("interface type readonly keyof infer foo")
        .map(|t| t.contextual)
        .collect();
    assert_eq!(
        tags,
        vec![
            Some(ContextualKeyword::Interface),
            Some(ContextualKeyword::Type),
            Some(ContextualKeyword::Readonly),
            Some(ContextualKeyword::KeyOf),
            Some(ContextualKeyword::Infer),
            None,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_plain_identifier() {
    let tokens: Vec<_> = Scanner::new("interfaceX declare_ typeof").collect();
    assert_eq!(tokens[0].value, "interfaceX");
    assert_eq!(tokens[0].contextual, None);
    assert_eq!(tokens[1].contextual, None);
    assert_eq!(tokens[2].kind, SyntaxKind::TypeOfKeyword);
}

#[test]
fn test_generic_closers_in_type_frame() {
    let mut scanner = Scanner::new("A<B<C>>>= x");
    scanner.context_mut().push(ContextFrame::type_position());
    let kinds: Vec<_> = std::iter::from_fn(|| match scanner.scan_token() {
        SyntaxKind::EndOfFileToken => None,
        kind => Some(kind),
    })
    .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::EqualsToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_rescan_on_pop_merges_operator() {
    let mut scanner = Scanner::new("> = >=");
    scanner.context_mut().push(ContextFrame::type_position());
    scanner.scan_token();
    scanner.scan_token();
    assert_eq!(scanner.scan_token(), SyntaxKind::GreaterThanToken);
    scanner.context_mut().pop();
    assert_eq!(scanner.rescan_relational(), SyntaxKind::GreaterThanEqualsToken);
}

#[test]
fn test_token_positions() {
    let tokens: Vec<_> = Scanner::new("let x\n  = 42;").collect();
    assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
    assert_eq!((tokens[1].start, tokens[1].end), (4, 5));
    assert!(tokens[2].flags.contains(TokenFlags::PRECEDING_LINE_BREAK));
    assert_eq!(tokens[2].start_loc.line, 1);
    assert_eq!(tokens[2].start_loc.character, 2);
    assert_eq!(tokens[3].value, "42");
}

#[test]
fn test_numeric_literals() {
    let tokens = scan_all("42 3.14 0xFF 0b1010 0o77 1e-5 100n");
    let values: Vec<_> = tokens.iter().map(|(_, v)| v.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0xFF", "0b1010", "0o77", "1e-5", "100n"]);
    assert_eq!(tokens[6].0, SyntaxKind::BigIntLiteral);
}

#[test]
fn test_missing_exponent_digits() {
    let mut scanner = Scanner::new("1e");
    scanner.scan_token();
    assert_eq!(scanner.take_error().map(|d| d.code), Some(1124));
}

#[test]
fn test_string_literals() {
    let tokens = scan_all(r#""hello" 'wor\'ld' "a\
b""#);
    assert_eq!(tokens[0].1, "hello");
    assert_eq!(tokens[1].1, "wor'ld");
    assert_eq!(tokens[2].1, "ab");
}

#[test]
fn test_comments_are_collected() {
    let mut scanner = Scanner::new("// one\nx /* two */ y");
    while scanner.scan_token() != SyntaxKind::EndOfFileToken {}
    let texts: Vec<_> = scanner.comments().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec![" one", " two "]);
    assert_eq!(scanner.comments()[1].range.pos, 9);
}

#[test]
fn test_comments_not_collected_when_disabled() {
    let mut scanner = Scanner::new("// one\nx");
    scanner.set_collect_comments(false);
    while scanner.scan_token() != SyntaxKind::EndOfFileToken {}
    assert!(scanner.comments().is_empty());
}

#[test]
fn test_unterminated_block_comment() {
    let mut scanner = Scanner::new("x /* never closed");
    scanner.scan_token();
    scanner.scan_token();
    assert_eq!(scanner.kind(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.take_error().map(|d| d.code), Some(1010));
}

#[test]
fn test_invalid_character() {
    let tokens = scan_kinds("a ¤ b");
    assert_eq!(tokens, vec![SyntaxKind::Identifier, SyntaxKind::Unknown, SyntaxKind::Identifier]);
}

#[test]
fn test_shebang_skipping() {
    let mut scanner = Scanner::new("#!/usr/bin/env node\nconst x = 1;");
    scanner.skip_shebang();
    assert_eq!(scanner.scan_token(), SyntaxKind::ConstKeyword);
}

#[test]
fn test_template_with_substitutions() {
    let mut scanner = Scanner::new("`a${b}c${d}e`");
    assert_eq!(scanner.scan_token(), SyntaxKind::TemplateHead);
    scanner.scan_token();
    scanner.scan_token();
    assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.value(), "c");
    scanner.scan_token();
    scanner.scan_token();
    assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.value(), "e");
}

#[test]
fn test_optional_chain_versus_conditional() {
    assert_eq!(scan_kinds("a?.b")[1], SyntaxKind::QuestionDotToken);
    assert_eq!(scan_kinds("a?.5:1")[1], SyntaxKind::QuestionToken);
}
