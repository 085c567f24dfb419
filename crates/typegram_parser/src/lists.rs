//! Delimited lists, signatures, parameters and heritage clauses.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::ModifierFlags;
use typegram_core::text::{TextPos, TextSpan};
use typegram_diagnostics::{messages, PResult};
use typegram_scanner::Token;

use crate::host::HostGrammar;
use crate::modifiers::ModifierRules;
use crate::parser::Parser;

/// What a delimited list holds; decides its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Parameters,
    TypeParameters,
    TypeArguments,
    TupleElements,
    EnumMembers,
    HeritageClauseElements,
    ArgumentExpressions,
    ArrayLiteralMembers,
    ObjectLiteralMembers,
    ImportOrExportSpecifiers,
    VariableDeclarations,
    ObjectBindingElements,
    ArrayBindingElements,
    IndexSignatureParameters,
}

impl ListKind {
    pub fn is_terminator(self, token: &Token) -> bool {
        if token.kind == SyntaxKind::EndOfFileToken {
            return true;
        }
        match self {
            ListKind::Parameters | ListKind::ArgumentExpressions => token.kind == SyntaxKind::CloseParenToken,
            ListKind::TypeParameters | ListKind::TypeArguments => token.kind == SyntaxKind::GreaterThanToken,
            ListKind::TupleElements
            | ListKind::ArrayLiteralMembers
            | ListKind::ArrayBindingElements
            | ListKind::IndexSignatureParameters => token.kind == SyntaxKind::CloseBracketToken,
            ListKind::EnumMembers
            | ListKind::ObjectLiteralMembers
            | ListKind::ImportOrExportSpecifiers
            | ListKind::ObjectBindingElements => token.kind == SyntaxKind::CloseBraceToken,
            ListKind::HeritageClauseElements | ListKind::VariableDeclarations => false,
        }
    }

    /// Lists with no closing token end at the first element not followed
    /// by a comma.
    pub fn is_open_ended(self) -> bool {
        matches!(self, ListKind::HeritageClauseElements | ListKind::VariableDeclarations)
    }

    /// Tokens that close an open-ended list when they follow a comma.
    fn ends_after_comma(self, token: &Token) -> bool {
        match self {
            ListKind::HeritageClauseElements => {
                token.kind == SyntaxKind::OpenBraceToken
                    || token.kind == SyntaxKind::ExtendsKeyword
                    || token.contextual == Some(ContextualKeyword::Implements)
            }
            _ => false,
        }
    }
}

/// The elements of a comma-separated list.
#[derive(Debug)]
pub struct DelimitedList<T> {
    pub elements: Vec<T>,
    /// Span of a comma directly before the terminator.
    pub trailing_comma: Option<TextSpan>,
    pub pos: TextPos,
    pub end: TextPos,
}

impl<T> DelimitedList<T> {
    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Brace,
    Angle,
}

impl Bracket {
    pub fn open(self) -> SyntaxKind {
        match self {
            Bracket::Paren => SyntaxKind::OpenParenToken,
            Bracket::Square => SyntaxKind::OpenBracketToken,
            Bracket::Brace => SyntaxKind::OpenBraceToken,
            Bracket::Angle => SyntaxKind::LessThanToken,
        }
    }

    pub fn close(self) -> SyntaxKind {
        match self {
            Bracket::Paren => SyntaxKind::CloseParenToken,
            Bracket::Square => SyntaxKind::CloseBracketToken,
            Bracket::Brace => SyntaxKind::CloseBraceToken,
            Bracket::Angle => SyntaxKind::GreaterThanToken,
        }
    }
}

/// How a signature introduces its return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureReturn {
    /// Optional `: T`, as on declarations.
    Colon,
    /// Required `=> T`, as on function and constructor types.
    Arrow,
}

impl<'a, H: HostGrammar> Parser<'a, H> {
    // ========================================================================
    // Lists
    // ========================================================================

    /// Parse elements separated by commas until `kind`'s terminator.
    /// A single trailing comma is accepted and recorded.
    pub fn parse_delimited_list<T>(
        &mut self,
        kind: ListKind,
        mut parse_element: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<DelimitedList<T>> {
        let pos = self.token_pos();
        let mut elements = Vec::new();
        let mut trailing_comma = None;
        while !kind.is_terminator(self.token()) {
            elements.push(parse_element(self)?);
            if self.at(SyntaxKind::CommaToken) {
                let comma = self.token_span();
                self.next_token()?;
                if kind.is_terminator(self.token()) || kind.ends_after_comma(self.token()) {
                    trailing_comma = Some(comma);
                    if kind.is_open_ended() {
                        break;
                    }
                }
                continue;
            }
            if kind.is_open_ended() || kind.is_terminator(self.token()) {
                break;
            }
            return Err(self.error_here(&messages::_0_EXPECTED, &[","]));
        }
        let end = self.host.prev_token_end().max(pos);
        Ok(DelimitedList { elements, trailing_comma, pos, end })
    }

    /// A delimited list between `bracket`'s open and close tokens. With
    /// `skip_first` the opening token has already been consumed.
    pub fn parse_bracketed_list<T>(
        &mut self,
        kind: ListKind,
        bracket: Bracket,
        skip_first: bool,
        parse_element: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<DelimitedList<T>> {
        let pos = if skip_first {
            self.host.prev_token_end().saturating_sub(1)
        } else {
            let pos = self.token_pos();
            self.expect(bracket.open())?;
            pos
        };
        let mut list = self.parse_delimited_list(kind, parse_element)?;
        self.expect(bracket.close())?;
        list.pos = pos;
        list.end = self.host.prev_token_end();
        Ok(list)
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    /// Optional type parameters, a parameter list and a return annotation.
    pub fn fill_signature(&mut self, return_token: SignatureReturn) -> PResult<Signature<'a>> {
        let type_parameters = if self.at(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters(false)?)
        } else {
            None
        };
        let parameters = self.parse_parameters()?;
        let return_type = match return_token {
            SignatureReturn::Colon => {
                if self.eat(SyntaxKind::ColonToken)? {
                    Some(self.parse_type_or_type_predicate_annotation()?)
                } else {
                    None
                }
            }
            SignatureReturn::Arrow => {
                self.expect(SyntaxKind::EqualsGreaterThanToken)?;
                Some(self.parse_type_or_type_predicate_annotation()?)
            }
        };
        Ok(Signature { type_parameters, parameters, return_type })
    }

    pub(crate) fn parse_parameters(&mut self) -> PResult<&'a [ParameterDeclaration<'a>]> {
        let list = self.parse_bracketed_list(ListKind::Parameters, Bracket::Paren, false, |p| p.parse_parameter())?;
        self.check_rest_parameters(&list)?;
        Ok(self.alloc_list(list.elements))
    }

    fn check_rest_parameters(&self, list: &DelimitedList<ParameterDeclaration<'a>>) -> PResult<()> {
        let last = list.elements.len().saturating_sub(1);
        for (index, parameter) in list.elements.iter().enumerate() {
            if !parameter.dot_dot_dot {
                continue;
            }
            if index != last {
                return Err(self.error_at(parameter.data.range.to_span(), &messages::A_REST_PARAMETER_MUST_BE_LAST, &[]));
            }
            if let Some(comma) = list.trailing_comma {
                return Err(self.error_at(
                    comma,
                    &messages::A_REST_PARAMETER_OR_BINDING_PATTERN_MAY_NOT_HAVE_A_TRAILING_COMMA,
                    &[],
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn parse_parameter(&mut self) -> PResult<ParameterDeclaration<'a>> {
        let pos = self.token_pos();
        let modifiers = self.parse_modifiers(&ModifierRules::PARAMETER, None)?;
        let dot_dot_dot = self.eat(SyntaxKind::DotDotDotToken)?;
        let name = if self.at(SyntaxKind::ThisKeyword) {
            BindingName::Identifier(self.parse_identifier_name()?)
        } else {
            self.parse_binding_name()?
        };
        let question = self.eat(SyntaxKind::QuestionToken)?;
        let type_annotation = if self.eat(SyntaxKind::ColonToken)? {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };
        let initializer = if self.eat(SyntaxKind::EqualsToken)? {
            let expression = self.allow_in(|p| p.parse_assignment_expression())?;
            Some(self.alloc(expression))
        } else {
            None
        };
        Ok(ParameterDeclaration {
            data: self.finish(SyntaxKind::Parameter, pos).with_modifiers(modifiers.flags),
            dot_dot_dot,
            name,
            question,
            type_annotation,
            initializer,
        })
    }

    /// Report parameter properties where they are not allowed.
    pub(crate) fn check_parameter_properties(&mut self, signature: &Signature<'a>, allowed: bool) {
        if allowed {
            return;
        }
        for parameter in signature.parameters {
            if parameter.data.has_modifier(ModifierFlags::PARAMETER_PROPERTY_MODIFIER) {
                self.recoverable(
                    parameter.data.range.to_span(),
                    &messages::A_PARAMETER_PROPERTY_IS_ONLY_ALLOWED_IN_A_CONSTRUCTOR_IMPLEMENTATION,
                    &[],
                );
            }
        }
    }

    // ========================================================================
    // Heritage clauses
    // ========================================================================

    pub(crate) fn parse_heritage_clauses(&mut self) -> PResult<&'a [HeritageClause<'a>]> {
        let mut clauses = Vec::new();
        while self.at(SyntaxKind::ExtendsKeyword) || self.is_contextual(ContextualKeyword::Implements) {
            clauses.push(self.parse_heritage_clause()?);
        }
        Ok(self.alloc_list(clauses))
    }

    /// `extends A, B<T>` or `implements C`.
    pub fn parse_heritage_clause(&mut self) -> PResult<HeritageClause<'a>> {
        let pos = self.token_pos();
        let token = if self.at(SyntaxKind::ExtendsKeyword) {
            HeritageClauseKind::Extends
        } else {
            HeritageClauseKind::Implements
        };
        let keyword = self.token_span();
        self.next_token()?;
        if self.at(SyntaxKind::OpenBraceToken) {
            return Err(self.error_at(keyword, &messages::_0_LIST_CANNOT_BE_EMPTY, &[token.text()]));
        }
        let list = self.parse_delimited_list(ListKind::HeritageClauseElements, |p| p.parse_expression_with_type_arguments())?;
        if let Some(comma) = list.trailing_comma {
            return Err(self.error_at(comma, &messages::TRAILING_COMMA_NOT_ALLOWED, &[]));
        }
        Ok(HeritageClause {
            data: self.finish(SyntaxKind::HeritageClause, pos),
            token,
            types: self.alloc_list(list.elements),
        })
    }

    fn parse_expression_with_type_arguments(&mut self) -> PResult<ExpressionWithTypeArguments<'a>> {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression_or_higher()?;
        let type_arguments = if self.at(SyntaxKind::LessThanToken) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        Ok(ExpressionWithTypeArguments {
            data: self.finish(SyntaxKind::ExpressionWithTypeArguments, pos),
            expression: self.alloc(expression),
            type_arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn parser<'a>(arena: &'a Bump, text: &str) -> Parser<'a> {
        let mut parser = Parser::new(arena, "t.ts", text);
        parser.next_token().unwrap();
        parser
    }

    #[test]
    fn test_trailing_comma_is_recorded() {
        let arena = Bump::new();
        let mut p = parser(&arena, "(a, b,)");
        let list = p
            .parse_bracketed_list(ListKind::Parameters, Bracket::Paren, false, |p| p.parse_identifier())
            .unwrap();
        assert_eq!(list.elements.len(), 2);
        assert_eq!(list.trailing_comma, Some(TextSpan::new(5, 1)));
        assert_eq!((list.pos, list.end), (0, 7));
    }

    #[test]
    fn test_missing_comma_is_fatal() {
        let arena = Bump::new();
        let mut p = parser(&arena, "(a b)");
        let err = p
            .parse_bracketed_list(ListKind::Parameters, Bracket::Paren, false, |p| p.parse_identifier())
            .unwrap_err();
        assert_eq!(err.code(), 1005);
        assert_eq!(err.span(), Some(TextSpan::new(3, 1)));
    }

    #[test]
    fn test_open_ended_list_stops_without_comma() {
        let arena = Bump::new();
        let mut p = parser(&arena, "a, b c");
        let list = p
            .parse_delimited_list(ListKind::VariableDeclarations, |p| p.parse_identifier())
            .unwrap();
        assert_eq!(list.elements.len(), 2);
        assert_eq!(p.token().value, "c");
    }

    #[test]
    fn test_rest_parameter_rules() {
        let arena = Bump::new();
        let err = parser(&arena, "(...a, b)").parse_parameters().unwrap_err();
        assert_eq!(err.code(), 1014);
        let err = parser(&arena, "(a, ...b,)").parse_parameters().unwrap_err();
        assert_eq!(err.code(), 1013);
        assert!(parser(&arena, "(a?: string, ...b: number[])").parse_parameters().is_ok());
    }

    #[test]
    fn test_fill_signature_arrow_requires_return_type() {
        let arena = Bump::new();
        let signature = parser(&arena, "<T>(x: T) => T").fill_signature(SignatureReturn::Arrow).unwrap();
        assert_eq!(signature.type_parameters.map(|t| t.len()), Some(1));
        assert!(signature.return_type.is_some());
        let err = parser(&arena, "(x)").fill_signature(SignatureReturn::Arrow).unwrap_err();
        assert_eq!(err.code(), 1005);
    }
}
