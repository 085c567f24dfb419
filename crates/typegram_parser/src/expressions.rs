//! Expressions: assignment and arrow functions down through primaries.
//!
//! Arrow functions and explicit type arguments on calls are both found by
//! speculation. An arrow's signature is tried first and only the signature
//! is rolled back on failure, so errors inside an arrow body are reported
//! where they occur.

use typegram_ast::keyword::ContextualKeyword;
use typegram_ast::node::*;
use typegram_ast::syntax_kind::SyntaxKind;
use typegram_ast::types::{ModifierFlags, NodeFlags};
use typegram_core::text::TextPos;
use typegram_diagnostics::{messages, PResult};

use crate::host::HostGrammar;
use crate::lists::{Bracket, ListKind, SignatureReturn};
use crate::parser::Parser;
use crate::precedence::{binary_operator_precedence, binds_tighter, OperatorPrecedence};

impl<'a, H: HostGrammar> Parser<'a, H> {
    /// A comma-separated sequence of assignment expressions.
    pub fn parse_expression(&mut self) -> PResult<Expression<'a>> {
        self.with_conditional_consequent(false, |p| {
            let pos = p.token_pos();
            let mut expression = p.parse_assignment_expression()?;
            while p.at(SyntaxKind::CommaToken) {
                p.next_token()?;
                let right = p.parse_assignment_expression()?;
                expression = Expression::Binary(BinaryExpression {
                    data: p.finish(SyntaxKind::BinaryExpression, pos),
                    left: p.alloc(expression),
                    operator: SyntaxKind::CommaToken,
                    right: p.alloc(right),
                });
            }
            Ok(expression)
        })
    }

    pub fn parse_assignment_expression(&mut self) -> PResult<Expression<'a>> {
        self.guarded(|p| {
            if let Some(arrow) = p.try_parse_arrow_function()? {
                return Ok(arrow);
            }
            let pos = p.token_pos();
            let expression = p.parse_binary_expression_or_higher(OperatorPrecedence::Lowest)?;
            let operator = p.kind();
            if operator.is_assignment_operator() && is_left_hand_side(&expression) {
                p.next_token()?;
                let right = p.parse_assignment_expression()?;
                return Ok(Expression::Binary(BinaryExpression {
                    data: p.finish(SyntaxKind::BinaryExpression, pos),
                    left: p.alloc(expression),
                    operator,
                    right: p.alloc(right),
                }));
            }
            p.parse_conditional_expression_rest(pos, expression)
        })
    }

    /// An element, argument or initializer nested inside brackets.
    fn parse_nested_expression(&mut self) -> PResult<Expression<'a>> {
        self.with_conditional_consequent(false, |p| p.allow_in(|p| p.parse_assignment_expression()))
    }

    fn parse_conditional_expression_rest(&mut self, pos: TextPos, condition: Expression<'a>) -> PResult<Expression<'a>> {
        if !self.eat(SyntaxKind::QuestionToken)? {
            return Ok(condition);
        }
        let when_true =
            self.with_conditional_consequent(true, |p| p.allow_in(|p| p.parse_assignment_expression()))?;
        self.expect(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        Ok(Expression::Conditional(ConditionalExpression {
            data: self.finish(SyntaxKind::ConditionalExpression, pos),
            condition: self.alloc(condition),
            when_true: self.alloc(when_true),
            when_false: self.alloc(when_false),
        }))
    }

    // ========================================================================
    // Arrow functions
    // ========================================================================

    fn try_parse_arrow_function(&mut self) -> PResult<Option<Expression<'a>>> {
        let pos = self.token_pos();
        if self.at(SyntaxKind::Identifier)
            && self.next_token_is(|t| t.kind == SyntaxKind::EqualsGreaterThanToken && !t.has_preceding_line_break())
        {
            let name = self.parse_identifier()?;
            let parameter = ParameterDeclaration {
                data: self.finish(SyntaxKind::Parameter, pos),
                dot_dot_dot: false,
                name: BindingName::Identifier(name),
                question: false,
                type_annotation: None,
                initializer: None,
            };
            let signature = Signature {
                type_parameters: None,
                parameters: self.alloc_list(vec![parameter]),
                return_type: None,
            };
            return self.parse_arrow_function_rest(pos, signature).map(Some);
        }
        if !matches!(self.kind(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            return Ok(None);
        }
        if self.in_conditional_consequent {
            // `a ? (x): T => y : z`: a return type is only kept when the
            // whole arrow is followed by the `:` of the conditional.
            return Ok(self.try_parse(|p| {
                let Some(signature) = p.parse_arrow_signature()? else {
                    return Ok(None);
                };
                let arrow = p.parse_arrow_function_rest(pos, signature)?;
                Ok((signature.return_type.is_none() || p.at(SyntaxKind::ColonToken)).then_some(arrow))
            }));
        }
        match self.try_parse(|p| p.parse_arrow_signature()) {
            Some(signature) => self.parse_arrow_function_rest(pos, signature).map(Some),
            None => Ok(None),
        }
    }

    /// `<T>(params): R` followed by `=>` on the same line.
    fn parse_arrow_signature(&mut self) -> PResult<Option<Signature<'a>>> {
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        if !self.at(SyntaxKind::EqualsGreaterThanToken) || self.has_preceding_line_break() {
            return Ok(None);
        }
        Ok(Some(signature))
    }

    fn parse_arrow_function_rest(&mut self, pos: TextPos, signature: Signature<'a>) -> PResult<Expression<'a>> {
        self.check_parameter_properties(&signature, false);
        self.expect(SyntaxKind::EqualsGreaterThanToken)?;
        let body = if self.at(SyntaxKind::OpenBraceToken) {
            ArrowFunctionBody::Block(self.parse_function_body()?)
        } else {
            let expression = self.parse_assignment_expression()?;
            ArrowFunctionBody::Expression(self.alloc(expression))
        };
        Ok(Expression::ArrowFunction(ArrowFunction {
            data: self.finish(SyntaxKind::ArrowFunction, pos),
            signature,
            body,
        }))
    }

    // ========================================================================
    // Binary and unary operators
    // ========================================================================

    fn parse_binary_expression_or_higher(&mut self, precedence: OperatorPrecedence) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let left = self.parse_unary_expression_or_higher()?;
        self.parse_binary_expression_rest(pos, precedence, left)
    }

    fn parse_binary_expression_rest(
        &mut self,
        pos: TextPos,
        precedence: OperatorPrecedence,
        mut left: Expression<'a>,
    ) -> PResult<Expression<'a>> {
        loop {
            let is_as = self.is_contextual(ContextualKeyword::As);
            if (is_as || self.is_contextual(ContextualKeyword::Satisfies)) && !self.has_preceding_line_break() {
                if OperatorPrecedence::Relational <= precedence {
                    break;
                }
                self.next_token()?;
                let type_node = if is_as && self.at(SyntaxKind::ConstKeyword) {
                    self.parse_const_type_reference()?
                } else {
                    self.parse_type_annotation()?
                };
                let assertion = TypeAssertionExpression {
                    data: self.finish(
                        if is_as { SyntaxKind::AsExpression } else { SyntaxKind::SatisfiesExpression },
                        pos,
                    ),
                    expression: self.alloc(left),
                    type_node,
                };
                left = if is_as { Expression::As(assertion) } else { Expression::Satisfies(assertion) };
                continue;
            }

            let operator = self.kind();
            if operator == SyntaxKind::InKeyword && self.in_disallow_in_context() {
                break;
            }
            let Some(operator_precedence) = binary_operator_precedence(operator) else {
                break;
            };
            if !binds_tighter(operator, operator_precedence, precedence) {
                break;
            }
            self.next_token()?;
            let right = self.guarded(|p| p.parse_binary_expression_or_higher(operator_precedence))?;
            left = Expression::Binary(BinaryExpression {
                data: self.finish(SyntaxKind::BinaryExpression, pos),
                left: self.alloc(left),
                operator,
                right: self.alloc(right),
            });
        }
        Ok(left)
    }

    /// The `const` of `as const`, kept as a type reference named `const`.
    fn parse_const_type_reference(&mut self) -> PResult<&'a TypeNode<'a>> {
        self.in_type(|p| {
            let pos = p.token_pos();
            p.expect(SyntaxKind::ConstKeyword)?;
            let name = Identifier { data: p.finish(SyntaxKind::Identifier, pos), text: "const" };
            let reference = TypeNode::TypeReference(TypeReferenceNode {
                data: p.finish(SyntaxKind::TypeReference, pos),
                type_name: EntityName::Identifier(name),
                type_arguments: None,
            });
            Ok(p.alloc(reference))
        })
    }

    fn parse_unary_expression_or_higher(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let operator = self.kind();
        match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                self.next_token()?;
                let operand = self.guarded(|p| p.parse_unary_expression_or_higher())?;
                Ok(self.prefix_unary(pos, operator, operand))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token()?;
                let operand = self.guarded(|p| p.parse_left_hand_side_expression_or_higher())?;
                Ok(self.prefix_unary(pos, operator, operand))
            }
            SyntaxKind::LessThanToken => self.parse_type_assertion(),
            _ => {
                let expression = self.parse_left_hand_side_expression_or_higher()?;
                let operator = self.kind();
                if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !self.has_preceding_line_break()
                {
                    self.next_token()?;
                    return Ok(Expression::PostfixUnary(UnaryExpression {
                        data: self.finish(SyntaxKind::PostfixUnaryExpression, pos),
                        operator,
                        operand: self.alloc(expression),
                    }));
                }
                Ok(expression)
            }
        }
    }

    fn prefix_unary(&self, pos: TextPos, operator: SyntaxKind, operand: Expression<'a>) -> Expression<'a> {
        Expression::PrefixUnary(UnaryExpression {
            data: self.finish(SyntaxKind::PrefixUnaryExpression, pos),
            operator,
            operand: self.alloc(operand),
        })
    }

    /// `<T>expr`
    fn parse_type_assertion(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let type_node = self.in_type(|p| {
            p.expect(SyntaxKind::LessThanToken)?;
            let type_node = p.parse_type()?;
            p.expect(SyntaxKind::GreaterThanToken)?;
            Ok(p.alloc(type_node))
        })?;
        let operand = self.guarded(|p| p.parse_unary_expression_or_higher())?;
        Ok(Expression::TypeAssertion(TypeAssertionExpression {
            data: self.finish(SyntaxKind::TypeAssertionExpression, pos),
            expression: self.alloc(operand),
            type_node,
        }))
    }

    // ========================================================================
    // Member access and calls
    // ========================================================================

    pub(crate) fn parse_left_hand_side_expression_or_higher(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let expression = match self.kind() {
            SyntaxKind::NewKeyword => self.parse_new_expression()?,
            SyntaxKind::SuperKeyword => {
                self.next_token()?;
                Expression::Super(self.finish(SyntaxKind::SuperKeyword, pos))
            }
            _ => self.parse_primary_expression()?,
        };
        self.parse_member_and_call_rest(pos, expression, true)
    }

    /// Property and element access, non-null assertions, and with
    /// `allow_calls` also calls, tagged templates and optional chains.
    fn parse_member_and_call_rest(
        &mut self,
        pos: TextPos,
        mut expression: Expression<'a>,
        allow_calls: bool,
    ) -> PResult<Expression<'a>> {
        let mut in_chain = false;
        loop {
            let question_dot = allow_calls && self.at(SyntaxKind::QuestionDotToken);
            if question_dot {
                self.next_token()?;
                in_chain = true;
            }
            let chain = if in_chain { NodeFlags::OPTIONAL_CHAIN } else { NodeFlags::NONE };
            expression = match self.kind() {
                SyntaxKind::DotToken if !question_dot => {
                    self.next_token()?;
                    self.property_access(pos, expression, false, chain)?
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token()?;
                    let argument = self.with_conditional_consequent(false, |p| p.allow_in(|p| p.parse_expression()))?;
                    self.expect(SyntaxKind::CloseBracketToken)?;
                    Expression::ElementAccess(ElementAccessExpression {
                        data: self.finish(SyntaxKind::ElementAccessExpression, pos).with_flags(chain),
                        expression: self.alloc(expression),
                        question_dot,
                        argument_expression: self.alloc(argument),
                    })
                }
                SyntaxKind::ExclamationToken if !question_dot && !self.has_preceding_line_break() => {
                    self.next_token()?;
                    Expression::NonNull(ParenthesizedExpression {
                        data: self.finish(SyntaxKind::NonNullExpression, pos).with_flags(chain),
                        expression: self.alloc(expression),
                    })
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead if allow_calls && !in_chain => {
                    self.tagged_template(pos, expression, None)?
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments()?;
                    self.call(pos, expression, question_dot, None, arguments, chain)
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    let Some(type_arguments) = self.try_parse(|p| p.parse_type_arguments_in_expression()) else {
                        if question_dot {
                            return Err(self.error_here(&messages::IDENTIFIER_EXPECTED, &[]));
                        }
                        break;
                    };
                    if self.at(SyntaxKind::OpenParenToken) {
                        let arguments = self.parse_arguments()?;
                        self.call(pos, expression, question_dot, Some(type_arguments), arguments, chain)
                    } else {
                        self.tagged_template(pos, expression, Some(type_arguments))?
                    }
                }
                _ if question_dot => self.property_access(pos, expression, true, chain)?,
                _ => break,
            };
        }
        Ok(expression)
    }

    fn property_access(
        &mut self,
        pos: TextPos,
        expression: Expression<'a>,
        question_dot: bool,
        chain: NodeFlags,
    ) -> PResult<Expression<'a>> {
        let name = if self.at(SyntaxKind::PrivateIdentifier) {
            self.parse_private_identifier()?
        } else {
            self.parse_identifier_name()?
        };
        Ok(Expression::PropertyAccess(PropertyAccessExpression {
            data: self.finish(SyntaxKind::PropertyAccessExpression, pos).with_flags(chain),
            expression: self.alloc(expression),
            question_dot,
            name,
        }))
    }

    fn call(
        &self,
        pos: TextPos,
        expression: Expression<'a>,
        question_dot: bool,
        type_arguments: Option<&'a [TypeNode<'a>]>,
        arguments: &'a [Expression<'a>],
        chain: NodeFlags,
    ) -> Expression<'a> {
        Expression::Call(CallExpression {
            data: self.finish(SyntaxKind::CallExpression, pos).with_flags(chain),
            expression: self.alloc(expression),
            question_dot,
            type_arguments,
            arguments: Some(arguments),
        })
    }

    fn tagged_template(
        &mut self,
        pos: TextPos,
        tag: Expression<'a>,
        type_arguments: Option<&'a [TypeNode<'a>]>,
    ) -> PResult<Expression<'a>> {
        let template = if self.at(SyntaxKind::TemplateHead) {
            self.parse_template_expression()?
        } else {
            Expression::NoSubstitutionTemplateLiteral(self.parse_template_part(SyntaxKind::NoSubstitutionTemplateLiteral)?)
        };
        Ok(Expression::TaggedTemplate(TaggedTemplateExpression {
            data: self.finish(SyntaxKind::TaggedTemplateExpression, pos),
            tag: self.alloc(tag),
            type_arguments,
            template: self.alloc(template),
        }))
    }

    /// `<T>` that is only kept when a call or a template follows.
    fn parse_type_arguments_in_expression(&mut self) -> PResult<Option<&'a [TypeNode<'a>]>> {
        let type_arguments = self.parse_type_arguments()?;
        Ok(matches!(
            self.kind(),
            SyntaxKind::OpenParenToken | SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead
        )
        .then_some(type_arguments))
    }

    fn parse_arguments(&mut self) -> PResult<&'a [Expression<'a>]> {
        let list = self.parse_bracketed_list(ListKind::ArgumentExpressions, Bracket::Paren, false, |p| {
            p.parse_spread_or_expression()
        })?;
        Ok(self.alloc_list(list.elements))
    }

    fn parse_spread_or_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        if self.eat(SyntaxKind::DotDotDotToken)? {
            let expression = self.parse_nested_expression()?;
            return Ok(Expression::Spread(ParenthesizedExpression {
                data: self.finish(SyntaxKind::SpreadElement, pos),
                expression: self.alloc(expression),
            }));
        }
        self.parse_nested_expression()
    }

    /// `new C`, `new C<T>(args)`, `new new C()()`.
    fn parse_new_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::NewKeyword)?;
        let target_pos = self.token_pos();
        let target = if self.at(SyntaxKind::NewKeyword) {
            self.guarded(|p| p.parse_new_expression())?
        } else {
            self.parse_primary_expression()?
        };
        let target = self.parse_member_and_call_rest(target_pos, target, false)?;
        let type_arguments = if self.at(SyntaxKind::LessThanToken) {
            self.try_parse(|p| {
                let type_arguments = p.parse_type_arguments()?;
                Ok(p.at(SyntaxKind::OpenParenToken).then_some(type_arguments))
            })
        } else {
            None
        };
        let arguments = if self.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(Expression::New(CallExpression {
            data: self.finish(SyntaxKind::NewExpression, pos),
            expression: self.alloc(target),
            question_dot: false,
            type_arguments,
            arguments,
        }))
    }

    // ========================================================================
    // Primaries
    // ========================================================================

    fn parse_primary_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        match self.kind() {
            SyntaxKind::Identifier => Ok(Expression::Identifier(self.parse_identifier()?)),
            SyntaxKind::PrivateIdentifier => Ok(Expression::PrivateIdentifier(self.parse_private_identifier()?)),
            SyntaxKind::ThisKeyword => {
                self.next_token()?;
                Ok(Expression::This(self.finish(SyntaxKind::ThisKeyword, pos)))
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => self.parse_literal_expression(),
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                let expression = self.allow_in(|p| p.parse_expression())?;
                self.expect(SyntaxKind::CloseParenToken)?;
                Ok(Expression::Parenthesized(ParenthesizedExpression {
                    data: self.finish(SyntaxKind::ParenthesizedExpression, pos),
                    expression: self.alloc(expression),
                }))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class_like(pos, ModifierFlags::NONE, false, SyntaxKind::ClassExpression)?;
                Ok(Expression::ClassExpression(self.alloc(class)))
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                let kind = self.host.rescan_slash_token()?;
                Ok(Expression::RegularExpressionLiteral(self.parse_template_part(kind)?))
            }
            _ => Err(self.error_here(&messages::EXPRESSION_EXPECTED, &[])),
        }
    }

    /// String, numeric, bigint, boolean and `null` literals and templates
    /// without substitutions.
    pub(crate) fn parse_literal_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let kind = self.kind();
        match kind {
            SyntaxKind::StringLiteral => Ok(Expression::StringLiteral(self.parse_string_literal()?)),
            SyntaxKind::NumericLiteral => Ok(Expression::NumericLiteral(self.parse_numeric_literal()?)),
            SyntaxKind::BigIntLiteral => Ok(Expression::BigIntLiteral(self.parse_numeric_literal()?)),
            SyntaxKind::NoSubstitutionTemplateLiteral => Ok(Expression::NoSubstitutionTemplateLiteral(
                self.parse_template_part(SyntaxKind::NoSubstitutionTemplateLiteral)?,
            )),
            SyntaxKind::NullKeyword | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.next_token()?;
                let data = self.finish(kind, pos);
                Ok(match kind {
                    SyntaxKind::NullKeyword => Expression::Null(data),
                    SyntaxKind::TrueKeyword => Expression::True(data),
                    _ => Expression::False(data),
                })
            }
            _ => Err(self.error_here(&messages::EXPRESSION_EXPECTED, &[])),
        }
    }

    fn parse_template_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let head = self.parse_template_part(SyntaxKind::TemplateHead)?;
        let mut spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.with_conditional_consequent(false, |p| p.allow_in(|p| p.parse_expression()))?;
            let literal = self.parse_template_continuation()?;
            let is_tail = literal.data.kind == SyntaxKind::TemplateTail;
            spans.push(TemplateSpan {
                data: self.finish(SyntaxKind::TemplateSpan, span_pos),
                expression: self.alloc(expression),
                literal,
            });
            if is_tail {
                break;
            }
        }
        Ok(Expression::TemplateExpression(TemplateExpression {
            data: self.finish(SyntaxKind::TemplateExpression, pos),
            head,
            spans: self.alloc_list(spans),
        }))
    }

    fn parse_array_literal(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let list = self.parse_bracketed_list(ListKind::ArrayLiteralMembers, Bracket::Square, false, |p| {
            if p.at(SyntaxKind::CommaToken) {
                let pos = p.token_pos();
                return Ok(Expression::Omitted(p.finish(SyntaxKind::OmittedExpression, pos)));
            }
            p.parse_spread_or_expression()
        })?;
        Ok(Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.finish(SyntaxKind::ArrayLiteralExpression, pos),
            elements: self.alloc_list(list.elements),
        }))
    }

    fn parse_object_literal(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        let list = self.parse_bracketed_list(ListKind::ObjectLiteralMembers, Bracket::Brace, false, |p| {
            p.parse_object_literal_element()
        })?;
        Ok(Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.finish(SyntaxKind::ObjectLiteralExpression, pos),
            properties: self.alloc_list(list.elements),
        }))
    }

    fn parse_object_literal_element(&mut self) -> PResult<ObjectLiteralElement<'a>> {
        let pos = self.token_pos();
        if self.eat(SyntaxKind::DotDotDotToken)? {
            let expression = self.parse_nested_expression()?;
            return Ok(ObjectLiteralElement::SpreadAssignment(ParenthesizedExpression {
                data: self.finish(SyntaxKind::SpreadAssignment, pos),
                expression: self.alloc(expression),
            }));
        }

        if let Some(kind) = self.accessor_keyword() {
            self.next_token()?;
            let name = self.parse_property_name()?;
            let method = self.parse_object_method_rest(pos, kind, name, false, false)?;
            return Ok(if kind == SyntaxKind::GetAccessor {
                ObjectLiteralElement::GetAccessor(method)
            } else {
                ObjectLiteralElement::SetAccessor(method)
            });
        }

        if self.at(SyntaxKind::Identifier)
            && self.next_token_is(|t| {
                matches!(t.kind, SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken | SyntaxKind::EqualsToken)
            })
        {
            let name = self.parse_identifier()?;
            // `{ a = 1 }` is only valid once the literal becomes a pattern.
            let initializer = if self.eat(SyntaxKind::EqualsToken)? {
                let expression = self.parse_nested_expression()?;
                Some(self.alloc(expression))
            } else {
                None
            };
            return Ok(ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                data: self.finish(SyntaxKind::ShorthandPropertyAssignment, pos),
                name,
                initializer,
            }));
        }

        let asterisk = self.eat(SyntaxKind::AsteriskToken)?;
        let name = self.parse_property_name()?;
        let question = self.eat(SyntaxKind::QuestionToken)?;
        if asterisk || matches!(self.kind(), SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken) {
            let method = self.parse_object_method_rest(pos, SyntaxKind::MethodDeclaration, name, question, asterisk)?;
            return Ok(ObjectLiteralElement::Method(method));
        }
        self.expect(SyntaxKind::ColonToken)?;
        let initializer = self.parse_nested_expression()?;
        Ok(ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
            data: self.finish(SyntaxKind::PropertyAssignment, pos),
            name,
            initializer: self.alloc(initializer),
        }))
    }

    fn parse_object_method_rest(
        &mut self,
        pos: TextPos,
        kind: SyntaxKind,
        name: PropertyName<'a>,
        question: bool,
        asterisk: bool,
    ) -> PResult<MethodDeclaration<'a>> {
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        self.check_parameter_properties(&signature, false);
        let body = self.parse_function_body()?;
        Ok(MethodDeclaration {
            data: self.finish(kind, pos),
            name,
            question,
            asterisk,
            signature,
            body: Some(body),
        })
    }

    fn parse_function_expression(&mut self) -> PResult<Expression<'a>> {
        let pos = self.token_pos();
        self.expect(SyntaxKind::FunctionKeyword)?;
        let asterisk = self.eat(SyntaxKind::AsteriskToken)?;
        let name = if self.at(SyntaxKind::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        let signature = self.fill_signature(SignatureReturn::Colon)?;
        self.check_parameter_properties(&signature, false);
        let body = self.parse_function_body()?;
        let function = FunctionDeclaration {
            data: self.finish(SyntaxKind::FunctionExpression, pos),
            name,
            asterisk,
            signature,
            body: Some(body),
        };
        Ok(Expression::FunctionExpression(self.alloc(function)))
    }
}

/// Whether `expression` can stand on the left of an assignment operator.
fn is_left_hand_side(expression: &Expression<'_>) -> bool {
    !matches!(
        expression,
        Expression::PrefixUnary(_)
            | Expression::PostfixUnary(_)
            | Expression::Binary(_)
            | Expression::Conditional(_)
            | Expression::ArrowFunction(_)
            | Expression::TypeAssertion(_)
            | Expression::As(_)
            | Expression::Satisfies(_)
            | Expression::Spread(_)
            | Expression::Omitted(_)
    )
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;
    use bumpalo::Bump;
    use typegram_ast::node::*;
    use typegram_ast::syntax_kind::SyntaxKind;

    fn first_expression<'a>(arena: &'a Bump, source: &str) -> Expression<'a> {
        let file = Parser::new(arena, "t.ts", source).parse_source_file().unwrap();
        match file.statements[0] {
            Statement::ExpressionStatement(statement) => *statement.expression,
            other => panic!("expected expression statement, got {:?}", other.data().kind),
        }
    }

    #[test]
    fn test_exponent_groups_right() {
        let arena = Bump::new();
        let Expression::Binary(outer) = first_expression(&arena, "a ** b ** c;") else { panic!() };
        assert!(matches!(outer.left, Expression::Identifier(_)));
        assert!(matches!(outer.right, Expression::Binary(_)));
    }

    #[test]
    fn test_call_with_type_arguments_versus_comparison() {
        let arena = Bump::new();
        let Expression::Call(call) = first_expression(&arena, "f<T>(x);") else { panic!() };
        assert_eq!(call.type_arguments.map(|t| t.len()), Some(1));

        let arena = Bump::new();
        let Expression::Binary(compare) = first_expression(&arena, "a < b;") else { panic!() };
        assert_eq!(compare.operator, SyntaxKind::LessThanToken);
    }

    #[test]
    fn test_parenthesized_arrow_versus_grouping() {
        let arena = Bump::new();
        assert!(matches!(first_expression(&arena, "(x: number): x is string => true;"), Expression::ArrowFunction(_)));
        let arena = Bump::new();
        assert!(matches!(first_expression(&arena, "(x, y);"), Expression::Parenthesized(_)));
    }

    #[test]
    fn test_conditional_consequent_keeps_typed_arrow_only_before_colon() {
        let arena = Bump::new();
        let Expression::Conditional(conditional) = first_expression(&arena, "a ? (x): y => z : w;") else {
            panic!()
        };
        assert!(matches!(conditional.when_true, Expression::ArrowFunction(_)));

        let arena = Bump::new();
        let Expression::Conditional(conditional) = first_expression(&arena, "a ? (x) : y;") else { panic!() };
        assert!(matches!(conditional.when_true, Expression::Parenthesized(_)));
    }

    #[test]
    fn test_as_const_and_satisfies() {
        let arena = Bump::new();
        let Expression::Satisfies(outer) = first_expression(&arena, "[1] as const satisfies readonly number[];") else {
            panic!()
        };
        assert!(matches!(outer.expression, Expression::As(_)));
    }

    #[test]
    fn test_optional_chain_marks_nodes() {
        let arena = Bump::new();
        let Expression::Call(call) = first_expression(&arena, "a?.b.c();") else { panic!() };
        assert!(call.data.flags.contains(typegram_ast::types::NodeFlags::OPTIONAL_CHAIN));
    }
}
