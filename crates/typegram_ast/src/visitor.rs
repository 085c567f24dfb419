//! AST visitor for traversing the syntax tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children in source order. Override a method to act on a
//! node and call the `walk_*` function to keep descending.

use crate::node::*;

pub trait AstVisitor<'a>: Sized {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        for stmt in node.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_type_node(&mut self, ty: &TypeNode<'a>) {
        walk_type_node(self, ty);
    }

    fn visit_type_element(&mut self, member: &TypeElement<'a>) {
        walk_type_element(self, member);
    }

    fn visit_class_element(&mut self, member: &ClassElement<'a>) {
        walk_class_element(self, member);
    }

    fn visit_identifier(&mut self, _node: &Identifier<'a>) {}

    fn visit_entity_name(&mut self, name: &EntityName<'a>) {
        match name {
            EntityName::Identifier(id) => self.visit_identifier(id),
            EntityName::QualifiedName(q) => {
                self.visit_entity_name(&q.left);
                self.visit_identifier(&q.right);
            }
        }
    }

    fn visit_property_name(&mut self, name: &PropertyName<'a>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => self.visit_identifier(id),
            PropertyName::Computed(c) => self.visit_expression(c.expression),
            PropertyName::StringLiteral(_) | PropertyName::NumericLiteral(_) => {}
        }
    }

    fn visit_binding_name(&mut self, name: &BindingName<'a>) {
        walk_binding_name(self, name);
    }

    fn visit_type_parameter(&mut self, node: &TypeParameterDeclaration<'a>) {
        self.visit_identifier(&node.name);
        if let Some(constraint) = node.constraint {
            self.visit_type_node(constraint);
        }
        if let Some(default) = node.default {
            self.visit_type_node(default);
        }
    }

    fn visit_parameter(&mut self, node: &ParameterDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(ty) = node.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_signature(&mut self, sig: &Signature<'a>) {
        walk_signature(self, sig);
    }

    fn visit_block(&mut self, block: &Block<'a>) {
        for stmt in block.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_heritage_clause(&mut self, clause: &HeritageClause<'a>) {
        for ty in clause.types {
            self.visit_expression(ty.expression);
            visit_type_list(self, ty.type_arguments);
        }
    }
}

fn visit_type_list<'a, V: AstVisitor<'a>>(v: &mut V, list: Option<NodeList<'a, TypeNode<'a>>>) {
    for ty in list.unwrap_or_default() {
        v.visit_type_node(ty);
    }
}

fn visit_type_parameters<'a, V: AstVisitor<'a>>(
    v: &mut V,
    list: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
) {
    for tp in list.unwrap_or_default() {
        v.visit_type_parameter(tp);
    }
}

pub fn walk_signature<'a, V: AstVisitor<'a>>(v: &mut V, sig: &Signature<'a>) {
    visit_type_parameters(v, sig.type_parameters);
    for param in sig.parameters {
        v.visit_parameter(param);
    }
    if let Some(ret) = sig.return_type {
        v.visit_type_node(ret);
    }
}

pub fn walk_binding_name<'a, V: AstVisitor<'a>>(v: &mut V, name: &BindingName<'a>) {
    let visit_element = |v: &mut V, el: &BindingElement<'a>| {
        if let Some(prop) = &el.property_name {
            v.visit_property_name(prop);
        }
        v.visit_binding_name(&el.name);
        if let Some(init) = el.initializer {
            v.visit_expression(init);
        }
    };
    match name {
        BindingName::Identifier(id) => v.visit_identifier(id),
        BindingName::ObjectPattern(p) => {
            for el in p.elements {
                visit_element(v, el);
            }
        }
        BindingName::ArrayPattern(p) => {
            for el in p.elements {
                if let ArrayBindingElement::Binding(el) = el {
                    visit_element(v, el);
                }
            }
        }
    }
}

pub fn walk_type_node<'a, V: AstVisitor<'a>>(v: &mut V, ty: &TypeNode<'a>) {
    match ty {
        TypeNode::KeywordType(_) | TypeNode::ThisType(_) => {}
        TypeNode::TypeReference(n) => {
            v.visit_entity_name(&n.type_name);
            visit_type_list(v, n.type_arguments);
        }
        TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => v.visit_signature(&n.signature),
        TypeNode::TypeQuery(n) => {
            v.visit_entity_name(&n.expr_name);
            visit_type_list(v, n.type_arguments);
        }
        TypeNode::TypeLiteral(n) => {
            for member in n.members {
                v.visit_type_element(member);
            }
        }
        TypeNode::ArrayType(n) => v.visit_type_node(n.element_type),
        TypeNode::TupleType(n) => {
            for el in n.elements {
                v.visit_type_node(el);
            }
        }
        TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
            v.visit_type_node(n.type_node)
        }
        TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => {
            for t in n.types {
                v.visit_type_node(t);
            }
        }
        TypeNode::ConditionalType(n) => {
            v.visit_type_node(n.check_type);
            v.visit_type_node(n.extends_type);
            v.visit_type_node(n.true_type);
            v.visit_type_node(n.false_type);
        }
        TypeNode::InferType(n) => v.visit_type_parameter(n.type_parameter),
        TypeNode::TypeOperator(n) => v.visit_type_node(n.type_node),
        TypeNode::IndexedAccessType(n) => {
            v.visit_type_node(n.object_type);
            v.visit_type_node(n.index_type);
        }
        TypeNode::MappedType(n) => {
            v.visit_type_parameter(n.type_parameter);
            if let Some(name_type) = n.name_type {
                v.visit_type_node(name_type);
            }
            if let Some(ty) = n.type_node {
                v.visit_type_node(ty);
            }
        }
        TypeNode::LiteralType(n) => v.visit_expression(n.literal),
        TypeNode::NamedTupleMember(n) => {
            v.visit_identifier(&n.name);
            v.visit_type_node(n.type_node);
        }
        TypeNode::TemplateLiteralType(n) => {
            for span in n.spans {
                v.visit_type_node(span.type_node);
            }
        }
        TypeNode::ImportType(n) => {
            if let Some(q) = &n.qualifier {
                v.visit_entity_name(q);
            }
            visit_type_list(v, n.type_arguments);
        }
        TypeNode::TypePredicate(n) => {
            if let TypePredicateParameterName::Identifier(id) = &n.parameter_name {
                v.visit_identifier(id);
            }
            if let Some(ty) = n.type_node {
                v.visit_type_node(ty);
            }
        }
    }
}

pub fn walk_type_element<'a, V: AstVisitor<'a>>(v: &mut V, member: &TypeElement<'a>) {
    match member {
        TypeElement::PropertySignature(n) => {
            v.visit_property_name(&n.name);
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
        }
        TypeElement::MethodSignature(n)
        | TypeElement::GetAccessorSignature(n)
        | TypeElement::SetAccessorSignature(n) => {
            v.visit_property_name(&n.name);
            v.visit_signature(&n.signature);
        }
        TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => v.visit_signature(&n.signature),
        TypeElement::IndexSignature(n) => walk_index_signature(v, n),
    }
}

fn walk_index_signature<'a, V: AstVisitor<'a>>(v: &mut V, n: &IndexSignatureNode<'a>) {
    for param in n.parameters {
        v.visit_parameter(param);
    }
    if let Some(ty) = n.type_annotation {
        v.visit_type_node(ty);
    }
}

fn walk_method<'a, V: AstVisitor<'a>>(v: &mut V, n: &MethodDeclaration<'a>) {
    v.visit_property_name(&n.name);
    v.visit_signature(&n.signature);
    if let Some(body) = n.body {
        v.visit_block(body);
    }
}

pub fn walk_class_element<'a, V: AstVisitor<'a>>(v: &mut V, member: &ClassElement<'a>) {
    match member {
        ClassElement::PropertyDeclaration(n) => {
            v.visit_property_name(&n.name);
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
            if let Some(init) = n.initializer {
                v.visit_expression(init);
            }
        }
        ClassElement::MethodDeclaration(n)
        | ClassElement::Constructor(n)
        | ClassElement::GetAccessor(n)
        | ClassElement::SetAccessor(n) => walk_method(v, n),
        ClassElement::IndexSignature(n) => walk_index_signature(v, n),
        ClassElement::StaticBlock(n) => v.visit_block(n.body),
        ClassElement::Semicolon(_) => {}
    }
}

fn walk_class<'a, V: AstVisitor<'a>>(v: &mut V, n: &ClassDeclaration<'a>) {
    if let Some(name) = &n.name {
        v.visit_identifier(name);
    }
    visit_type_parameters(v, n.type_parameters);
    for clause in n.heritage_clauses {
        v.visit_heritage_clause(clause);
    }
    for member in n.members {
        v.visit_class_element(member);
    }
}

fn walk_function<'a, V: AstVisitor<'a>>(v: &mut V, n: &FunctionDeclaration<'a>) {
    if let Some(name) = &n.name {
        v.visit_identifier(name);
    }
    v.visit_signature(&n.signature);
    if let Some(body) = n.body {
        v.visit_block(body);
    }
}

fn walk_module<'a, V: AstVisitor<'a>>(v: &mut V, n: &ModuleDeclaration<'a>) {
    if let ModuleName::Identifier(id) = &n.name {
        v.visit_identifier(id);
    }
    match &n.body {
        Some(ModuleBody::Block(block)) => {
            for stmt in block.statements {
                v.visit_statement(stmt);
            }
        }
        Some(ModuleBody::Namespace(inner)) => walk_module(v, inner),
        None => {}
    }
}

fn walk_named_bindings<'a, V: AstVisitor<'a>>(v: &mut V, elements: &[ImportSpecifier<'a>]) {
    for spec in elements {
        if let Some(prop) = &spec.property_name {
            v.visit_identifier(prop);
        }
        v.visit_identifier(&spec.name);
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a>>(v: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => {
            for decl in n.declaration_list.declarations {
                v.visit_binding_name(&decl.name);
                if let Some(ty) = decl.type_annotation {
                    v.visit_type_node(ty);
                }
                if let Some(init) = decl.initializer {
                    v.visit_expression(init);
                }
            }
        }
        Statement::FunctionDeclaration(n) => walk_function(v, n),
        Statement::ClassDeclaration(n) => walk_class(v, n),
        Statement::InterfaceDeclaration(n) => {
            v.visit_identifier(&n.name);
            visit_type_parameters(v, n.type_parameters);
            for clause in n.heritage_clauses {
                v.visit_heritage_clause(clause);
            }
            for member in n.members {
                v.visit_type_element(member);
            }
        }
        Statement::TypeAliasDeclaration(n) => {
            v.visit_identifier(&n.name);
            visit_type_parameters(v, n.type_parameters);
            v.visit_type_node(n.type_node);
        }
        Statement::EnumDeclaration(n) => {
            v.visit_identifier(&n.name);
            for member in n.members {
                v.visit_property_name(&member.name);
                if let Some(init) = member.initializer {
                    v.visit_expression(init);
                }
            }
        }
        Statement::ModuleDeclaration(n) => walk_module(v, n),
        Statement::ImportDeclaration(n) => {
            if let Some(clause) = &n.import_clause {
                if let Some(name) = &clause.name {
                    v.visit_identifier(name);
                }
                match &clause.named_bindings {
                    Some(NamedImportBindings::NamespaceImport(ns)) => v.visit_identifier(&ns.name),
                    Some(NamedImportBindings::NamedImports(named)) => walk_named_bindings(v, named.elements),
                    None => {}
                }
            }
        }
        Statement::ImportEqualsDeclaration(n) => {
            v.visit_identifier(&n.name);
            if let ModuleReference::EntityName(name) = &n.module_reference {
                v.visit_entity_name(name);
            }
        }
        Statement::ExportDeclaration(n) => match &n.export_clause {
            Some(NamedExportBindings::NamespaceExport(ns)) => v.visit_identifier(&ns.name),
            Some(NamedExportBindings::NamedExports(named)) => walk_named_bindings(v, named.elements),
            None => {}
        },
        Statement::ExportAssignment(n) => v.visit_expression(n.expression),
        Statement::NamespaceExportDeclaration(n) => v.visit_identifier(&n.name),
        Statement::Block(n) => v.visit_block(n),
        Statement::EmptyStatement(_) => {}
        Statement::ExpressionStatement(n) | Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                v.visit_statement(else_stmt);
            }
        }
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a>>(v: &mut V, expr: &Expression<'a>) {
    match expr {
        Expression::Identifier(id) | Expression::PrivateIdentifier(id) => v.visit_identifier(id),
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::Omitted(_)
        | Expression::This(_)
        | Expression::Super(_)
        | Expression::Null(_)
        | Expression::True(_)
        | Expression::False(_) => {}
        Expression::TemplateExpression(n) => {
            for span in n.spans {
                v.visit_expression(span.expression);
            }
        }
        Expression::ArrayLiteral(n) => {
            for el in n.elements {
                v.visit_expression(el);
            }
        }
        Expression::ObjectLiteral(n) => {
            for prop in n.properties {
                match prop {
                    ObjectLiteralElement::PropertyAssignment(p) => {
                        v.visit_property_name(&p.name);
                        v.visit_expression(p.initializer);
                    }
                    ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                        v.visit_identifier(&p.name);
                        if let Some(init) = p.initializer {
                            v.visit_expression(init);
                        }
                    }
                    ObjectLiteralElement::SpreadAssignment(p) => v.visit_expression(p.expression),
                    ObjectLiteralElement::Method(m)
                    | ObjectLiteralElement::GetAccessor(m)
                    | ObjectLiteralElement::SetAccessor(m) => walk_method(v, m),
                }
            }
        }
        Expression::PropertyAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_identifier(&n.name);
        }
        Expression::ElementAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_expression(n.argument_expression);
        }
        Expression::Call(n) | Expression::New(n) => {
            v.visit_expression(n.expression);
            visit_type_list(v, n.type_arguments);
            for arg in n.arguments.unwrap_or_default() {
                v.visit_expression(arg);
            }
        }
        Expression::TaggedTemplate(n) => {
            v.visit_expression(n.tag);
            visit_type_list(v, n.type_arguments);
            v.visit_expression(n.template);
        }
        Expression::TypeAssertion(n) => {
            v.visit_type_node(n.type_node);
            v.visit_expression(n.expression);
        }
        Expression::As(n) | Expression::Satisfies(n) => {
            v.visit_expression(n.expression);
            v.visit_type_node(n.type_node);
        }
        Expression::Parenthesized(n) | Expression::Spread(n) | Expression::NonNull(n) => {
            v.visit_expression(n.expression)
        }
        Expression::FunctionExpression(n) => walk_function(v, n),
        Expression::ArrowFunction(n) => {
            v.visit_signature(&n.signature);
            match n.body {
                ArrowFunctionBody::Block(block) => v.visit_block(block),
                ArrowFunctionBody::Expression(body) => v.visit_expression(body),
            }
        }
        Expression::PrefixUnary(n) | Expression::PostfixUnary(n) => v.visit_expression(n.operand),
        Expression::Binary(n) => {
            v.visit_expression(n.left);
            v.visit_expression(n.right);
        }
        Expression::Conditional(n) => {
            v.visit_expression(n.condition);
            v.visit_expression(n.when_true);
            v.visit_expression(n.when_false);
        }
        Expression::ClassExpression(n) => walk_class(v, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::KeywordTypeKind;
    use crate::syntax_kind::SyntaxKind;

    struct TypeCounter(usize);

    impl<'a> AstVisitor<'a> for TypeCounter {
        fn visit_type_node(&mut self, ty: &TypeNode<'a>) {
            self.0 += 1;
            walk_type_node(self, ty);
        }
    }

    fn keyword(kind: KeywordTypeKind, pos: u32, end: u32) -> TypeNode<'static> {
        TypeNode::KeywordType(KeywordTypeNode { data: NodeData::new(SyntaxKind::KeywordType, pos, end), keyword: kind })
    }

    #[test]
    fn test_walk_visits_nested_types() {
        let members = [keyword(KeywordTypeKind::String, 0, 6), keyword(KeywordTypeKind::Number, 9, 15)];
        let union = TypeNode::UnionType(UnionOrIntersectionTypeNode {
            data: NodeData::new(SyntaxKind::UnionType, 0, 15),
            types: &members,
        });
        let array = TypeNode::ArrayType(ArrayTypeNode {
            data: NodeData::new(SyntaxKind::ArrayType, 0, 17),
            element_type: &union,
        });
        let mut counter = TypeCounter(0);
        counter.visit_type_node(&array);
        assert_eq!(counter.0, 4);
    }
}
