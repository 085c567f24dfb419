//! Indented tree dump of a parsed file.

use std::fmt::Write;

use typegram_ast::visitor::{AstVisitor, walk_class_element, walk_expression, walk_statement, walk_type_element, walk_type_node};
use typegram_ast::{ClassElement, Expression, Identifier, NodeData, SourceFile, Statement, TypeElement, TypeNode};

/// Writes one line per statement, expression, type, and member:
/// `Kind pos..end`, plus flags when any are set and the name of identifiers.
#[derive(Default)]
pub struct TreePrinter {
    out: String,
    depth: usize,
}

impl TreePrinter {
    pub fn print(file: &SourceFile<'_>) -> String {
        let mut printer = TreePrinter::default();
        let _ = writeln!(printer.out, "SourceFile {}", file.file_name);
        printer.depth = 1;
        printer.visit_source_file(file);
        printer.out
    }

    pub fn print_type(ty: &TypeNode<'_>) -> String {
        let mut printer = TreePrinter::default();
        printer.visit_type_node(ty);
        printer.out
    }

    fn line(&mut self, data: &NodeData, extra: Option<&str>) {
        let indent = "  ".repeat(self.depth);
        let _ = write!(self.out, "{indent}{:?} {}..{}", data.kind, data.range.pos, data.range.end);
        if !data.flags.is_empty() {
            let _ = write!(self.out, " {:?}", data.flags);
        }
        if let Some(extra) = extra {
            let _ = write!(self.out, " {extra:?}");
        }
        self.out.push('\n');
    }

    fn nested(&mut self, data: &NodeData, walk: impl FnOnce(&mut Self)) {
        self.line(data, None);
        self.depth += 1;
        walk(self);
        self.depth -= 1;
    }
}

impl<'a> AstVisitor<'a> for TreePrinter {
    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        self.nested(stmt.data(), |v| walk_statement(v, stmt));
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        self.nested(expr.data(), |v| walk_expression(v, expr));
    }

    fn visit_type_node(&mut self, ty: &TypeNode<'a>) {
        self.nested(ty.data(), |v| walk_type_node(v, ty));
    }

    fn visit_type_element(&mut self, member: &TypeElement<'a>) {
        self.nested(member.data(), |v| walk_type_element(v, member));
    }

    fn visit_class_element(&mut self, member: &ClassElement<'a>) {
        self.nested(member.data(), |v| walk_class_element(v, member));
    }

    fn visit_identifier(&mut self, node: &Identifier<'a>) {
        self.line(&node.data, Some(node.text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use typegram_parser::Parser;

    #[test]
    fn test_prints_nested_types() {
        let arena = Bump::new();
        let file = Parser::new(&arena, "a.ts", "type A = B | C;").parse_source_file().unwrap();
        let out = TreePrinter::print(&file);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "SourceFile a.ts");
        assert!(lines[1].starts_with("  TypeAliasDeclaration 0..15"));
        assert!(out.contains("UnionType"));
        assert!(out.contains("\"B\""));
        assert!(out.contains("\"C\""));
    }

    #[test]
    fn test_prints_standalone_type() {
        let arena = Bump::new();
        let ty = Parser::new(&arena, "t.ts", "keyof T").parse_standalone_type().unwrap();
        let out = TreePrinter::print_type(ty.type_node);
        assert!(out.starts_with("TypeOperator 0..7"));
    }
}
