// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for the C subset.
//!
//! The precedence cascade, loosest to tightest:
//!
//! | Level          | Operators            | Associativity |
//! |----------------|----------------------|---------------|
//! | assignment     | `=`                  | Right         |
//! | equality       | `==` `!=`            | Left          |
//! | relational     | `<` `>` `<=` `>=`    | Left          |
//! | additive       | `+` `-`              | Left          |
//! | multiplicative | `*` `/`              | Left          |
//! | primary        | constant, identifier, `( expr )` | — |
//!
//! Each level is one production: left-associative levels fold a `while`
//! loop over their operator set, assignment recurses into itself on the
//! right. Parenthesized expressions return the inner tree directly — no
//! grouping node is created.

use crate::ast::{Node, NodeKind};
use crate::source_analysis::TokenClass;

use super::{Parser, SyntaxError};

impl Parser {
    /// Parses any expression. Entry point for the cascade.
    pub(super) fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        self.parse_assignment()
    }

    /// Parses `equality ( "=" assignment )?` — right-associative, with
    /// the node stamped at the expression's start line.
    fn parse_assignment(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        let left = self.parse_equality()?;
        if self.peek_value_is("=") {
            let op = self.expect(TokenClass::Operator, Some("="))?;
            let right = self.parse_assignment()?;
            let mut node = Node::new(NodeKind::AssignmentExpression, op.value, start_line);
            node.push_child(left);
            node.push_child(right);
            return Ok(node);
        }
        Ok(left)
    }

    /// Parses `relational ( ("==" | "!=") relational )*`.
    fn parse_equality(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_relational()?;
        while self.peek_value_in(&["==", "!="]) {
            let op = self.expect(TokenClass::Operator, None)?;
            let right = self.parse_relational()?;
            left = binary(op.value, op.line, left, right);
        }
        Ok(left)
    }

    /// Parses `additive ( ("<" | ">" | "<=" | ">=") additive )*`.
    fn parse_relational(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_additive()?;
        while self.peek_value_in(&["<", ">", "<=", ">="]) {
            let op = self.expect(TokenClass::Operator, None)?;
            let right = self.parse_additive()?;
            left = binary(op.value, op.line, left, right);
        }
        Ok(left)
    }

    /// Parses `multiplicative ( ("+" | "-") multiplicative )*`.
    fn parse_additive(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        while self.peek_value_in(&["+", "-"]) {
            let op = self.expect(TokenClass::Operator, None)?;
            let right = self.parse_multiplicative()?;
            left = binary(op.value, op.line, left, right);
        }
        Ok(left)
    }

    /// Parses `primary ( ("*" | "/") primary )*`.
    fn parse_multiplicative(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_primary()?;
        while self.peek_value_in(&["*", "/"]) {
            let op = self.expect(TokenClass::Operator, None)?;
            let right = self.parse_primary()?;
            left = binary(op.value, op.line, left, right);
        }
        Ok(left)
    }

    /// Parses a constant, an identifier, or a parenthesized expression.
    fn parse_primary(&mut self) -> Result<Node, SyntaxError> {
        let line = self.current_line();
        if self.peek_class_is(TokenClass::NumericConstant) {
            let value = self.expect(TokenClass::NumericConstant, None)?;
            return Ok(Node::new(NodeKind::Constant, value.value, line));
        }
        if self.peek_class_is(TokenClass::Identifier) {
            let value = self.expect(TokenClass::Identifier, None)?;
            return Ok(Node::new(NodeKind::Identifier, value.value, line));
        }
        if self.peek_value_is("(") {
            self.expect(TokenClass::SpecialCharacter, Some("("))?;
            let expression = self.parse_expression()?;
            self.expect(TokenClass::SpecialCharacter, Some(")"))?;
            return Ok(expression);
        }
        Err(self.error_here("Expected a value, variable, or expression in parentheses."))
    }
}

/// Folds two operands into a left-leaning binary node stamped with the
/// operator's line.
fn binary(op: impl Into<ecow::EcoString>, line: i32, left: Node, right: Node) -> Node {
    let mut node = Node::new(NodeKind::BinaryExpression, op, line);
    node.push_child(left);
    node.push_child(right);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{parse, scan};

    /// Parses `source` as the initializer expression of `int r = …;`.
    fn parse_expr(source: &str) -> Node {
        let tokens = scan(&format!("int r = {source};"))
            .expect("test source scans cleanly")
            .tokens;
        let tree = parse(tokens).expect("test source parses cleanly");
        tree.children[0].children[1].children[0].children[0].clone()
    }

    fn parse_error(source: &str) -> SyntaxError {
        let tokens = scan(source).expect("test source scans cleanly").tokens;
        parse(tokens).expect_err("test source should fail to parse")
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // 1 + 2 * 3 → (+ 1 (* 2 3))
        let expr = parse_expr("1 + 2 * 3");
        assert_eq!(expr.kind, NodeKind::BinaryExpression);
        assert_eq!(expr.value, "+");
        assert_eq!(expr.children[0].value, "1");
        let product = &expr.children[1];
        assert_eq!(product.value, "*");
        assert_eq!(product.children[0].value, "2");
        assert_eq!(product.children[1].value, "3");
    }

    #[test]
    fn additive_operators_fold_left() {
        // 1 - 2 + 3 → (+ (- 1 2) 3)
        let expr = parse_expr("1 - 2 + 3");
        assert_eq!(expr.value, "+");
        assert_eq!(expr.children[0].value, "-");
        assert_eq!(expr.children[1].value, "3");
    }

    #[test]
    fn relational_binds_looser_than_additive() {
        // a + 1 < b → (< (+ a 1) b)
        let expr = parse_expr("a + 1 < b");
        assert_eq!(expr.value, "<");
        assert_eq!(expr.children[0].value, "+");
        assert_eq!(expr.children[1].kind, NodeKind::Identifier);
    }

    #[test]
    fn equality_binds_loosest_of_the_binaries() {
        // a < b == c > d → (== (< a b) (> c d))
        let expr = parse_expr("a < b == c > d");
        assert_eq!(expr.value, "==");
        assert_eq!(expr.children[0].value, "<");
        assert_eq!(expr.children[1].value, ">");
    }

    #[test]
    fn parentheses_regroup_without_a_wrapper_node() {
        // (1 + 2) * 3 → (* (+ 1 2) 3)
        let expr = parse_expr("(1 + 2) * 3");
        assert_eq!(expr.value, "*");
        assert_eq!(expr.children[0].value, "+");
        assert_eq!(expr.children[1].value, "3");
    }

    #[test]
    fn assignment_is_right_associative() {
        // a = b = 1 → (= a (= b 1))
        let tokens = scan("void f() { a = b = 1; }").unwrap().tokens;
        let tree = parse(tokens).unwrap();
        let assignment = &tree.children[0].children[1].children[0].children[0];
        assert_eq!(assignment.kind, NodeKind::AssignmentExpression);
        assert_eq!(assignment.children[0].kind, NodeKind::Identifier);
        assert_eq!(assignment.children[0].value, "a");
        let inner = &assignment.children[1];
        assert_eq!(inner.kind, NodeKind::AssignmentExpression);
        assert_eq!(inner.children[0].value, "b");
        assert_eq!(inner.children[1].value, "1");
    }

    #[test]
    fn binary_nodes_are_stamped_with_the_operator_line() {
        let tokens = scan("void f() {\n x = 1 +\n 2;\n}").unwrap().tokens;
        let tree = parse(tokens).unwrap();
        let sum = &tree.children[0].children[1].children[0].children[0].children[1];
        assert_eq!(sum.value, "+");
        assert_eq!(sum.line, 2);
    }

    #[test]
    fn missing_operand_is_fatal() {
        let err = parse_error("void f() { x = 1 + ; }");
        assert_eq!(
            err.to_string(),
            "[Line 1] Syntax Error: Expected a value, variable, \
             or expression in parentheses."
        );
    }

    #[test]
    fn unclosed_parenthesis_is_fatal() {
        let err = parse_error("void f() { x = (1 + 2; }");
        assert_eq!(
            err.to_string(),
            "[Line 1] Syntax Error: Expected SPECIAL CHARACTER with value ')', \
             but got SPECIAL CHARACTER with value ';'"
        );
    }

    #[test]
    fn keywords_are_not_primaries() {
        let err = parse_error("void f() { x = return; }");
        assert_eq!(
            err.to_string(),
            "[Line 1] Syntax Error: Expected a value, variable, \
             or expression in parentheses."
        );
    }
}
