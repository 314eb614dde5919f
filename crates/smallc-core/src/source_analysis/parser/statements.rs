// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing for the C subset.
//!
//! Statements are dispatched on one token of lookahead: `if`, `for`,
//! `return`, `{`, a bare `;`, a declaration keyword, or — failing all of
//! those — an expression statement.

use crate::ast::{Node, NodeKind};
use crate::source_analysis::TokenClass;

use super::{Parser, SyntaxError};

/// Keywords that open a declaration in statement position.
const STATEMENT_TYPE_KEYWORDS: &[&str] = &["const", "int", "float", "char"];

/// Keywords that open a declaration in a `for` initializer.
const FOR_INIT_TYPE_KEYWORDS: &[&str] = &["int", "char", "float"];

impl Parser {
    /// Parses one statement.
    pub(super) fn parse_statement(&mut self) -> Result<Node, SyntaxError> {
        if self.peek_value_is("if") {
            return self.parse_if_statement();
        }
        if self.peek_value_is("for") {
            return self.parse_for_statement();
        }
        if self.peek_value_is("return") {
            return self.parse_return_statement();
        }
        if self.peek_value_is("{") {
            return self.parse_block_statement();
        }
        if self.peek_value_is(";") {
            let line = self.current_line();
            self.expect(TokenClass::SpecialCharacter, Some(";"))?;
            return Ok(Node::new(NodeKind::EmptyStatement, ";", line));
        }
        if self.peek_value_in(STATEMENT_TYPE_KEYWORDS) {
            return self.parse_variable_declaration();
        }
        self.parse_expression_statement()
    }

    /// Parses `{ statement* }`.
    pub(super) fn parse_block_statement(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        self.expect(TokenClass::SpecialCharacter, Some("{"))?;
        let mut block = Node::new(NodeKind::BlockStatement, "{}", start_line);
        while !self.peek_value_is("}") {
            block.push_child(self.parse_statement()?);
        }
        self.expect(TokenClass::SpecialCharacter, Some("}"))?;
        Ok(block)
    }

    /// Parses `if (expr) stmt [else stmt]`.
    fn parse_if_statement(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        self.expect(TokenClass::Keyword, Some("if"))?;
        let mut node = Node::new(NodeKind::IfStatement, "if", start_line);
        self.expect(TokenClass::SpecialCharacter, Some("("))?;
        node.push_child(self.parse_expression()?);
        self.expect(TokenClass::SpecialCharacter, Some(")"))?;
        node.push_child(self.parse_statement()?);
        if self.peek_value_is("else") {
            self.expect(TokenClass::Keyword, Some("else"))?;
            node.push_child(self.parse_statement()?);
        }
        Ok(node)
    }

    /// Parses `for (init cond incr) body`.
    ///
    /// The node always has exactly four children, in order: initializer,
    /// condition, increment, body. Omitted slots are filled with `Empty`
    /// nodes naming the slot, stamped with the `for` keyword's line —
    /// never with a wrapper node.
    fn parse_for_statement(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        self.expect(TokenClass::Keyword, Some("for"))?;
        let mut node = Node::new(NodeKind::ForStatement, "for", start_line);
        self.expect(TokenClass::SpecialCharacter, Some("("))?;

        // Initializer: empty, a declaration, or an expression statement.
        if self.peek_value_is(";") {
            self.expect(TokenClass::SpecialCharacter, Some(";"))?;
            node.push_child(Node::new(NodeKind::Empty, "initializer", start_line));
        } else if self.peek_value_in(FOR_INIT_TYPE_KEYWORDS) {
            node.push_child(self.parse_variable_declaration()?);
        } else {
            node.push_child(self.parse_expression_statement()?);
        }

        // Condition: the expression goes in directly, no wrapper.
        if self.peek_value_is(";") {
            self.expect(TokenClass::SpecialCharacter, Some(";"))?;
            node.push_child(Node::new(NodeKind::Empty, "condition", start_line));
        } else {
            node.push_child(self.parse_expression()?);
            self.expect(TokenClass::SpecialCharacter, Some(";"))?;
        }

        // Increment: likewise direct, and terminated by the `)` itself.
        if self.peek_value_is(")") {
            node.push_child(Node::new(NodeKind::Empty, "increment", start_line));
        } else {
            node.push_child(self.parse_expression()?);
        }

        self.expect(TokenClass::SpecialCharacter, Some(")"))?;
        node.push_child(self.parse_statement()?);
        Ok(node)
    }

    /// Parses `return [expr] ;`.
    fn parse_return_statement(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        self.expect(TokenClass::Keyword, Some("return"))?;
        let mut node = Node::new(NodeKind::ReturnStatement, "return", start_line);
        if !self.peek_value_is(";") {
            node.push_child(self.parse_expression()?);
        }
        self.expect(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(node)
    }

    /// Parses `expr ;`.
    pub(super) fn parse_expression_statement(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        let mut node = Node::new(NodeKind::ExpressionStatement, "", start_line);
        node.push_child(self.parse_expression()?);
        self.expect(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(node)
    }
}
