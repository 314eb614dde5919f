// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing for the C subset.
//!
//! This module handles the top-level productions:
//! - Preprocessor directives, accepted opaquely
//! - Function definitions and prototypes (`type name ( ) …`)
//! - Variable declarations (`[const] type declarator (, declarator)* ;`)
//!
//! The one real ambiguity in the grammar lives here: after a type
//! keyword, only the token *after* the identifier tells a declaration
//! from a function. `lookahead(2)` resolves it.

use crate::ast::{Node, NodeKind};
use crate::source_analysis::TokenClass;

use super::{Parser, SyntaxError};

/// Type keywords that may open a top-level declaration.
const TOP_LEVEL_TYPE_KEYWORDS: &[&str] = &["int", "float", "char", "void", "const"];

impl Parser {
    /// Parses one top-level declaration: a directive, a function, or a
    /// variable declaration.
    pub(super) fn parse_top_level_declaration(&mut self) -> Result<Node, SyntaxError> {
        if self.peek_class_is(TokenClass::PreprocessorDirective) {
            let directive = self.expect(TokenClass::PreprocessorDirective, None)?;
            return Ok(Node::new(
                NodeKind::PreprocessorDirective,
                directive.value,
                directive.line,
            ));
        }

        if self.peek_class_is(TokenClass::Keyword) && self.peek_value_in(TOP_LEVEL_TYPE_KEYWORDS) {
            // The type is token 0 and the identifier token 1; token 2
            // decides: `(` means a function, anything else a variable.
            if self.lookahead(2).is_some_and(|t| t.value == "(") {
                return self.parse_function_or_prototype();
            }
            return self.parse_variable_declaration();
        }

        Err(self.error_here(
            "Unrecognized top-level statement. Expected a global variable or function.",
        ))
    }

    /// Parses `type name ( )` followed by either a body (definition) or
    /// a `;` (prototype). The node's value is the function name.
    fn parse_function_or_prototype(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        let type_token = self.expect(TokenClass::Keyword, None)?;
        let name_token = self.expect(TokenClass::Identifier, None)?;
        self.expect(TokenClass::SpecialCharacter, Some("("))?;
        self.expect(TokenClass::SpecialCharacter, Some(")"))?;

        if self.peek_value_is("{") {
            let mut definition =
                Node::new(NodeKind::FunctionDefinition, name_token.value, start_line);
            definition.push_child(Node::new(
                NodeKind::TypeSpecifier,
                type_token.value,
                type_token.line,
            ));
            definition.push_child(self.parse_block_statement()?);
            Ok(definition)
        } else if self.peek_value_is(";") {
            self.expect(TokenClass::SpecialCharacter, Some(";"))?;
            let mut prototype =
                Node::new(NodeKind::FunctionPrototype, name_token.value, start_line);
            prototype.push_child(Node::new(
                NodeKind::TypeSpecifier,
                type_token.value,
                type_token.line,
            ));
            Ok(prototype)
        } else {
            Err(self.error_here(
                "Expected '{' for function body or ';' for prototype after function signature.",
            ))
        }
    }

    /// Parses `[const] type declarator (, declarator)* ;` where each
    /// declarator is an identifier with an optional `= expression`
    /// initializer.
    pub(super) fn parse_variable_declaration(&mut self) -> Result<Node, SyntaxError> {
        let start_line = self.current_line();
        let mut declaration = Node::new(NodeKind::VariableDeclarationStatement, "", start_line);

        if self.peek_value_is("const") {
            let qualifier = self.expect(TokenClass::Keyword, Some("const"))?;
            declaration.push_child(Node::new(
                NodeKind::Keyword,
                qualifier.value,
                qualifier.line,
            ));
        }

        let type_token = self.expect(TokenClass::Keyword, None)?;
        declaration.push_child(Node::new(
            NodeKind::TypeSpecifier,
            type_token.value,
            type_token.line,
        ));

        loop {
            let name = self.expect(TokenClass::Identifier, None)?;
            let mut declarator = Node::new(NodeKind::Declarator, name.value, name.line);
            if self.peek_value_is("=") {
                self.expect(TokenClass::Operator, Some("="))?;
                // The initializer is stamped with the line of its
                // expression's first token.
                let mut initializer =
                    Node::new(NodeKind::Initializer, "=", self.current_line());
                initializer.push_child(self.parse_expression()?);
                declarator.push_child(initializer);
            }
            declaration.push_child(declarator);

            if self.peek_value_is(",") {
                self.expect(TokenClass::SpecialCharacter, Some(","))?;
            } else {
                break;
            }
        }

        self.expect(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(declaration)
    }
}
