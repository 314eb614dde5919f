// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree definitions for the C-subset parser.
//!
//! The tree is a plain owning structure: every [`Node`] owns its
//! children, no node is shared, and dropping the root releases the whole
//! tree. The parser builds it bottom-up and the renderer traverses it
//! once; nothing here needs an arena or reference counting.
//!
//! Each node carries a [`NodeKind`] tag, a short discriminating value
//! (an operator symbol, an identifier name, a keyword), and the 1-based
//! source line where the construct begins.
//!
//! # Example
//!
//! ```
//! use smallc_core::ast::{Node, NodeKind};
//!
//! let mut ret = Node::new(NodeKind::ReturnStatement, "return", 1);
//! ret.push_child(Node::new(NodeKind::Constant, "0", 1));
//! assert_eq!(ret.children.len(), 1);
//! assert!(ret.render().contains("ReturnStatement (return) [Line: 1]"));
//! ```

use std::fmt;

use ecow::EcoString;

/// The syntactic category of a tree node.
///
/// `Display` renders the exact category name used by the tree printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root: one child per top-level declaration.
    Program,
    /// An opaque `#…` line accepted at top level.
    PreprocessorDirective,
    /// `[const] type declarator (, declarator)* ;`
    VariableDeclarationStatement,
    /// The type keyword of a declaration or function.
    TypeSpecifier,
    /// A bare keyword child, currently only `const`.
    Keyword,
    /// One declared name, optionally holding an [`NodeKind::Initializer`].
    Declarator,
    /// The `= expression` part of a declarator; its single child is the
    /// parsed expression.
    Initializer,
    /// `type name ( ) { … }` — value is the function name.
    FunctionDefinition,
    /// `type name ( ) ;` — value is the function name.
    FunctionPrototype,
    /// `{ statement* }`
    BlockStatement,
    /// `if (expr) stmt [else stmt]` — two or three children.
    IfStatement,
    /// `for (init cond incr) body` — exactly four children.
    ForStatement,
    /// `return [expr] ;`
    ReturnStatement,
    /// A bare `;`.
    EmptyStatement,
    /// `expr ;`
    ExpressionStatement,
    /// Right-associative `=` — value is the operator, two children.
    AssignmentExpression,
    /// Left-associative binary operator — value is the operator lexeme.
    BinaryExpression,
    /// A numeric constant leaf.
    Constant,
    /// An identifier leaf.
    Identifier,
    /// A placeholder for an omitted `for` slot; value names the slot
    /// (`initializer`, `condition`, or `increment`).
    Empty,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Program => "Program",
            Self::PreprocessorDirective => "PreprocessorDirective",
            Self::VariableDeclarationStatement => "VariableDeclarationStatement",
            Self::TypeSpecifier => "TypeSpecifier",
            Self::Keyword => "Keyword",
            Self::Declarator => "Declarator",
            Self::Initializer => "Initializer",
            Self::FunctionDefinition => "FunctionDefinition",
            Self::FunctionPrototype => "FunctionPrototype",
            Self::BlockStatement => "BlockStatement",
            Self::IfStatement => "IfStatement",
            Self::ForStatement => "ForStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::BinaryExpression => "BinaryExpression",
            Self::Constant => "Constant",
            Self::Identifier => "Identifier",
            Self::Empty => "Empty",
        };
        f.write_str(name)
    }
}

/// One node of the owned syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The syntactic category.
    pub kind: NodeKind,
    /// The discriminating lexeme (operator, name, keyword) or empty.
    pub value: EcoString,
    /// 1-based source line where the construct begins.
    pub line: i32,
    /// Children in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(kind: NodeKind, value: impl Into<EcoString>, line: i32) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            children: Vec::new(),
        }
    }

    /// Appends a child, keeping source order.
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Renders the tree as indented ASCII with box-drawing branches.
    ///
    /// Each line is `<prefix><branch><kind> (<value>) [Line: <line>]`,
    /// where the branch is `└── ` for a last child and `├── ` otherwise.
    /// The root is treated as a last child with an empty prefix.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "", true);
        out
    }

    fn render_into(&self, out: &mut String, prefix: &str, is_last_sibling: bool) {
        let branch = if is_last_sibling { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&format!(
            "{} ({}) [Line: {}]\n",
            self.kind, self.value, self.line
        ));

        // A last child closes its column; any other child keeps the
        // vertical rule open for its following siblings.
        let child_prefix = format!("{prefix}{}", if is_last_sibling { "    " } else { "│   " });
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            child.render_into(out, &child_prefix, i == last);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
