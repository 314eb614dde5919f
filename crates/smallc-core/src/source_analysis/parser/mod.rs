// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for the C subset.
//!
//! The parser consumes a token stream (usually reloaded from the token
//! file) and produces a [`Node`] tree rooted at `Program`, or the single
//! fatal [`SyntaxError`] describing the first mismatch. There is no
//! recovery and no multi-error reporting: the first unexpected token ends
//! the parse, and no partially-built tree escapes.
//!
//! # Comment transparency
//!
//! The two comment classes are whitespace to the grammar. Every read
//! primitive (`peek`, `lookahead`, end-of-input checks) skips them
//! lazily, so a stream with comments inserted at any position parses to
//! the same tree as the stream without them.
//!
//! # Lookahead
//!
//! The grammar is predictive with one token of lookahead everywhere
//! except the top level, where `lookahead(2)` — the token after the
//! identifier — separates `int x = …` from `int f ( ) …`.
//!
//! # Usage
//!
//! ```
//! use smallc_core::source_analysis::{parse, scan};
//!
//! let tokens = scan("int main() { return 0; }").unwrap().tokens;
//! let tree = parse(tokens).expect("program is valid");
//! assert_eq!(tree.children.len(), 1);
//! ```

use std::fmt;

use ecow::EcoString;

use crate::ast::{Node, NodeKind};
use crate::source_analysis::{Token, TokenClass};

// Submodules with additional impl blocks for Parser
mod declarations;
mod expressions;
mod statements;


/// Where a syntax error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLocation {
    /// The 1-based line of the offending token.
    Line(i32),
    /// The token stream ran out mid-production.
    EndOfFile,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "Line {line}"),
            Self::EndOfFile => f.write_str("End of File"),
        }
    }
}

/// The single fatal diagnostic a failed parse produces.
///
/// `Display` renders exactly the form the parser CLI emits:
/// `[Line N] Syntax Error: <message>` or
/// `[End of File] Syntax Error: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("[{location}] Syntax Error: {message}")]
#[diagnostic(code(smallc::parse::syntax_error))]
pub struct SyntaxError {
    /// What was expected versus what was found.
    pub message: EcoString,
    /// Where the mismatch was detected.
    pub location: ErrorLocation,
}

impl SyntaxError {
    /// Creates an error anchored to a source line.
    #[must_use]
    pub fn at_line(line: i32, message: impl Into<EcoString>) -> Self {
        Self {
            message: message.into(),
            location: ErrorLocation::Line(line),
        }
    }

    /// Creates an error raised at end of input.
    #[must_use]
    pub fn at_end_of_file(message: impl Into<EcoString>) -> Self {
        Self {
            message: message.into(),
            location: ErrorLocation::EndOfFile,
        }
    }
}

/// Parses a token stream into a `Program` tree.
///
/// Comments in the stream are skipped transparently; they never appear
/// in the tree. An empty stream parses to an empty `Program`.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] encountered; no tree survives a
/// failed parse.
pub fn parse(tokens: Vec<Token>) -> Result<Node, SyntaxError> {
    Parser::new(tokens).parse_program()
}

/// The parser state: the token stream and a cursor into it.
pub(super) struct Parser {
    /// The tokens being parsed, comments included.
    tokens: Vec<Token>,
    /// Current raw position; may rest on a comment between reads.
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Moves the cursor forward past any comment tokens.
    fn skip_comments(&mut self) {
        while self
            .tokens
            .get(self.current)
            .is_some_and(Token::is_comment)
        {
            self.current += 1;
        }
    }

    /// Returns the next meaningful token, or `None` at end of input.
    pub(super) fn peek(&mut self) -> Option<&Token> {
        self.skip_comments();
        self.tokens.get(self.current)
    }

    /// Returns the `offset`-th meaningful token ahead (0 is `peek`).
    pub(super) fn lookahead(&mut self, offset: usize) -> Option<&Token> {
        self.skip_comments();
        let mut pos = self.current;
        for _ in 0..offset {
            pos += 1;
            while self.tokens.get(pos).is_some_and(Token::is_comment) {
                pos += 1;
            }
        }
        self.tokens.get(pos)
    }

    /// Moves the cursor past the current token by one raw position; the
    /// next read re-skips any newly exposed comments.
    fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }

    /// True when no meaningful token remains.
    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// The current token's line, or -1 at end of input.
    pub(super) fn current_line(&mut self) -> i32 {
        self.peek().map_or(-1, |t| t.line)
    }

    /// True when the next meaningful token has the given value.
    pub(super) fn peek_value_is(&mut self, value: &str) -> bool {
        self.peek().is_some_and(|t| t.value == value)
    }

    /// True when the next meaningful token's value is in the given set.
    pub(super) fn peek_value_in(&mut self, values: &[&str]) -> bool {
        self.peek()
            .is_some_and(|t| values.contains(&t.value.as_str()))
    }

    /// True when the next meaningful token has the given class.
    pub(super) fn peek_class_is(&mut self, class: TokenClass) -> bool {
        self.peek().is_some_and(|t| t.class == class)
    }

    /// Consumes and returns the next token if it has the given class
    /// (and value, when one is supplied); otherwise raises the fatal
    /// mismatch error. This is the only primitive that raises.
    pub(super) fn expect(
        &mut self,
        class: TokenClass,
        value: Option<&str>,
    ) -> Result<Token, SyntaxError> {
        if let Some(token) = self.peek() {
            if token.class == class && value.map_or(true, |v| token.value == v) {
                let token = token.clone();
                self.advance();
                return Ok(token);
            }
        }
        Err(self.expectation_error(class, value))
    }

    // ========================================================================
    // Error Construction
    // ========================================================================

    /// Builds the expected-versus-actual mismatch error at the current
    /// position.
    fn expectation_error(&mut self, class: TokenClass, value: Option<&str>) -> SyntaxError {
        let mut message = format!("Expected {class}");
        if let Some(v) = value {
            message.push_str(&format!(" with value '{v}'"));
        }
        match self.peek() {
            Some(token) => {
                message.push_str(&format!(
                    ", but got {} with value '{}'",
                    token.class, token.value
                ));
                SyntaxError::at_line(token.line, message)
            }
            None => {
                message.push_str(", but got EOF with value ''");
                SyntaxError::at_end_of_file(message)
            }
        }
    }

    /// Builds an error with a production-specific message at the current
    /// position.
    pub(super) fn error_here(&mut self, message: &str) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::at_line(token.line, message),
            None => SyntaxError::at_end_of_file(message),
        }
    }

    // ========================================================================
    // Program Parsing
    // ========================================================================

    /// Parses the whole stream as a `Program`.
    ///
    /// The root is stamped with the first meaningful token's line: 0 for
    /// an empty stream, -1 for a stream holding only comments.
    fn parse_program(&mut self) -> Result<Node, SyntaxError> {
        let line = if self.tokens.is_empty() {
            0
        } else {
            self.current_line()
        };
        let mut program = Node::new(NodeKind::Program, "", line);
        while !self.is_at_end() {
            program.push_child(self.parse_top_level_declaration()?);
        }
        Ok(program)
    }
}
