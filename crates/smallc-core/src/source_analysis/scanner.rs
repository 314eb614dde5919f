// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for C-subset source code.
//!
//! This module converts source text into a stream of [`Token`]s. The
//! scanner is hand-written: a single forward pass with bounded lookahead,
//! dispatching on the current character in a fixed priority order:
//!
//! 1. Whitespace (newlines advance the line counter)
//! 2. Comments (`//` and `/* … */`; a lone `/` falls through to operators)
//! 3. Preprocessor directives (`#…` to end of line, kept opaque)
//! 4. Operators, longest match first (three chars, then two, then one)
//! 5. Special characters (plus the narrow `'x` character-literal rule)
//! 6. Identifiers and keywords
//! 7. Numeric constants (segmented at repeated radix points)
//!
//! Anything else is a fatal [`ScanError::UnexpectedCharacter`]. Errors
//! are positional and non-recoverable: the scan stops at the first one
//! and no output survives it.
//!
//! # Example
//!
//! ```
//! use smallc_core::source_analysis::{scan, TokenClass};
//!
//! let output = scan("int x = 1;").expect("source is clean");
//! assert_eq!(output.tokens.len(), 5);
//! assert_eq!(output.tokens[0].class, TokenClass::Keyword);
//! assert_eq!(output.line_count, 1);
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{Token, TokenClass};

/// A fatal scan failure.
///
/// The scanner is single-pass and non-recoverable: the first error ends
/// the scan, and callers must not persist any partial token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ScanError {
    /// A character no lexical rule accepts, with the line it was found on.
    #[error("unexpected character '{ch}' found at line {line}")]
    #[diagnostic(code(smallc::scan::unexpected_character))]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// 1-based line where the character occurred.
        line: i32,
    },

    /// A `/*` comment still open at end of input.
    #[error("unterminated multi-line comment at end of file")]
    #[diagnostic(code(smallc::scan::unterminated_block_comment))]
    UnterminatedBlockComment,
}

/// The result of a successful scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// Lines visited: 0 for empty input, otherwise the final line number.
    pub line_count: i32,
}

/// Scans source text into a token stream.
///
/// This is the main entry point for lexical analysis. All scanner state
/// lives in a per-call value, so repeated scans never see residue from
/// earlier runs.
///
/// # Errors
///
/// Returns [`ScanError`] on the first unexpected character or an
/// unterminated block comment.
pub fn scan(source: &str) -> Result<ScanOutput, ScanError> {
    Scanner::new(source).run()
}

/// A scanner over one source string.
///
/// Holds the character cursor, the 1-based line counter, and the tokens
/// emitted so far. Constructed fresh for every scan.
struct Scanner<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Current 1-based line.
    line: i32,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        let mut iter = self.chars.clone();
        for _ in 0..n {
            iter.next();
        }
        iter.next().map(|(_, c)| c)
    }

    /// Returns the next `n` characters as a string, or `None` if fewer
    /// than `n` remain.
    fn peek_run(&self, n: usize) -> Option<String> {
        let run: String = self.chars.clone().take(n).map(|(_, c)| c).collect();
        (run.chars().count() == n).then_some(run)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Appends a token stamped with the given line.
    fn push_token(&mut self, class: TokenClass, value: impl Into<EcoString>, line: i32) {
        self.tokens.push(Token::new(class, value, line));
    }

    /// Runs the scan to completion or to the first fatal error.
    fn run(mut self) -> Result<ScanOutput, ScanError> {
        if self.source.is_empty() {
            return Ok(ScanOutput {
                tokens: Vec::new(),
                line_count: 0,
            });
        }

        while let Some(c) = self.peek_char() {
            // Whitespace
            if c == '\n' {
                self.line += 1;
                self.advance();
                continue;
            }
            if c.is_ascii_whitespace() {
                self.advance();
                continue;
            }

            // Comments; a `/` not opening a comment is division and falls
            // through to the operator rules.
            if c == '/' {
                match self.peek_char_n(1) {
                    Some('/') => {
                        self.scan_line_comment();
                        continue;
                    }
                    Some('*') => {
                        self.scan_block_comment()?;
                        continue;
                    }
                    _ => {}
                }
            }

            // Preprocessor directives
            if c == '#' {
                self.scan_directive();
                continue;
            }

            // Operators, longest match first
            if self.scan_operator() {
                continue;
            }

            // Special characters
            if is_special_char(c) {
                self.push_token(TokenClass::SpecialCharacter, String::from(c), self.line);
                self.advance();
                continue;
            }

            // Rudimentary character literal: 'x not followed by a word
            // character. Any other quote is an unexpected character.
            if c == '\'' && self.scan_char_literal() {
                continue;
            }

            // Identifiers and keywords
            if c.is_ascii_alphabetic() || c == '_' {
                self.scan_word();
                continue;
            }

            // Numeric constants
            if c.is_ascii_digit() {
                self.scan_number();
                continue;
            }

            // Nothing matched: fatal, and positional.
            return Err(ScanError::UnexpectedCharacter { ch: c, line: self.line });
        }

        Ok(ScanOutput {
            tokens: self.tokens,
            line_count: self.line,
        })
    }

    /// Consumes `//` up to (not including) the newline and emits one
    /// placeholder token stamped with the comment's opening line.
    fn scan_line_comment(&mut self) {
        let line = self.line;
        self.advance_while(|c| c != '\n');
        self.push_token(TokenClass::SingleLineComment, "//", line);
    }

    /// Consumes a `/* … */` comment, counting embedded newlines, and
    /// emits one placeholder token stamped with the opening line.
    fn scan_block_comment(&mut self) -> Result<(), ScanError> {
        let line = self.line;
        self.advance(); // /
        self.advance(); // *

        loop {
            match self.peek_char() {
                None => return Err(ScanError::UnterminatedBlockComment),
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance(); // *
                    self.advance(); // /
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.push_token(TokenClass::MultiLineComment, "/* .. */", line);
        Ok(())
    }

    /// Consumes `#…` to end of line and emits it as one opaque token,
    /// leading `#` included.
    fn scan_directive(&mut self) {
        let start = self.position;
        self.advance_while(|c| c != '\n');
        let text = &self.source[start..self.position];
        self.push_token(TokenClass::PreprocessorDirective, text, self.line);
    }

    /// Tries the operator rules in maximal-munch order: the next three
    /// characters, then two, then one. Returns `true` if a token was
    /// emitted.
    fn scan_operator(&mut self) -> bool {
        if let Some(run) = self.peek_run(3) {
            if is_multi_char_operator(&run) {
                self.push_token(TokenClass::Operator, run, self.line);
                for _ in 0..3 {
                    self.advance();
                }
                return true;
            }
        }
        if let Some(run) = self.peek_run(2) {
            if is_multi_char_operator(&run) {
                self.push_token(TokenClass::Operator, run, self.line);
                for _ in 0..2 {
                    self.advance();
                }
                return true;
            }
        }
        if let Some(c) = self.peek_char() {
            if is_single_char_operator(c) {
                self.push_token(TokenClass::Operator, String::from(c), self.line);
                self.advance();
                return true;
            }
        }
        false
    }

    /// Emits a `CHAR_LITERAL` when the quote is followed by exactly one
    /// alphanumeric and then a non-word character. Consumes the quote and
    /// the literal character only; the grammar never consumes the token.
    ///
    /// Returns `false` (consuming nothing) when the pattern does not
    /// match, leaving the quote to the unexpected-character rule.
    fn scan_char_literal(&mut self) -> bool {
        let Some(literal) = self.peek_char_n(1) else {
            return false;
        };
        if !literal.is_ascii_alphanumeric() {
            return false;
        }
        if self
            .peek_char_n(2)
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return false;
        }
        self.advance(); // '
        self.advance(); // the literal character
        self.push_token(TokenClass::CharLiteral, String::from(literal), self.line);
        true
    }

    /// Consumes a word of letters, digits, and underscores and classifies
    /// it as keyword or identifier.
    fn scan_word(&mut self) {
        let start = self.position;
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let word = &self.source[start..self.position];
        let class = if is_keyword(word) {
            TokenClass::Keyword
        } else {
            TokenClass::Identifier
        };
        self.push_token(class, word, self.line);
    }

    /// Consumes a run of digits and radix points under the segmented
    /// rule: a constant holds at most one radix point, and a second `.`
    /// inside an ongoing number closes the current constant and opens a
    /// new one starting at that `.`.
    ///
    /// `0.2222.3333` therefore yields `0.2222` and `.3333`; a pure
    /// integer run yields a single constant.
    fn scan_number(&mut self) {
        let line = self.line;
        let mut start = self.position;
        let mut seen_radix_point = false;

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' {
                if seen_radix_point {
                    let segment = &self.source[start..self.position];
                    self.push_token(TokenClass::NumericConstant, segment, line);
                    start = self.position;
                }
                seen_radix_point = true;
                self.advance();
            } else {
                break;
            }
        }

        let segment = &self.source[start..self.position];
        self.push_token(TokenClass::NumericConstant, segment, line);
    }
}

/// The 32 reserved words of the supported C subset.
fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "auto"
            | "break"
            | "case"
            | "char"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extern"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "int"
            | "long"
            | "register"
            | "return"
            | "short"
            | "signed"
            | "sizeof"
            | "static"
            | "struct"
            | "switch"
            | "typedef"
            | "union"
            | "unsigned"
            | "void"
            | "volatile"
            | "while"
    )
}

/// Multi-character operators, tried at three characters and then two.
///
/// The identifier-shaped `pow` entry is deliberate: the original operator
/// table carries it, so the three-character munch claims `pow` out of any
/// word that starts with it.
fn is_multi_char_operator(op: &str) -> bool {
    matches!(
        op,
        "++" | "--"
            | "<<"
            | ">>"
            | "=="
            | "&&"
            | "||"
            | "+="
            | "-="
            | "*="
            | "/="
            | "%="
            | "&="
            | "|="
            | "^="
            | "<<="
            | ">>="
            | "!="
            | ">="
            | "<="
            | "pow"
    )
}

/// Single-character operators.
fn is_single_char_operator(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '=' | '<' | '>' | '%' | '^' | '|' | '&' | '~' | '!'
    )
}

/// One-character delimiters.
fn is_special_char(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '{' | '}' | ';' | ',' | '#' | '.' | '[' | ']'
    )
}
