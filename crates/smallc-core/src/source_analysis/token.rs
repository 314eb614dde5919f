// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for smallc lexical analysis.
//!
//! A [`Token`] is the unit of interchange between the scanner and the
//! parser: a lexical class, the exact lexeme text, and the 1-based line
//! where the lexeme began. The class set is closed, and each class has a
//! fixed spelling used by the token file (see [`crate::interchange`]).
//!
//! Comments are tokens too — the scanner emits one token per comment
//! regardless of length, with a fixed placeholder value (`//` for
//! single-line comments, `/* .. */` for block comments). The parser
//! skips them; formatting tools reading the token file do not have to.

use std::fmt;
use std::str::FromStr;

use ecow::EcoString;

/// The lexical class of a token.
///
/// `Display` renders the exact spelling persisted in the token file;
/// `FromStr` accepts exactly those spellings back. The set is closed —
/// the interchange loader skips lines carrying any other class string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// One of the 32 reserved words: `auto` through `while`.
    Keyword,
    /// A word that is not a reserved word: `main`, `x`, `_tmp2`.
    Identifier,
    /// A single- or multi-character operator: `+`, `<<=`, `==`.
    Operator,
    /// A one-character delimiter: `(`, `)`, `{`, `}`, `;`, `,`, `#`, `.`, `[`, `]`.
    SpecialCharacter,
    /// An integer or radix-point numeric lexeme: `42`, `0.2222`, `.3333`.
    NumericConstant,
    /// A whole `#…` line, including the leading `#`.
    PreprocessorDirective,
    /// A `//` comment, recorded with the placeholder value `//`.
    SingleLineComment,
    /// A `/* … */` comment, recorded with the placeholder value `/* .. */`.
    MultiLineComment,
    /// A rudimentary single-character literal: the `a` of `'a`.
    CharLiteral,
}

impl TokenClass {
    /// Returns `true` for the two comment classes.
    ///
    /// The parser treats exactly these classes as whitespace.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            Self::Keyword => "KEYWORD",
            Self::Identifier => "IDENTIFIER",
            Self::Operator => "OPERATOR",
            Self::SpecialCharacter => "SPECIAL CHARACTER",
            Self::NumericConstant => "NUMERIC CONSTANT",
            Self::PreprocessorDirective => "PREPROCESSOR DIRECTIVE",
            Self::SingleLineComment => "Single-Line Comment",
            Self::MultiLineComment => "Multi-Line Comment",
            Self::CharLiteral => "CHAR_LITERAL",
        };
        f.write_str(spelling)
    }
}

/// Error returned when a class string is not one of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTokenClass(pub EcoString);

impl fmt::Display for UnknownTokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token class '{}'", self.0)
    }
}

impl std::error::Error for UnknownTokenClass {}

impl FromStr for TokenClass {
    type Err = UnknownTokenClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KEYWORD" => Ok(Self::Keyword),
            "IDENTIFIER" => Ok(Self::Identifier),
            "OPERATOR" => Ok(Self::Operator),
            "SPECIAL CHARACTER" => Ok(Self::SpecialCharacter),
            "NUMERIC CONSTANT" => Ok(Self::NumericConstant),
            "PREPROCESSOR DIRECTIVE" => Ok(Self::PreprocessorDirective),
            "Single-Line Comment" => Ok(Self::SingleLineComment),
            "Multi-Line Comment" => Ok(Self::MultiLineComment),
            "CHAR_LITERAL" => Ok(Self::CharLiteral),
            other => Err(UnknownTokenClass(EcoString::from(other))),
        }
    }
}

/// A classified lexeme with its source line.
///
/// `value` holds the exact lexeme text with two exceptions: single-line
/// comments are recorded as the two characters `//` and block comments
/// as the six-character string `/* .. */`. `line` is 1-based and names
/// the line where the lexeme *began* — a block comment spanning several
/// lines is stamped with its opening line.
///
/// # Examples
///
/// ```
/// use smallc_core::source_analysis::{Token, TokenClass};
///
/// let token = Token::new(TokenClass::Identifier, "main", 1);
/// assert_eq!(token.value, "main");
/// assert_eq!(token.to_string(), "main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lexical class.
    pub class: TokenClass,
    /// The exact lexeme text (or a comment placeholder).
    pub value: EcoString,
    /// 1-based line where the lexeme began.
    pub line: i32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(class: TokenClass, value: impl Into<EcoString>, line: i32) -> Self {
        Self {
            class,
            value: value.into(),
            line,
        }
    }

    /// Returns `true` if this token is a comment of either flavor.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        self.class.is_comment()
    }

    /// Returns `true` if this token has the given class and value.
    #[must_use]
    pub fn is(&self, class: TokenClass, value: &str) -> bool {
        self.class == class && self.value == value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
