// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The on-disk token interchange format.
//!
//! Scanner output is persisted one token per line as
//!
//! ```text
//! <CLASS, VALUE, LINE>
//! ```
//!
//! with a literal `, ` between fields. The loader splits each line on its
//! *first* and *last* comma: everything between `<` and the first comma
//! is the class, everything between the first separator and the last
//! comma is the value, and the remainder before the closing `>` is the
//! decimal line number. Splitting this way keeps lexemes that themselves
//! contain commas intact — the `,` special character and preprocessor
//! directives such as `#define f(a,b) a` round-trip exactly.
//!
//! Malformed lines are never fatal: they are skipped with a `Warning:` on
//! stderr and loading continues. Well-formed output reloads and
//! re-serializes byte-identically.
//!
//! # Example
//!
//! ```
//! use smallc_core::interchange::{read_tokens, serialize_tokens};
//! use smallc_core::source_analysis::scan;
//!
//! let tokens = scan("int x;").unwrap().tokens;
//! let text = serialize_tokens(&tokens);
//! assert!(text.starts_with("<KEYWORD, int, 1>"));
//!
//! let reloaded = read_tokens(text.as_bytes()).unwrap();
//! assert_eq!(reloaded, tokens);
//! ```

use std::io::{self, BufRead, Write};

use crate::source_analysis::{Token, TokenClass};

/// Formats one token as its interchange line, without the newline.
#[must_use]
pub fn format_token(token: &Token) -> String {
    format!("<{}, {}, {}>", token.class, token.value, token.line)
}

/// Serializes a token stream, one line per token.
#[must_use]
pub fn serialize_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format_token(token));
        out.push('\n');
    }
    out
}

/// Writes a token stream to the given writer.
///
/// # Errors
///
/// Propagates any I/O error from the writer.
pub fn write_tokens<W: Write>(writer: &mut W, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(writer, "{}", format_token(token))?;
    }
    Ok(())
}

/// Reads a token stream, skipping malformed lines with a warning.
///
/// # Errors
///
/// Propagates I/O errors from the reader. Malformed *content* is not an
/// error: each bad line is reported on stderr and skipped.
pub fn read_tokens<R: BufRead>(reader: R) -> io::Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(token) => tokens.push(token),
            Err(LineError::Malformed) => {
                eprintln!("Warning: malformed token line, skipping: {line}");
            }
            Err(LineError::UnknownClass(class)) => {
                eprintln!("Warning: unknown token class '{class}', skipping line: {line}");
            }
            Err(LineError::BadLineNumber(field)) => {
                eprintln!("Warning: malformed line number '{field}', skipping line: {line}");
            }
        }
    }
    Ok(tokens)
}

/// Why a line could not be parsed as a token.
enum LineError {
    /// Framing is broken: too short, missing separators, or sliced apart.
    Malformed,
    /// The class field is not in the closed set.
    UnknownClass(String),
    /// The line-number field is not a decimal integer.
    BadLineNumber(String),
}

/// Parses one `<CLASS, VALUE, LINE>` line.
fn parse_line(line: &str) -> Result<Token, LineError> {
    if line.len() < 5 {
        return Err(LineError::Malformed);
    }

    let first_comma = line.find(',').ok_or(LineError::Malformed)?;
    let last_comma = line.rfind(',').ok_or(LineError::Malformed)?;
    if first_comma == last_comma {
        return Err(LineError::Malformed);
    }

    let class_field = line.get(1..first_comma).ok_or(LineError::Malformed)?;
    let value_field = line
        .get(first_comma + 2..last_comma)
        .ok_or(LineError::Malformed)?;
    let line_field = line
        .get(last_comma + 2..line.len() - 1)
        .ok_or(LineError::Malformed)?;

    let class: TokenClass = class_field
        .parse()
        .map_err(|_| LineError::UnknownClass(class_field.to_string()))?;
    let line_number: i32 = line_field
        .parse()
        .map_err(|_| LineError::BadLineNumber(line_field.to_string()))?;

    Ok(Token::new(class, value_field, line_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::scan;

    #[test]
    fn format_uses_exact_framing() {
        let token = Token::new(TokenClass::Keyword, "int", 1);
        assert_eq!(format_token(&token), "<KEYWORD, int, 1>");

        let semi = Token::new(TokenClass::SpecialCharacter, ";", 12);
        assert_eq!(format_token(&semi), "<SPECIAL CHARACTER, ;, 12>");
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let tokens = scan("int main() { /* body */ return 0; } // done")
            .unwrap()
            .tokens;
        let first = serialize_tokens(&tokens);
        let reloaded = read_tokens(first.as_bytes()).unwrap();
        let second = serialize_tokens(&reloaded);
        assert_eq!(first, second);
    }

    #[test]
    fn comma_token_survives_the_first_last_comma_split() {
        let tokens = vec![Token::new(TokenClass::SpecialCharacter, ",", 1)];
        let text = serialize_tokens(&tokens);
        assert_eq!(text, "<SPECIAL CHARACTER, ,, 1>\n");
        assert_eq!(read_tokens(text.as_bytes()).unwrap(), tokens);
    }

    #[test]
    fn directive_value_with_commas_survives() {
        let tokens = vec![Token::new(
            TokenClass::PreprocessorDirective,
            "#define f(a,b) a",
            3,
        )];
        let text = serialize_tokens(&tokens);
        assert_eq!(read_tokens(text.as_bytes()).unwrap(), tokens);
    }

    #[test]
    fn char_literal_line_loads() {
        let loaded = read_tokens("<CHAR_LITERAL, a, 4>\n".as_bytes()).unwrap();
        assert_eq!(loaded, vec![Token::new(TokenClass::CharLiteral, "a", 4)]);
    }

    #[test]
    fn short_lines_are_skipped() {
        let loaded = read_tokens("<a,>\n<KEYWORD, int, 1>\n".as_bytes()).unwrap();
        assert_eq!(loaded, vec![Token::new(TokenClass::Keyword, "int", 1)]);
    }

    #[test]
    fn lines_without_two_commas_are_skipped() {
        let text = "no commas here\n<KEYWORD int 1>\n<OPERATOR, +, 2>\n";
        let loaded = read_tokens(text.as_bytes()).unwrap();
        assert_eq!(loaded, vec![Token::new(TokenClass::Operator, "+", 2)]);
    }

    #[test]
    fn bad_line_numbers_are_skipped() {
        let text = "<KEYWORD, int, one>\n<KEYWORD, int, 1>\n";
        let loaded = read_tokens(text.as_bytes()).unwrap();
        assert_eq!(loaded, vec![Token::new(TokenClass::Keyword, "int", 1)]);
    }

    #[test]
    fn unknown_classes_are_skipped() {
        let text = "<STRING LITERAL, hi, 1>\n<IDENTIFIER, hi, 1>\n";
        let loaded = read_tokens(text.as_bytes()).unwrap();
        assert_eq!(loaded, vec![Token::new(TokenClass::Identifier, "hi", 1)]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\n<KEYWORD, int, 1>\n\n";
        let loaded = read_tokens(text.as_bytes()).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn write_tokens_matches_serialize() {
        let tokens = scan("a = b + 1;").unwrap().tokens;
        let mut buf = Vec::new();
        write_tokens(&mut buf, &tokens).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), serialize_tokens(&tokens));
    }
}
