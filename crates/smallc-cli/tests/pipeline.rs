// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the scan → token file → parse pipeline.
//!
//! Each test runs the real `smallc` binary in a temporary working
//! directory, so the token file handoff between the two subcommands is
//! exercised exactly as a user would drive it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runs `smallc` with the given arguments in `dir`.
fn smallc(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_smallc"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run smallc binary")
}

fn write_source(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("failed to write test source");
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn scan_then_parse_accepts_a_valid_program() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "main.c", "int main(){return 0;}");

    let scan = smallc(temp.path(), &["scan", "main.c"]);
    assert!(scan.status.success(), "scan failed: {}", stderr_of(&scan));
    assert!(stdout_of(&scan).contains("Scanning complete."));
    assert!(stdout_of(&scan).contains("1 line(s)"));

    let tokens = fs::read_to_string(temp.path().join("tokens.txt")).unwrap();
    assert!(tokens.starts_with("<KEYWORD, int, 1>\n<IDENTIFIER, main, 1>\n"));
    assert_eq!(tokens.lines().count(), 9);

    let parse = smallc(temp.path(), &["parse"]);
    assert!(parse.status.success(), "parse failed: {}", stderr_of(&parse));
    let stdout = stdout_of(&parse);
    assert!(stdout.contains("Token file loaded. 9 tokens read."));
    assert!(stdout.contains("Program is syntactically valid."));
    assert!(stdout.contains("└── Program () [Line: 1]"));
    assert!(stdout.contains("FunctionDefinition (main) [Line: 1]"));
    assert!(stdout.contains("ReturnStatement (return) [Line: 1]"));
}

#[test]
fn unterminated_comment_fails_and_writes_no_token_file() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "bad.c", "/* never ends");

    let scan = smallc(temp.path(), &["scan", "bad.c"]);
    assert!(!scan.status.success());
    assert!(stderr_of(&scan).contains("unterminated multi-line comment"));
    assert!(!temp.path().join("tokens.txt").exists());
}

#[test]
fn unexpected_character_fails_with_position() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "bad.c", "int x = 10; int y = x $ 5;");

    let scan = smallc(temp.path(), &["scan", "bad.c"]);
    assert!(!scan.status.success());
    let stderr = stderr_of(&scan);
    assert!(stderr.contains("unexpected character '$'"));
    assert!(stderr.contains("line 1"));
    assert!(!temp.path().join("tokens.txt").exists());
}

#[test]
fn empty_source_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "empty.c", "");

    let scan = smallc(temp.path(), &["scan", "empty.c"]);
    assert!(!scan.status.success());
    assert!(stderr_of(&scan).contains("empty"));
    assert!(!temp.path().join("tokens.txt").exists());
}

#[test]
fn syntax_error_prints_one_diagnostic_and_the_failure_verdict() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "bad.c", "float f = 0.2222.3333;");

    let scan = smallc(temp.path(), &["scan", "bad.c"]);
    assert!(scan.status.success(), "scan failed: {}", stderr_of(&scan));

    let parse = smallc(temp.path(), &["parse"]);
    assert!(!parse.status.success());
    let stderr = stderr_of(&parse);
    assert!(stderr.contains(
        "[Line 1] Syntax Error: Expected SPECIAL CHARACTER with value ';', \
         but got NUMERIC CONSTANT with value '.3333'"
    ));
    assert_eq!(stderr.matches("Syntax Error").count(), 1);
    assert!(stdout_of(&parse).contains("Program has one or more syntax errors."));
    assert!(!stdout_of(&parse).contains("Program is syntactically valid."));
}

#[test]
fn parse_without_a_token_file_halts() {
    let temp = TempDir::new().unwrap();

    let parse = smallc(temp.path(), &["parse"]);
    assert!(!parse.status.success());
    assert!(stderr_of(&parse).contains("tokens.txt"));
}

#[test]
fn parse_of_an_empty_token_file_halts() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tokens.txt"), "").unwrap();

    let parse = smallc(temp.path(), &["parse"]);
    assert!(!parse.status.success());
    assert!(stderr_of(&parse).contains("no tokens to parse"));
}

#[test]
fn comments_survive_scanning_but_not_parsing() {
    let temp = TempDir::new().unwrap();
    write_source(
        temp.path(),
        "main.c",
        "// entry point\nint main(){ /* body */ return 0; }",
    );

    let scan = smallc(temp.path(), &["scan", "main.c"]);
    assert!(scan.status.success());

    let tokens = fs::read_to_string(temp.path().join("tokens.txt")).unwrap();
    assert!(tokens.contains("<Single-Line Comment, //, 1>"));
    assert!(tokens.contains("<Multi-Line Comment, /* .. */, 2>"));

    let parse = smallc(temp.path(), &["parse"]);
    assert!(parse.status.success());
    let stdout = stdout_of(&parse);
    assert!(!stdout.contains("Comment"));
    assert!(stdout.contains("Program is syntactically valid."));
}

#[test]
fn scan_honors_a_custom_output_path() {
    let temp = TempDir::new().unwrap();
    write_source(temp.path(), "main.c", "int x;");

    let scan = smallc(temp.path(), &["scan", "main.c", "--output", "out.txt"]);
    assert!(scan.status.success());
    assert!(temp.path().join("out.txt").exists());
    assert!(!temp.path().join("tokens.txt").exists());

    let parse = smallc(temp.path(), &["parse", "out.txt"]);
    assert!(parse.status.success());
}

#[test]
fn token_file_round_trips_through_scan_and_reload() {
    let temp = TempDir::new().unwrap();
    write_source(
        temp.path(),
        "prog.c",
        "#include <stdio.h>\nint main() {\n  int a = 1, b = 2;\n  return a + b;\n}\n",
    );

    let scan = smallc(temp.path(), &["scan", "prog.c"]);
    assert!(scan.status.success());

    let written = fs::read_to_string(temp.path().join("tokens.txt")).unwrap();
    let reloaded = smallc_core::interchange::read_tokens(written.as_bytes()).unwrap();
    assert_eq!(smallc_core::interchange::serialize_tokens(&reloaded), written);
}
