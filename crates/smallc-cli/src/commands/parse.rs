// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse a token file and print the syntax tree.

use std::fs;
use std::io::BufReader;

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use smallc_core::interchange;
use smallc_core::source_analysis::parse;
use tracing::debug;

/// Load the token file, parse it, and print the verdict.
///
/// On success the rendered tree goes to stdout; on a syntax error the
/// single diagnostic goes to stderr, the failure verdict to stdout, and
/// the process exits 1.
pub fn run(tokens_path: &Utf8Path) -> Result<()> {
    let file = fs::File::open(tokens_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not open token file '{tokens_path}'"))?;
    let tokens = interchange::read_tokens(BufReader::new(file))
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read token file '{tokens_path}'"))?;

    if tokens.is_empty() {
        miette::bail!("no tokens to parse; halting");
    }

    println!("Token file loaded. {} tokens read.", tokens.len());
    debug!(token_count = tokens.len(), "Starting parse");

    match parse(tokens) {
        Ok(tree) => {
            println!("Program is syntactically valid.");
            print!("{tree}");
            Ok(())
        }
        Err(error) => {
            eprintln!("{error}");
            println!("Program has one or more syntax errors.");
            std::process::exit(1);
        }
    }
}
