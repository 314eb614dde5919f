// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Scan a source file and write the token file.

use std::fs;
use std::io::{self, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use smallc_core::interchange;
use smallc_core::source_analysis::scan;
use tracing::{debug, info};

/// Scan `path` (or a file obtained interactively when `path` is `None`)
/// and persist the token stream to `output`.
///
/// Nothing is written on a scan error: a failed scan must leave no
/// token file behind for the parser to pick up.
pub fn run(path: Option<&Utf8Path>, output: &Utf8Path) -> Result<()> {
    let (source_path, source) = match path {
        Some(p) => {
            let source = fs::read_to_string(p)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read source file '{p}'"))?;
            (p.to_path_buf(), source)
        }
        None => prompt_for_source()?,
    };

    info!("Scanning {source_path}");

    if source.is_empty() {
        miette::bail!("source file '{source_path}' is empty; no code to scan");
    }

    let result = scan(&source)?;
    debug!(token_count = result.tokens.len(), "Scan complete");

    let file = fs::File::create(output)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not create output file '{output}'"))?;
    let mut writer = BufWriter::new(file);
    interchange::write_tokens(&mut writer, &result.tokens)
        .into_diagnostic()
        .wrap_err("Failed to write token file")?;
    writer.flush().into_diagnostic()?;

    info!(line_count = result.line_count, "Token file written");
    println!("Scanning complete. Output written to {output}.");
    println!("Source size: {} line(s).", result.line_count);
    Ok(())
}

/// The interactive fallback: asks whether the file is in the current
/// directory, prompts for a name or full path accordingly, and loops
/// until a file opens.
fn prompt_for_source() -> Result<(Utf8PathBuf, String)> {
    let stdin = io::stdin();
    loop {
        print!("Is the source file in the current directory? (y/n): ");
        io::stdout().flush().into_diagnostic()?;

        let mut choice = String::new();
        let read = stdin.read_line(&mut choice).into_diagnostic()?;
        if read == 0 {
            miette::bail!("standard input closed; pass the source file as an argument instead");
        }

        if choice.trim().eq_ignore_ascii_case("n") {
            print!("Please enter the full path to the source file: ");
        } else {
            print!("Please enter the name of the source file: ");
        }
        io::stdout().flush().into_diagnostic()?;

        let mut entered = String::new();
        let read = stdin.read_line(&mut entered).into_diagnostic()?;
        if read == 0 {
            miette::bail!("standard input closed; pass the source file as an argument instead");
        }

        let path = Utf8PathBuf::from(entered.trim());
        match fs::read_to_string(&path) {
            Ok(source) => return Ok((path, source)),
            Err(e) => {
                eprintln!("Error: could not open file '{path}': {e}");
                println!("Please check the name or path and try again.");
            }
        }
    }
}
