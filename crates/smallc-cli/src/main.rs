// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! smallc command-line interface.
//!
//! This is the main entry point for the `smallc` command. The two
//! subcommands are the two halves of the front end: `scan` writes the
//! token file, `parse` reads it back and prints the syntax tree. The
//! token file is their only shared state, so each can be run (and
//! inspected) on its own.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::Result;

mod commands;

/// smallc: a scanner and parser for a C99 subset
#[derive(Debug, Parser)]
#[command(name = "smallc")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a C source file and write the token file
    Scan {
        /// Source file to scan; prompts interactively when omitted
        path: Option<Utf8PathBuf>,

        /// Where to write the token file
        #[arg(short, long, default_value = "tokens.txt")]
        output: Utf8PathBuf,
    },

    /// Parse a token file and print the syntax tree
    Parse {
        /// Token file produced by `smallc scan`
        #[arg(default_value = "tokens.txt")]
        tokens: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize the tracing subscriber only if RUST_LOG is explicitly
    // set, so stderr stays clean for diagnostics otherwise.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Scan { path, output } => commands::scan::run(path.as_deref(), &output),
        Command::Parse { tokens } => commands::parse::run(&tokens),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
