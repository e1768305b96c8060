//! TxKV CLI
//!
//! Command-line driver for the TxKV transactional store.
//!
//! # Commands
//!
//! - `demo` - Walk through the reference begin/put/commit/rollback scenario
//! - `run` - Execute a command script from a file or stdin
//! - `version` - Show version information

mod commands;
mod error;
mod script;

use clap::{Parser, Subcommand};
use commands::run::{Format, RunOptions};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// TxKV command-line driver.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through the reference scenario and print each result
    Demo,

    /// Execute a command script (GET, PUT, BEGIN, COMMIT, ROLLBACK, STATE, DUMP)
    Run {
        /// Script file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Output format for DUMP (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Stop at the first rejected or malformed command
        #[arg(short, long)]
        strict: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Demo => {
            commands::demo::run(&mut out)?;
        }
        Commands::Run {
            file,
            format,
            strict,
        } => {
            let options = RunOptions {
                format: format.parse::<Format>()?,
                strict,
            };
            match file {
                Some(path) => {
                    let input = BufReader::new(File::open(&path)?);
                    commands::run::run(input, &mut out, options)?;
                }
                None => {
                    commands::run::run(io::stdin().lock(), &mut out, options)?;
                }
            }
        }
        Commands::Version => {
            writeln!(out, "TxKV CLI v{}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "TxKV Core v{}", txkv_core::VERSION)?;
        }
    }

    Ok(())
}
