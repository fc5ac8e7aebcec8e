//! chordbed CLI - renders the ambient guitar loop library
//!
//! This binary provides commands for generating, listing, and verifying the
//! chord loops under `assets/chords/library/`.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use chordbed_cli::commands;

/// chordbed - Deterministic Guitar Chord Loop Generator
#[derive(Parser)]
#[command(name = "chordbed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render loops and write them under <out_root>/assets/chords/library/
    Generate {
        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Only render loops whose filename contains this substring
        #[arg(long)]
        only: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the loop table
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Re-render loops in memory and compare PCM hashes with files on disk
    Verify {
        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Only verify loops whose filename contains this substring
        #[arg(long)]
        only: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            out_root,
            only,
            json,
        } => commands::generate::run(out_root.as_deref(), only.as_deref(), json),
        Commands::List { json } => commands::list::run(json),
        Commands::Verify {
            out_root,
            only,
            json,
        } => commands::verify::run(out_root.as_deref(), only.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
