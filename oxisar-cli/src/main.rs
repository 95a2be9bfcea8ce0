//! OxiSar CLI
//!
//! Inspect, convert and unpack Symbol Art (`.sar`) files.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_decode, cmd_dump, cmd_encode, cmd_info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxisar")]
#[command(author, version, about = "Symbol Art (.sar) codec - Pure Rust")]
#[command(long_about = "
OxiSar reads and writes Symbol Art files: encrypted, optionally
PRS-compressed containers of layered symbol drawings.

Examples:
  oxisar info art.sar
  oxisar decode art.sar -o art.json --pretty
  oxisar encode art.json -o art.sar
  oxisar dump art.sar -o art.bin
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a Symbol Art file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// List every layer
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Convert a Symbol Art file to JSON
    #[command(alias = "d")]
    Decode {
        /// File to decode
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the JSON
        #[arg(short, long)]
        pretty: bool,

        /// Print a summary to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert a JSON document to a Symbol Art file
    #[command(alias = "e")]
    Encode {
        /// JSON document
        input: PathBuf,

        /// Output .sar file
        #[arg(short, long)]
        output: PathBuf,

        /// Print a summary to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the decrypted, decompressed layout bytes
    Dump {
        /// File to unpack
        file: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info {
            file,
            verbose,
            json,
        } => cmd_info(&file, verbose, json),
        Commands::Decode {
            file,
            output,
            pretty,
            verbose,
        } => cmd_decode(&file, output.as_deref(), pretty, verbose),
        Commands::Encode {
            input,
            output,
            verbose,
        } => cmd_encode(&input, &output, verbose),
        Commands::Dump { file, output } => cmd_dump(&file, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
