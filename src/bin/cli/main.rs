//! CLI tool for exploding, editing and rebuilding WAD archives.

mod commands;
mod exit_codes;
mod logger;
mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Explode, edit and rebuild WAD archives region by region
#[derive(Parser)]
#[command(name = "wadlump")]
#[command(author, version, about = "Explode, edit and rebuild WAD archives region by region", long_about = None)]
pub struct Cli {
    /// Source archive or region directory
    path: PathBuf,

    /// Changes to apply: NAME, NAME=text, NAME=:file, NAME=@, +NAME=text, +NAME=:file
    #[arg(value_name = "CHANGE")]
    changes: Vec<String>,

    /// Apply each change to the first matching region only
    #[arg(long, short = '1')]
    once: bool,

    /// Maintain the case of region names in matching and output
    #[arg(long, short = 'c')]
    case: bool,

    /// Match lump names case-sensitively without changing output names
    #[arg(long, short = 'm')]
    match_case: bool,

    /// Write a region directory
    #[arg(long, short = 'd', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Write an archive
    #[arg(long, short = 'o', value_name = "WAD")]
    output: Option<PathBuf>,

    /// Write the result back over the source
    #[arg(long, short = 'i', conflicts_with = "output")]
    in_place: bool,

    /// Overwrite existing output
    #[arg(long, short = 'f')]
    force: bool,

    /// Write lump files only to the region directory
    #[arg(long, short = 'l')]
    lumps: bool,

    /// Resolve namespaces and nest region files in namespace directories
    #[arg(long, short = 'n')]
    namespaces: bool,

    /// Order output regions by source offset
    #[arg(long, short = 'O')]
    offset_order: bool,

    /// Keep only the regions named by bare changes
    #[arg(long, short = 'x')]
    invert: bool,

    /// Print the region table
    #[arg(long, short = 's')]
    show: bool,

    /// Output format
    #[arg(long, short = 'F', value_enum, default_value = "human")]
    format: OutputFormat,

    /// Suppress statistics and warnings
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    /// Log pipeline progress
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();
    logger::init(cli.quiet, cli.verbose);

    let exit_code = commands::run(&cli);
    std::process::exit(exit_code.code());
}
