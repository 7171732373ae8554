//! # CLI Module
//!
//! Command-line interface for codesentry using `clap`.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Scan a repository and report findings |
//! | `fix` | Scan, rewrite flagged files, push a fix branch, email the report |
//!
//! All commands support the global options `-v/--verbose` (repeatable),
//! `-c/--config <FILE>`, and `-C/--directory <DIR>`.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{FixArgs, ScanArgs};

/// codesentry - scan repositories for security findings and drive automated fixes
#[derive(Parser, Debug)]
#[command(name = "codesentry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository root (defaults to current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository and report findings
    Scan(ScanArgs),

    /// Scan, rewrite flagged files, push a fix branch, and email the report
    Fix(FixArgs),
}
