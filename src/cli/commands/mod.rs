//! Command implementations

pub mod fix;
pub mod scan;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Output format for the scan report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored per-file summary
    Text,
    /// Full report as JSON
    Json,
}

/// Arguments for the `scan` command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Report output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `fix` command
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Clone this remote repository into the target directory before scanning
    #[arg(long, value_name = "URL")]
    pub repo_url: Option<String>,

    /// Branch to check out after cloning (requires --repo-url)
    #[arg(long, value_name = "BRANCH", default_value = "main", requires = "repo_url")]
    pub repo_branch: String,

    /// Branch the rewritten files are committed to (overrides config)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Branch the pull request targets (overrides config)
    #[arg(long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Skip the email report even if enabled in config
    #[arg(long)]
    pub no_email: bool,
}
