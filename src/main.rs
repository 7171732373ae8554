//! codesentry - scan repositories for security findings and drive automated fixes
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codesentry::cli::{commands, Cli, Commands};
use codesentry::config::Config;
use codesentry::exit_codes;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let root = cli.directory.unwrap_or_else(|| PathBuf::from("."));

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::ERROR);
        }
    };

    let result = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, &root, config).await,
        Commands::Fix(args) => commands::fix::execute(args, &root, config).await,
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
