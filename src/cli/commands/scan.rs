//! Scan command - report findings without touching the repository

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::{OutputFormat, ScanArgs};
use crate::classifier::HttpClassifier;
use crate::config::Config;
use crate::error::CodeSentryError;
use crate::exit_codes;
use crate::report::format::format_file_report;
use crate::report::{RepositoryReport, ScanOutcome};
use crate::scanner::repository::RepositoryAggregator;
use crate::scanner::{filesystem, FileScanner};

pub async fn execute(args: ScanArgs, root: &Path, config: Config) -> Result<i32, CodeSentryError> {
    let scanner = build_scanner(&config)?;
    let aggregator = RepositoryAggregator::new(scanner);

    let files = filesystem::load_repository_files(root, &config.scan.extensions)?;
    let report = aggregator.scan_repository(&files).await;

    let rendered = match args.format {
        OutputFormat::Text => render_text(root, &report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| CodeSentryError::ReportWrite {
                path: path.display().to_string(),
                source: e,
            })?;
            println!(
                "{} Report written to: {}",
                "Success:".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(exit_code_for(&report))
}

/// Build the per-file scanner, wiring in the classifier when enabled.
pub fn build_scanner(config: &Config) -> Result<FileScanner, CodeSentryError> {
    if !config.classifier.enabled {
        return Ok(FileScanner::new());
    }

    let timeout = Duration::from_secs(config.classifier.timeout_secs);
    let classifier = HttpClassifier::new(config.classifier.endpoint.clone(), timeout)?;
    Ok(FileScanner::with_classifier(Arc::new(classifier), timeout))
}

/// CI exit code for a finished scan.
pub fn exit_code_for(report: &RepositoryReport) -> i32 {
    if report.has_issues() {
        exit_codes::ISSUES_FOUND
    } else if report.has_failures() {
        exit_codes::SCAN_FAILURES
    } else {
        exit_codes::SUCCESS
    }
}

fn render_text(root: &Path, report: &RepositoryReport) -> String {
    let mut output = format!(
        "{} v{}\n{} {}\n\n",
        "codesentry".cyan().bold(),
        env!("CARGO_PKG_VERSION"),
        "Repository:".dimmed(),
        root.display().to_string().white().bold(),
    );

    for (path, file_report) in report.files() {
        let summary = format_file_report(file_report);
        let colored_summary = match file_report.outcome {
            ScanOutcome::Secure => summary.green(),
            ScanOutcome::Issues => summary.red(),
            ScanOutcome::Failed => summary.yellow(),
        };
        output.push_str(&format!("  {} : {}\n", path, colored_summary));
    }

    output.push_str(&format!(
        "\n{} files scanned, {} with issues, {} failed\n",
        report.len(),
        report.count_by_outcome(ScanOutcome::Issues),
        report.count_by_outcome(ScanOutcome::Failed),
    ));

    output
}
