//! Fix command - the full scan, rewrite, PR, and email workflow

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::FixArgs;
use crate::config::Config;
use crate::error::CodeSentryError;
use crate::notify::{EmailReporter, Notifier};
use crate::pipeline::{SecurityPipeline, GIT_FAILURE_NOTICE};
use crate::providers::git::GitWorkspace;
use crate::report::ScanOutcome;
use crate::rewrite::OllamaRewriter;
use crate::scanner::repository::RepositoryAggregator;

pub async fn execute(args: FixArgs, root: &Path, mut config: Config) -> Result<i32, CodeSentryError> {
    if let Some(branch) = args.branch {
        config.git.work_branch = branch;
    }
    if let Some(base) = args.base {
        config.git.base_branch = base;
    }

    if let Some(url) = &args.repo_url {
        GitWorkspace::clone_or_open(url, root, &args.repo_branch)?;
    }

    let scanner = super::scan::build_scanner(&config)?;
    let rewriter = OllamaRewriter::new(
        config.ollama.base_url.clone(),
        config.ollama.model.clone(),
        Duration::from_secs(config.ollama.timeout_secs),
    )?;

    let notifier: Option<Arc<dyn Notifier>> = if config.email.enabled && !args.no_email {
        Some(Arc::new(EmailReporter::new(config.email.clone())?))
    } else {
        None
    };

    let pipeline = SecurityPipeline::new(
        RepositoryAggregator::new(scanner),
        Arc::new(rewriter),
        notifier,
    );

    let outcome = pipeline.run(root, &config).await?;

    println!(
        "\n{} files scanned, {} with issues, {} failed, {} rewritten",
        outcome.report.len(),
        outcome.report.count_by_outcome(ScanOutcome::Issues),
        outcome.report.count_by_outcome(ScanOutcome::Failed),
        outcome.rewritten,
    );

    match outcome.pr_link.as_deref() {
        Some(GIT_FAILURE_NOTICE) => {
            println!("{} {}", "Warning:".yellow().bold(), GIT_FAILURE_NOTICE)
        }
        Some(link) => println!("{} {}", "Pull request:".green().bold(), link.cyan()),
        None => println!("{}", "No changes pushed.".dimmed()),
    }

    Ok(super::scan::exit_code_for(&outcome.report))
}
