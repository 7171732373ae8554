//! The automated fix pipeline
//!
//! Chains the stages of a full run: discovery, repository scan, LLM rewrite
//! of flagged files, commit/push with a pull-request link, and the emailed
//! findings report. Collaborator failures degrade (a file keeps its
//! original content, the push is reported as failed, the email is skipped)
//! without touching the scan report.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{CodeSentryError, GitError};
use crate::notify::Notifier;
use crate::providers::git::GitWorkspace;
use crate::report::format::{format_file_report, format_repository_report};
use crate::report::RepositoryReport;
use crate::rewrite::Rewriter;
use crate::scanner::filesystem;
use crate::scanner::repository::RepositoryAggregator;

/// Commit message used for the fix branch
pub const COMMIT_MESSAGE: &str = "Auto-fix security vulnerabilities";

/// Link placeholder carried into the report when the git stage fails
pub const GIT_FAILURE_NOTICE: &str = "GitHub operation failed";

/// Result of a full pipeline run
pub struct PipelineOutcome {
    /// The scan report the run was based on
    pub report: RepositoryReport,
    /// Pull-request link when changes were pushed, or [`GIT_FAILURE_NOTICE`]
    /// when the git stage failed
    pub pr_link: Option<String>,
    /// Number of files successfully rewritten
    pub rewritten: usize,
}

/// Orchestrates a scan-rewrite-PR-notify run
pub struct SecurityPipeline {
    aggregator: RepositoryAggregator,
    rewriter: Arc<dyn Rewriter>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl SecurityPipeline {
    pub fn new(
        aggregator: RepositoryAggregator,
        rewriter: Arc<dyn Rewriter>,
        notifier: Option<Arc<dyn Notifier>>,
    ) -> Self {
        Self {
            aggregator,
            rewriter,
            notifier,
        }
    }

    /// Run the whole workflow against a repository root.
    pub async fn run(&self, root: &Path, config: &Config) -> Result<PipelineOutcome, CodeSentryError> {
        let files = filesystem::load_repository_files(root, &config.scan.extensions)?;
        info!(files = files.len(), "repository loaded");

        let report = self.aggregator.scan_repository(&files).await;

        let rewritten = self.rewrite_flagged(&files, &report).await;
        info!(rewritten = rewritten.len(), "rewrite stage complete");

        // the scan report outlives a broken git stage
        let pr_link = if rewritten.is_empty() {
            None
        } else {
            match self.push_changes(root, &rewritten, config) {
                Ok(link) => link,
                Err(e) => {
                    error!(error = %e, "GitHub operation failed");
                    Some(GIT_FAILURE_NOTICE.to_string())
                }
            }
        };

        if let Some(notifier) = &self.notifier {
            let findings = format_repository_report(&report);
            let link = pr_link.as_deref().unwrap_or("no changes pushed");
            // delivery is best-effort
            if let Err(e) = notifier.send_report(&findings, link).await {
                error!(error = %e, "Failed to send email");
            }
        }

        Ok(PipelineOutcome {
            report,
            pr_link,
            rewritten: rewritten.len(),
        })
    }

    /// Commit and push the rewritten files, returning the PR link.
    fn push_changes(
        &self,
        root: &Path,
        files: &BTreeMap<String, String>,
        config: &Config,
    ) -> Result<Option<String>, GitError> {
        let workspace = GitWorkspace::open(root)?;
        workspace.propose_changes(
            files,
            &config.git.work_branch,
            &config.git.base_branch,
            COMMIT_MESSAGE,
        )
    }

    /// Rewrite every flagged file, keeping originals on any failure.
    async fn rewrite_flagged(
        &self,
        files: &BTreeMap<String, String>,
        report: &RepositoryReport,
    ) -> BTreeMap<String, String> {
        let mut rewritten = BTreeMap::new();

        for (path, file_report) in report.flagged_files() {
            let Some(content) = files.get(path) else {
                continue;
            };
            let summary = format_file_report(file_report);

            match self.rewriter.rewrite(content, &summary).await {
                Ok(output) if !output.updated_code.trim().is_empty() => {
                    info!(file = %path, issues = %output.security_issues, "file rewritten");
                    rewritten.insert(path.clone(), output.updated_code);
                }
                Ok(_) => {
                    warn!(file = %path, "rewrite returned empty code, keeping original");
                }
                Err(e) => {
                    warn!(file = %path, error = %e, "rewrite failed, keeping original");
                }
            }
        }

        rewritten
    }
}
