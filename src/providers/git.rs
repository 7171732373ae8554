//! Git workspace operations
//!
//! Shells out to the `git` binary: checkout or create the work branch,
//! write rewritten files, commit, push, and derive a GitHub compare URL to
//! serve as the pull-request link.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::GitError;

/// A local clone the fix pipeline writes into
pub struct GitWorkspace {
    root: PathBuf,
}

impl GitWorkspace {
    /// Open a workspace, verifying `git` is available on PATH.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, GitError> {
        which::which("git").map_err(|_| GitError::MissingBinary)?;
        Ok(Self { root: root.into() })
    }

    /// Clone `url` into `root` and check out `branch`. When `root` already
    /// holds a checkout, the clone is skipped and the branch is checked out
    /// in place.
    pub fn clone_or_open(
        url: &str,
        root: impl Into<PathBuf>,
        branch: &str,
    ) -> Result<Self, GitError> {
        which::which("git").map_err(|_| GitError::MissingBinary)?;
        let root = root.into();

        if root.join(".git").exists() {
            info!(path = %root.display(), "existing checkout found, skipping clone");
            let workspace = Self { root };
            workspace.checkout(branch)?;
            return Ok(workspace);
        }

        let dest = root.display().to_string();
        run_git(&["clone", "--branch", branch, url, &dest])?;
        info!(url = %url, branch = %branch, path = %dest, "repository cloned");
        Ok(Self { root })
    }

    /// Check out an existing branch.
    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    /// Apply rewritten files on the work branch, push, and return the
    /// pull-request link. Returns `None` when every rewrite matched the
    /// checked-out content and there was nothing to commit.
    pub fn propose_changes(
        &self,
        files: &BTreeMap<String, String>,
        work_branch: &str,
        base_branch: &str,
        message: &str,
    ) -> Result<Option<String>, GitError> {
        self.checkout_work_branch(work_branch)?;

        for (path, content) in files {
            let full_path = self.root.join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
            self.run(&["add", path])?;
        }

        if !self.has_staged_changes()? {
            info!("rewrites match the checked-out content, nothing to commit");
            return Ok(None);
        }

        self.run(&["commit", "-m", message])?;
        self.run(&[
            "push",
            "--set-upstream",
            "origin",
            &format!("{work_branch}:{work_branch}"),
        ])?;

        let link = self.compare_url(base_branch, work_branch)?;
        info!(pr_link = %link, "changes pushed");
        Ok(Some(link))
    }

    /// Whether the index differs from HEAD.
    fn has_staged_changes(&self) -> Result<bool, GitError> {
        let status = self.run(&["status", "--porcelain"])?;
        Ok(status.lines().any(|line| !line.starts_with("??")))
    }

    /// Check out the work branch, creating it if it does not exist yet.
    fn checkout_work_branch(&self, branch: &str) -> Result<(), GitError> {
        if self.run(&["checkout", branch]).is_ok() {
            return Ok(());
        }
        self.run(&["checkout", "-b", branch]).map(|_| ())
    }

    /// GitHub compare URL for `base...branch`, derived from the remote.
    fn compare_url(&self, base: &str, branch: &str) -> Result<String, GitError> {
        let remote = self
            .run(&["remote", "get-url", "origin"])
            .map_err(|_| GitError::NoRemote)?;
        let repo_url = normalize_remote_url(&remote).ok_or(GitError::NoRemote)?;
        Ok(format!("{repo_url}/compare/{base}...{branch}?expand=1"))
    }

    /// Run a git subcommand in the workspace and return trimmed stdout.
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        debug!(args = ?args, "git");
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(GitError::Command {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Path of this workspace
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Run a git subcommand outside any workspace (used for cloning).
fn run_git(args: &[&str]) -> Result<String, GitError> {
    debug!(args = ?args, "git");
    let output = Command::new("git").args(args).output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(GitError::Command {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Turn an `origin` remote URL into a browsable https repository URL.
fn normalize_remote_url(remote: &str) -> Option<String> {
    let remote = remote.trim();
    if remote.is_empty() {
        return None;
    }

    let url = if let Some(ssh_path) = remote.strip_prefix("git@") {
        // git@github.com:owner/repo.git -> https://github.com/owner/repo
        let (host, path) = ssh_path.split_once(':')?;
        format!("https://{host}/{path}")
    } else {
        remote.to_string()
    };

    Some(url.trim_end_matches(".git").trim_end_matches('/').to_string())
}
