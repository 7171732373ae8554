//! Error types for codesentry
//!
//! This module defines custom error types using `thiserror`, one enum per
//! failure domain, with a single top-level error for the CLI boundary.

use thiserror::Error;

use crate::rules::FindingKind;

/// Main error type for codesentry
#[derive(Error, Debug)]
pub enum CodeSentryError {
    /// Scan-related errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// File discovery errors
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// External classifier errors
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// LLM rewrite stage errors
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    /// Git / pull-request stage errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report serialization errors
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Report output errors
    #[error("Failed to write report to '{path}': {source}")]
    ReportWrite {
        /// Path the report was being written to
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Errors raised while matching a single file against the catalog.
///
/// These are contained at the scanner boundary: a failing rule contributes
/// no finding, and the rest of the catalog still runs.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A rule's matcher panicked on the given input
    #[error("matcher for '{kind}' failed unexpectedly")]
    MatcherPanic {
        /// The kind whose matcher failed
        kind: FindingKind,
    },
}

/// Errors that occur during repository file discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The repository root does not exist or is not a directory
    #[error("repository root '{path}' is not a directory")]
    RootNotFound {
        /// The path that was supplied
        path: String,
    },

    /// Failed to read a file during discovery
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

/// Errors from the external text-classification service
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The classification request failed at the HTTP layer
    #[error("classifier request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The classifier did not answer within the configured deadline
    #[error("classifier timed out after {seconds}s")]
    Timeout {
        /// The deadline that elapsed
        seconds: u64,
    },

    /// The service answered with a body we could not interpret
    #[error("unexpected classifier response: {reason}")]
    UnexpectedResponse {
        /// What was wrong with the response
        reason: String,
    },
}

/// Errors from the LLM rewrite stage
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The generate request failed at the HTTP layer
    #[error("rewrite request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model reply was not the JSON shape we asked for
    #[error("malformed rewrite response: {source}")]
    MalformedResponse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The model returned an empty reply
    #[error("rewrite response was empty")]
    EmptyResponse,
}

/// Errors from the git / pull-request stage
#[derive(Error, Debug)]
pub enum GitError {
    /// The `git` binary is not installed or not on PATH
    #[error("'git' binary not found on PATH")]
    MissingBinary,

    /// A git command exited with a non-zero status
    #[error("'git {command}' failed: {stderr}")]
    Command {
        /// The subcommand and arguments that were run
        command: String,
        /// Captured standard error
        stderr: String,
    },

    /// Failed to spawn git or write a working-tree file
    #[error("git I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The repository has no usable remote to build a PR link from
    #[error("no 'origin' remote configured")]
    NoRemote,
}

/// Errors from the email notification stage
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Sender or recipient address did not parse
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Failed to assemble the message
    #[error("failed to build email: {0}")]
    Email(#[from] lettre::error::Error),

    /// SMTP delivery failed
    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Sender credentials are not configured
    #[error("email credentials missing (set EMAIL_SENDER and EMAIL_PASSWORD)")]
    MissingCredentials,
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
