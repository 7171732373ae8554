//! Codesentry Library
//!
//! Core functionality for scanning repositories for sensitive-data and
//! weak-cryptography findings, and for the automated fix workflow built on
//! top of the scan results.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod rewrite;
pub mod rules;
pub mod scanner;

pub use error::CodeSentryError;

/// Exit codes for the CLI
pub mod exit_codes {
    /// Success - every file scanned secure
    pub const SUCCESS: i32 = 0;
    /// At least one file has security findings
    pub const ISSUES_FOUND: i32 = 1;
    /// No findings, but some files could not be scanned reliably
    pub const SCAN_FAILURES: i32 = 2;
    /// Configuration or runtime error
    pub const ERROR: i32 = 3;
}
