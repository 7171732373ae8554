//! # Scan Report Structures
//!
//! Data structures for representing scan results.
//!
//! - [`ScanOutcome`] - per-file classification (secure, issues, failed)
//! - [`Finding`] - one triggered kind with an optional evidence excerpt
//! - [`FileReport`] - ordered findings for one file
//! - [`RepositoryReport`] - path-to-report mapping for a whole scan run
//!
//! A kind triggers at most once per file; multiplicity of matches within a
//! kind is irrelevant. Findings are kept in catalog declaration order so
//! composed summaries are stable regardless of where matches occur in the
//! text.

pub mod format;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rules::FindingKind;

/// Per-file classification.
///
/// `Failed` is the scan-failure sentinel: the scan could not produce a
/// reliable result. It is distinct from both "secure" and "issues found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOutcome {
    /// No rule matched
    Secure,
    /// At least one rule matched
    Issues,
    /// Could not determine a result
    Failed,
}

/// A detected instance of a sensitive-data pattern in a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Which rule triggered
    pub kind: FindingKind,

    /// Truncated excerpt of the first match, when available
    pub evidence: Option<String>,
}

impl Finding {
    pub fn new(kind: FindingKind) -> Self {
        Self {
            kind,
            evidence: None,
        }
    }

    /// Attach an evidence excerpt
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// Scan result for a single file.
///
/// Findings are stored in catalog declaration order. The report is built
/// once by the scanner and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Classification of this file
    pub outcome: ScanOutcome,

    /// Triggered kinds, at most one entry per kind
    findings: Vec<Finding>,

    /// Advisory label from the external classifier, when one ran cleanly
    pub advisory: Option<String>,
}

impl FileReport {
    /// Report for a file with no findings
    pub fn secure() -> Self {
        Self {
            outcome: ScanOutcome::Secure,
            findings: Vec::new(),
            advisory: None,
        }
    }

    /// Scan-failure sentinel report
    pub fn failed() -> Self {
        Self {
            outcome: ScanOutcome::Failed,
            findings: Vec::new(),
            advisory: None,
        }
    }

    /// Report from a non-empty finding list (already in catalog order)
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let outcome = if findings.is_empty() {
            ScanOutcome::Secure
        } else {
            ScanOutcome::Issues
        };
        Self {
            outcome,
            findings,
            advisory: None,
        }
    }

    /// Attach a classifier advisory label
    pub fn with_advisory(mut self, label: impl Into<String>) -> Self {
        self.advisory = Some(label.into());
        self
    }

    /// All findings for this file
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Triggered kinds in catalog order
    pub fn kinds(&self) -> impl Iterator<Item = FindingKind> + '_ {
        self.findings.iter().map(|f| f.kind)
    }

    /// Whether a specific kind triggered
    pub fn has_kind(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|f| f.kind == kind)
    }

    pub fn is_secure(&self) -> bool {
        self.outcome == ScanOutcome::Secure
    }

    pub fn has_issues(&self) -> bool {
        self.outcome == ScanOutcome::Issues
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == ScanOutcome::Failed
    }
}

/// Findings for a whole repository scan run.
///
/// Covers exactly the input file set. The mapping is ordered by path so
/// enumeration (and the formatted repository summary) is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryReport {
    /// When the scan ran
    pub scanned_at: DateTime<Utc>,

    files: BTreeMap<String, FileReport>,
}

impl RepositoryReport {
    /// Create an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            scanned_at: Utc::now(),
            files: BTreeMap::new(),
        }
    }

    /// Record the report for one file
    pub fn insert(&mut self, path: impl Into<String>, report: FileReport) {
        self.files.insert(path.into(), report);
    }

    /// All per-file reports, ordered by path
    pub fn files(&self) -> &BTreeMap<String, FileReport> {
        &self.files
    }

    /// Report for a single path
    pub fn get(&self, path: &str) -> Option<&FileReport> {
        self.files.get(path)
    }

    /// Number of scanned files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Count files with a given outcome
    pub fn count_by_outcome(&self, outcome: ScanOutcome) -> usize {
        self.files.values().filter(|r| r.outcome == outcome).count()
    }

    /// Whether any file has issues
    pub fn has_issues(&self) -> bool {
        self.files.values().any(|r| r.has_issues())
    }

    /// Whether any file hit the scan-failure sentinel
    pub fn has_failures(&self) -> bool {
        self.files.values().any(|r| r.is_failed())
    }

    /// Files with issues, ordered by path
    pub fn flagged_files(&self) -> impl Iterator<Item = (&String, &FileReport)> {
        self.files.iter().filter(|(_, r)| r.has_issues())
    }
}

impl Default for RepositoryReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_report_is_empty() {
        let report = FileReport::secure();
        assert!(report.is_secure());
        assert!(report.findings().is_empty());
        assert!(report.advisory.is_none());
    }

    #[test]
    fn test_from_findings_sets_outcome() {
        let report = FileReport::from_findings(vec![Finding::new(FindingKind::Password)]);
        assert!(report.has_issues());
        assert!(report.has_kind(FindingKind::Password));
        assert!(!report.has_kind(FindingKind::ApiKey));

        let empty = FileReport::from_findings(Vec::new());
        assert!(empty.is_secure());
    }

    #[test]
    fn test_failed_sentinel_distinct_from_secure() {
        let failed = FileReport::failed();
        assert!(failed.is_failed());
        assert!(!failed.is_secure());
        assert!(!failed.has_issues());
    }

    #[test]
    fn test_finding_evidence() {
        let finding = Finding::new(FindingKind::ApiKey).with_evidence("api_key = 'abc…'");
        assert_eq!(finding.evidence.as_deref(), Some("api_key = 'abc…'"));
    }

    #[test]
    fn test_repository_report_counts() {
        let mut report = RepositoryReport::new();
        report.insert("a.py", FileReport::secure());
        report.insert(
            "b.py",
            FileReport::from_findings(vec![Finding::new(FindingKind::WeakEncryption)]),
        );
        report.insert("c.py", FileReport::failed());

        assert_eq!(report.len(), 3);
        assert_eq!(report.count_by_outcome(ScanOutcome::Secure), 1);
        assert_eq!(report.count_by_outcome(ScanOutcome::Issues), 1);
        assert_eq!(report.count_by_outcome(ScanOutcome::Failed), 1);
        assert!(report.has_issues());
        assert!(report.has_failures());

        let flagged: Vec<_> = report.flagged_files().map(|(p, _)| p.as_str()).collect();
        assert_eq!(flagged, vec!["b.py"]);
    }

    #[test]
    fn test_repository_report_enumeration_is_sorted() {
        let mut report = RepositoryReport::new();
        report.insert("z.py", FileReport::secure());
        report.insert("a.py", FileReport::secure());
        report.insert("m.py", FileReport::secure());

        let paths: Vec<_> = report.files().keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["a.py", "m.py", "z.py"]);
    }
}
