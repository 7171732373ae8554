//! Finding summary formatting
//!
//! Pure functions rendering reports into the stable strings used in the
//! terminal output, the email report, and the rewrite prompt context.

use crate::report::{FileReport, RepositoryReport, ScanOutcome};

/// Label for a file with no findings
pub const SECURE_LABEL: &str = "secure";

/// Label for the scan-failure sentinel
pub const SCAN_FAILED_LABEL: &str = "scan failed";

/// Prefix for the composed issue list
const ISSUES_PREFIX: &str = "Security issues detected";

/// Render one file's report.
///
/// `"secure"` for a clean file, `"scan failed"` for the sentinel, otherwise
/// a comma-joined kind list in catalog order, e.g.
/// `"Security issues detected: AWS Access Key, Weak Encryption"`.
pub fn format_file_report(report: &FileReport) -> String {
    match report.outcome {
        ScanOutcome::Secure => match &report.advisory {
            Some(label) => format!("{SECURE_LABEL} (classifier: {label})"),
            None => SECURE_LABEL.to_string(),
        },
        ScanOutcome::Failed => SCAN_FAILED_LABEL.to_string(),
        ScanOutcome::Issues => {
            let kinds: Vec<&str> = report.kinds().map(|k| k.label()).collect();
            format!("{ISSUES_PREFIX}: {}", kinds.join(", "))
        }
    }
}

/// Render the whole repository report, one `path : summary` line per file,
/// in the report's (path-sorted) enumeration order.
pub fn format_repository_report(report: &RepositoryReport) -> String {
    report
        .files()
        .iter()
        .map(|(path, file_report)| format!("{path} : {}", format_file_report(file_report)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Finding;
    use crate::rules::FindingKind;

    #[test]
    fn test_secure_file_formats_as_secure() {
        assert_eq!(format_file_report(&FileReport::secure()), "secure");
    }

    #[test]
    fn test_failed_file_formats_as_scan_failed() {
        assert_eq!(format_file_report(&FileReport::failed()), "scan failed");
    }

    #[test]
    fn test_single_issue_format() {
        let report = FileReport::from_findings(vec![Finding::new(FindingKind::Password)]);
        assert_eq!(
            format_file_report(&report),
            "Security issues detected: Password"
        );
    }

    #[test]
    fn test_multiple_issues_joined_in_catalog_order() {
        let report = FileReport::from_findings(vec![
            Finding::new(FindingKind::AwsAccessKey),
            Finding::new(FindingKind::WeakEncryption),
        ]);
        assert_eq!(
            format_file_report(&report),
            "Security issues detected: AWS Access Key, Weak Encryption"
        );
    }

    #[test]
    fn test_advisory_label_is_supplementary() {
        let report = FileReport::secure().with_advisory("LABEL_0");
        assert_eq!(format_file_report(&report), "secure (classifier: LABEL_0)");
    }

    #[test]
    fn test_repository_format_lists_each_file_once() {
        let mut report = RepositoryReport::new();
        report.insert("src/b.py", FileReport::secure());
        report.insert(
            "src/a.py",
            FileReport::from_findings(vec![
                Finding::new(FindingKind::AwsAccessKey),
                Finding::new(FindingKind::WeakEncryption),
            ]),
        );

        let text = format_repository_report(&report);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "src/a.py : Security issues detected: AWS Access Key, Weak Encryption",
                "src/b.py : secure",
            ]
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let report = FileReport::from_findings(vec![Finding::new(FindingKind::S3Bucket)]);
        assert_eq!(format_file_report(&report), format_file_report(&report));
    }
}
