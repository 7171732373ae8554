//! The finding taxonomy.
//!
//! Every kind a scan can report is declared here; kinds are never created
//! dynamically. The order of [`FindingKind::ALL`] is the catalog declaration
//! order and determines how kinds are listed in composed summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a security finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// AWS access key id assignment
    AwsAccessKey,
    /// AWS secret access key assignment
    AwsSecretKey,
    /// Google Cloud service key assignment
    GoogleCloudKey,
    /// S3 bucket name reference
    S3Bucket,
    /// Generic API key assignment
    ApiKey,
    /// Generic password assignment
    Password,
    /// PEM-encoded SSH private key block
    SshPrivateKey,
    /// Broken cipher or hash reference (DES, MD5, RC4, SHA1)
    WeakEncryption,
    /// Under-strength cipher reference (AES-128, RSA-1024, 3DES)
    LowerEncryption,
}

impl FindingKind {
    /// All kinds, in catalog declaration order.
    pub const ALL: [FindingKind; 9] = [
        FindingKind::AwsAccessKey,
        FindingKind::AwsSecretKey,
        FindingKind::GoogleCloudKey,
        FindingKind::S3Bucket,
        FindingKind::ApiKey,
        FindingKind::Password,
        FindingKind::SshPrivateKey,
        FindingKind::WeakEncryption,
        FindingKind::LowerEncryption,
    ];

    /// Stable human-readable label used in composed summaries.
    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::AwsAccessKey => "AWS Access Key",
            FindingKind::AwsSecretKey => "AWS Secret Key",
            FindingKind::GoogleCloudKey => "Google Cloud Key",
            FindingKind::S3Bucket => "S3 Bucket",
            FindingKind::ApiKey => "API Key",
            FindingKind::Password => "Password",
            FindingKind::SshPrivateKey => "SSH Private Key",
            FindingKind::WeakEncryption => "Weak Encryption",
            FindingKind::LowerEncryption => "Lower Encryption Used",
        }
    }

    /// Position of this kind in catalog declaration order.
    pub fn catalog_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(FindingKind::AwsAccessKey.label(), "AWS Access Key");
        assert_eq!(FindingKind::Password.label(), "Password");
        assert_eq!(FindingKind::WeakEncryption.label(), "Weak Encryption");
        assert_eq!(FindingKind::LowerEncryption.label(), "Lower Encryption Used");
    }

    #[test]
    fn test_catalog_order_is_declaration_order() {
        assert_eq!(FindingKind::AwsAccessKey.catalog_index(), 0);
        assert_eq!(FindingKind::Password.catalog_index(), 5);
        assert_eq!(FindingKind::LowerEncryption.catalog_index(), 8);
    }

    #[test]
    fn test_display_matches_label() {
        for kind in FindingKind::ALL {
            assert_eq!(kind.to_string(), kind.label());
        }
    }
}
