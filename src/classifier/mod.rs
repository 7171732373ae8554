//! External text-classification client
//!
//! Best-effort advisory leg of the scan: a classifier may add a label to a
//! file with no pattern findings, but it is never required for the
//! correctness of pattern-based findings.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::ClassifierError;

/// A text classifier returning a single advisory label for a block of code.
///
/// `Ok(None)` means the classifier ran cleanly but had no verdict to offer.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, content: &str) -> Result<Option<String>, ClassifierError>;
}

/// One label/score pair from the classification endpoint
#[derive(Debug, Deserialize)]
struct ClassifierVerdict {
    label: String,
    #[serde(default)]
    score: f64,
}

/// HTTP classifier speaking the inference-endpoint convention:
/// POST `{"inputs": <text>}`, response `[{"label": ..., "score": ...}]`.
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    /// Build a client with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, content: &str) -> Result<Option<String>, ClassifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": content }))
            .send()
            .await?
            .error_for_status()?;

        let verdicts: Vec<ClassifierVerdict> = response.json().await.map_err(|e| {
            ClassifierError::UnexpectedResponse {
                reason: e.to_string(),
            }
        })?;

        // An empty verdict list means the classifier had nothing to say.
        let label = verdicts.first().map(|verdict| {
            debug!(label = %verdict.label, score = verdict.score, "classifier verdict");
            verdict.label.clone()
        });

        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_deserialization() {
        let verdicts: Vec<ClassifierVerdict> =
            serde_json::from_str(r#"[{"label": "LABEL_1", "score": 0.93}]"#).unwrap();
        assert_eq!(verdicts[0].label, "LABEL_1");
        assert!((verdicts[0].score - 0.93).abs() < f64::EPSILON);
    }

    #[test]
    fn test_verdict_score_defaults() {
        let verdicts: Vec<ClassifierVerdict> =
            serde_json::from_str(r#"[{"label": "LABEL_0"}]"#).unwrap();
        assert_eq!(verdicts[0].score, 0.0);
    }
}
