//! LLM rewrite stage
//!
//! Asks a locally hosted model to rewrite a flagged file, given the file
//! text and its formatted finding summary as prompt context. The reply is
//! required to be a strict JSON object; anything else is reported as a
//! distinct parse failure and the original file content is left untouched
//! by the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::RewriteError;

/// Parsed rewrite reply
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RewriteOutput {
    /// The rewritten file content
    pub updated_code: String,

    /// The issues the model claims to have addressed
    #[serde(default)]
    pub security_issues: String,
}

/// A code rewriter taking file text plus a finding summary.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, content: &str, summary: &str) -> Result<RewriteOutput, RewriteError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Rewriter backed by an Ollama server (`POST /api/generate`).
pub struct OllamaRewriter {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaRewriter {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RewriteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    fn build_prompt(content: &str, summary: &str) -> String {
        format!(
            "The following code was scanned and flagged: {summary}\n\
             Refactor the code to resolve the identified security issues while \
             keeping the original functionality intact. If helpful, improve \
             readability with docstrings and comments.\n\n\
             Respond strictly in the following JSON format:\n\
             ```json\n\
             {{\"updated_code\": \"<refactored code>\", \"security_issues\": \"<issues found before refactor>\"}}\n\
             ```\n\n\
             ### Code:\n{content}\n"
        )
    }
}

#[async_trait]
impl Rewriter for OllamaRewriter {
    async fn rewrite(&self, content: &str, summary: &str) -> Result<RewriteOutput, RewriteError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.model,
            prompt: Self::build_prompt(content, summary),
            stream: false,
        };

        let response: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(bytes = response.response.len(), "rewrite reply received");
        parse_rewrite_response(&response.response)
    }
}

/// Parse a model reply into a [`RewriteOutput`].
///
/// Models routinely wrap the JSON in Markdown code fences; those are
/// stripped before parsing. A reply that still is not the requested shape
/// is a [`RewriteError::MalformedResponse`].
pub fn parse_rewrite_response(raw: &str) -> Result<RewriteOutput, RewriteError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(RewriteError::EmptyResponse);
    }
    serde_json::from_str(cleaned).map_err(|source| RewriteError::MalformedResponse { source })
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json() {
        let out = parse_rewrite_response(
            r#"{"updated_code": "x = 2", "security_issues": "Password"}"#,
        )
        .unwrap();
        assert_eq!(out.updated_code, "x = 2");
        assert_eq!(out.security_issues, "Password");
    }

    #[test]
    fn test_strips_json_code_fences() {
        let raw = "```json\n{\"updated_code\": \"y = 3\", \"security_issues\": \"none\"}\n```";
        let out = parse_rewrite_response(raw).unwrap();
        assert_eq!(out.updated_code, "y = 3");
    }

    #[test]
    fn test_strips_anonymous_code_fences() {
        let raw = "```\n{\"updated_code\": \"z = 4\"}\n```";
        let out = parse_rewrite_response(raw).unwrap();
        assert_eq!(out.updated_code, "z = 4");
        assert_eq!(out.security_issues, "");
    }

    #[test]
    fn test_malformed_json_is_a_distinct_error() {
        let err = parse_rewrite_response("not json at all").unwrap_err();
        assert!(matches!(err, RewriteError::MalformedResponse { .. }));
    }

    #[test]
    fn test_empty_reply_is_a_distinct_error() {
        let err = parse_rewrite_response("``````").unwrap_err();
        assert!(matches!(err, RewriteError::EmptyResponse));
    }

    #[test]
    fn test_missing_updated_code_is_malformed() {
        let err = parse_rewrite_response(r#"{"security_issues": "Password"}"#).unwrap_err();
        assert!(matches!(err, RewriteError::MalformedResponse { .. }));
    }

    #[test]
    fn test_prompt_carries_summary_and_code() {
        let prompt = OllamaRewriter::build_prompt(
            "password = \"abcdef\"",
            "Security issues detected: Password",
        );
        assert!(prompt.contains("Security issues detected: Password"));
        assert!(prompt.contains("password = \"abcdef\""));
        assert!(prompt.contains("updated_code"));
    }
}
