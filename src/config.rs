//! Configuration module
//!
//! Settings are read from `.codesentry.toml` (or a file passed with
//! `--config`); every section falls back to sensible defaults so a missing
//! or partial file is never an error.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scanner::filesystem::DEFAULT_EXTENSIONS;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = ".codesentry.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// External classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Rewrite model settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Branch settings for the fix pipeline
    #[serde(default)]
    pub git: GitConfig,

    /// Email report settings
    #[serde(default)]
    pub email: EmailConfig,
}

impl Config {
    /// Load from an explicit path, or from `.codesentry.toml` if present,
    /// or fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions handled by the pipeline
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// External classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Whether the advisory classifier leg runs at all
    #[serde(default)]
    pub enabled: bool,

    /// Classification endpoint URL
    #[serde(default = "default_classifier_endpoint")]
    pub endpoint: String,

    /// Per-file classification deadline in seconds
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_classifier_endpoint(),
            timeout_secs: default_classifier_timeout(),
        }
    }
}

fn default_classifier_endpoint() -> String {
    "http://localhost:8080/classify".to_string()
}

fn default_classifier_timeout() -> u64 {
    10
}

/// Rewrite model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Per-file rewrite deadline in seconds
    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
            timeout_secs: default_ollama_timeout(),
        }
    }
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "gemma3:1b".to_string()
}

fn default_ollama_timeout() -> u64 {
    120
}

/// Branch settings for the fix pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Branch the rewritten files are committed to
    #[serde(default = "default_work_branch")]
    pub work_branch: String,

    /// Branch the pull request targets
    #[serde(default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            work_branch: default_work_branch(),
            base_branch: default_base_branch(),
        }
    }
}

fn default_work_branch() -> String {
    "codesentry-fixes".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

/// Email report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether to send the report email after a fix run
    #[serde(default)]
    pub enabled: bool,

    /// SMTP server host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Sender address; `EMAIL_SENDER` in the environment takes precedence
    #[serde(default)]
    pub sender: Option<String>,

    /// Recipient address
    #[serde(default)]
    pub recipient: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            sender: None,
            recipient: String::new(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.extensions, vec!["py", "js", "ts", "java", "c", "cpp"]);
        assert!(!config.classifier.enabled);
        assert_eq!(config.ollama.model, "gemma3:1b");
        assert_eq!(config.git.work_branch, "codesentry-fixes");
        assert_eq!(config.git.base_branch, "main");
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[git]
work_branch = "agent-fixes"

[email]
enabled = true
recipient = "dev@example.com"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.git.work_branch, "agent-fixes");
        assert_eq!(config.git.base_branch, "main");
        assert!(config.email.enabled);
        assert_eq!(config.email.recipient, "dev@example.com");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_missing_file_is_an_error_when_explicit() {
        let result = Config::from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();
        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let config = Config::load_or_default(None).unwrap();
        assert!(!config.classifier.enabled);
    }
}
