//! Generation service settings from TOML (`[gemini]` section)

use super::lookup_env;
use advisor_domain::{ConfigIssue, ConfigIssueCode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Gemini API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub base_url: String,
    /// Environment variable holding the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Per-request timeout; a hung call otherwise blocks its run.
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl FileGeminiConfig {
    /// Inline key first, then the configured environment variable
    pub fn api_key(&self) -> Option<SecretString> {
        self.api_key_with(lookup_env)
    }

    pub(crate) fn api_key_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<SecretString> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env(&self.api_key_env))
            .map(SecretString::new)
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        if self.timeout_secs == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: "gemini.timeout_secs".to_string(),
                },
                "gemini.timeout_secs cannot be 0",
            )]
        } else {
            Vec::new()
        }
    }
}
