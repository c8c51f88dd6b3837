//! Observability platform settings from TOML (`[langfuse]` section)
//!
//! Langfuse serves the prompt store, the dataset store and the trace
//! collector from one API.

use super::lookup_env;
use advisor_domain::{ConfigIssue, ConfigIssueCode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "https://cloud.langfuse.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLangfuseConfig {
    /// API host; falls back to `$LANGFUSE_HOST`, then the cloud host.
    pub base_url: Option<String>,
    pub public_key_env: String,
    pub secret_key_env: String,
    /// Direct keys (not recommended, use the env vars instead).
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    /// Label selecting which prompt version is served
    pub prompt_label: String,
    /// Background flush cadence for buffered trace events
    pub flush_interval_secs: u64,
    /// Events per ingestion request
    pub batch_size: usize,
}

impl Default for FileLangfuseConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            public_key_env: "LANGFUSE_PUBLIC_KEY".to_string(),
            secret_key_env: "LANGFUSE_SECRET_KEY".to_string(),
            public_key: None,
            secret_key: None,
            prompt_label: "production".to_string(),
            flush_interval_secs: 5,
            batch_size: 50,
        }
    }
}

/// Resolved basic-auth credentials
#[derive(Clone)]
pub struct LangfuseCredentials {
    pub public_key: String,
    pub secret_key: SecretString,
}

impl FileLangfuseConfig {
    pub fn base_url(&self) -> String {
        self.base_url_with(lookup_env)
    }

    pub fn credentials(&self) -> Option<LangfuseCredentials> {
        self.credentials_with(lookup_env)
    }

    pub(crate) fn base_url_with(&self, env: impl Fn(&str) -> Option<String>) -> String {
        self.base_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| env("LANGFUSE_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub(crate) fn credentials_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<LangfuseCredentials> {
        let pick = |inline: &Option<String>, var: &str| {
            inline
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| env(var))
        };
        Some(LangfuseCredentials {
            public_key: pick(&self.public_key, &self.public_key_env)?,
            secret_key: SecretString::new(pick(&self.secret_key, &self.secret_key_env)?),
        })
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.prompt_label.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyName {
                    field: "langfuse.prompt_label".to_string(),
                },
                "langfuse.prompt_label cannot be empty",
            ));
        }
        if self.flush_interval_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: "langfuse.flush_interval_secs".to_string(),
                },
                "langfuse.flush_interval_secs cannot be 0",
            ));
        }
        issues
    }
}
