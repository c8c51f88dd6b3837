//! Prompt store backed by Langfuse prompt management

use super::client::{LangfuseClient, LangfuseError};
use super::types::{ChatEntry, PromptResponse};
use advisor_application::ports::prompt_store::{PromptStore, PromptStoreError};
use advisor_domain::{ChatMessage, ChatRole, PromptKind, PromptTemplate};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Fetches the template currently carrying `label`, one request per call
pub struct LangfusePromptStore {
    client: LangfuseClient,
    label: String,
}

impl LangfusePromptStore {
    pub fn new(client: LangfuseClient, label: impl Into<String>) -> Self {
        Self {
            client,
            label: label.into(),
        }
    }

    fn into_template(
        response: PromptResponse,
        expected: PromptKind,
    ) -> Result<PromptTemplate, PromptStoreError> {
        let actual = match response.kind.as_str() {
            "text" => PromptKind::Text,
            "chat" => PromptKind::Chat,
            other => {
                return Err(PromptStoreError::InvalidResponse(format!(
                    "prompt '{}' has unknown type '{}'",
                    response.name, other
                )));
            }
        };
        if actual != expected {
            return Err(PromptStoreError::TypeMismatch {
                name: response.name,
                expected,
                actual,
            });
        }

        match (actual, response.prompt) {
            (PromptKind::Text, Value::String(text)) => {
                Ok(PromptTemplate::text(response.name, response.version, text))
            }
            (PromptKind::Chat, messages @ Value::Array(_)) => {
                let entries: Vec<ChatEntry> = serde_json::from_value(messages)
                    .map_err(|e| PromptStoreError::InvalidResponse(e.to_string()))?;
                let messages = entries
                    .into_iter()
                    .filter_map(|entry| {
                        let role = serde_json::from_value::<ChatRole>(Value::String(entry.role?))
                            .unwrap_or(ChatRole::Other);
                        Some(ChatMessage::new(role, entry.content))
                    })
                    .collect();
                Ok(PromptTemplate::chat(response.name, response.version, messages))
            }
            (kind, _) => Err(PromptStoreError::InvalidResponse(format!(
                "prompt '{}' body does not match type {}",
                response.name, kind
            ))),
        }
    }
}

impl From<LangfuseError> for PromptStoreError {
    fn from(e: LangfuseError) -> Self {
        match e {
            LangfuseError::Http { status, body } => PromptStoreError::Api {
                status: status.as_u16(),
                message: body,
            },
            LangfuseError::Decode(msg) => PromptStoreError::InvalidResponse(msg),
            other => PromptStoreError::RequestFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl PromptStore for LangfusePromptStore {
    async fn get_prompt(
        &self,
        name: &str,
        kind: PromptKind,
    ) -> Result<PromptTemplate, PromptStoreError> {
        let url = self.client.url(&["v2", "prompts", name])?;
        let response: PromptResponse = self
            .client
            .get_json(url, &[("label", self.label.clone())])
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    PromptStoreError::NotFound(name.to_string())
                } else {
                    e.into()
                }
            })?;

        debug!(prompt = name, version = response.version, kind = %response.kind, "Fetched prompt");
        Self::into_template(response, kind)
    }
}
