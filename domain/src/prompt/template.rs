//! Prompt templates as served by the prompt store

use super::compiled::CompiledPrompt;
use super::params::PromptParams;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Whether a template is plain text or a role-tagged message list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Text,
    Chat,
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptKind::Text => write!(f, "text"),
            PromptKind::Chat => write!(f, "chat"),
        }
    }
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    #[serde(other)]
    Other,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Other => "other",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }
}

/// Raw template content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptBody {
    Text(String),
    Chat(Vec<ChatMessage>),
}

/// Name and version of the template a call was built from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptIdentity {
    pub name: String,
    pub version: u32,
}

impl std::fmt::Display for PromptIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@v{}", self.name, self.version)
    }
}

/// A named, versioned prompt template (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: String,
    pub version: u32,
    pub body: PromptBody,
}

impl PromptTemplate {
    pub fn text(name: impl Into<String>, version: u32, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            body: PromptBody::Text(content.into()),
        }
    }

    pub fn chat(name: impl Into<String>, version: u32, messages: Vec<ChatMessage>) -> Self {
        Self {
            name: name.into(),
            version,
            body: PromptBody::Chat(messages),
        }
    }

    pub fn kind(&self) -> PromptKind {
        match self.body {
            PromptBody::Text(_) => PromptKind::Text,
            PromptBody::Chat(_) => PromptKind::Chat,
        }
    }

    pub fn identity(&self) -> PromptIdentity {
        PromptIdentity {
            name: self.name.clone(),
            version: self.version,
        }
    }

    /// Binds the template to `params`.
    ///
    /// Chat templates keep message order and roles; every message content is
    /// rendered independently.
    pub fn compile(&self, params: &PromptParams) -> CompiledPrompt {
        let source = self.identity();
        match &self.body {
            PromptBody::Text(content) => CompiledPrompt::Text {
                source,
                text: render(content, params),
            },
            PromptBody::Chat(messages) => CompiledPrompt::Chat {
                source,
                messages: messages
                    .iter()
                    .map(|m| ChatMessage::new(m.role, render(&m.content, params)))
                    .collect(),
            },
        }
    }
}

/// `{{name}}` placeholders, whitespace inside the braces allowed
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("static pattern"));

/// Replaces `{{name}}` placeholders with values from `params`.
///
/// Placeholders without a value are left as written, and substituted values
/// are not rescanned.
pub fn render(template: &str, params: &PromptParams) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
