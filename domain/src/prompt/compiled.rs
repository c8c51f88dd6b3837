//! Compiled prompts and the system/user pair a generation call needs

use super::error::PromptError;
use super::template::{ChatMessage, ChatRole, PromptIdentity, PromptKind};
use serde::Serialize;

/// A template bound to its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPrompt {
    Text {
        source: PromptIdentity,
        text: String,
    },
    Chat {
        source: PromptIdentity,
        messages: Vec<ChatMessage>,
    },
}

impl CompiledPrompt {
    /// Template this prompt was compiled from
    pub fn source(&self) -> &PromptIdentity {
        match self {
            CompiledPrompt::Text { source, .. } | CompiledPrompt::Chat { source, .. } => source,
        }
    }

    pub fn kind(&self) -> PromptKind {
        match self {
            CompiledPrompt::Text { .. } => PromptKind::Text,
            CompiledPrompt::Chat { .. } => PromptKind::Chat,
        }
    }

    /// Plain text of a text prompt.
    pub fn into_text(self) -> Result<String, PromptError> {
        match self {
            CompiledPrompt::Text { text, .. } => Ok(text),
            CompiledPrompt::Chat { source, .. } => Err(PromptError::WrongKind {
                name: source.name,
                expected: PromptKind::Text,
                actual: PromptKind::Chat,
            }),
        }
    }

    /// Locates the system and user messages of a chat prompt.
    ///
    /// The first message of each role is used. A chat prompt lacking either
    /// role, or a text prompt, is a configuration error.
    pub fn chat_pair(&self) -> Result<ChatPair, PromptError> {
        let CompiledPrompt::Chat { source, messages } = self else {
            return Err(PromptError::WrongKind {
                name: self.source().name.clone(),
                expected: PromptKind::Chat,
                actual: PromptKind::Text,
            });
        };

        let find = |role: ChatRole| {
            messages
                .iter()
                .find(|m| m.role == role)
                .map(|m| m.content.clone())
                .ok_or_else(|| PromptError::MissingRole {
                    name: source.name.clone(),
                    role,
                })
        };

        Ok(ChatPair {
            system: find(ChatRole::System)?,
            user: find(ChatRole::User)?,
        })
    }

    /// System or user roles that appear more than once; `chat_pair`
    /// ignores every message after the first of such a role
    pub fn duplicate_roles(&self) -> Vec<ChatRole> {
        let CompiledPrompt::Chat { messages, .. } = self else {
            return Vec::new();
        };
        [ChatRole::System, ChatRole::User]
            .into_iter()
            .filter(|role| messages.iter().filter(|m| m.role == *role).count() > 1)
            .collect()
    }
}

/// System instruction and user text for one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatPair {
    pub system: String,
    pub user: String,
}
