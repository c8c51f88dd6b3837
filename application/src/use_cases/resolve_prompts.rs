//! Prompt resolution
//!
//! Fetches templates from the prompt store and turns compiled chat prompts
//! into the system/user pair a generation call takes.

use crate::ports::prompt_store::{PromptStore, PromptStoreError};
use advisor_domain::{ChatPair, PromptError, PromptKind, PromptParams, PromptTemplate};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves and compiles prompt templates
#[derive(Clone)]
pub struct PromptResolver {
    store: Arc<dyn PromptStore>,
}

impl PromptResolver {
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self { store }
    }

    /// Fetch one template (one round trip, no caching)
    pub async fn resolve(
        &self,
        name: &str,
        kind: PromptKind,
    ) -> Result<PromptTemplate, PromptStoreError> {
        let template = self.store.get_prompt(name, kind).await?;
        debug!(prompt = %template.identity(), "Resolved prompt");
        Ok(template)
    }

    /// Fetch several templates concurrently, in the order given.
    ///
    /// Fails as soon as any fetch fails; the remaining fetches are dropped.
    pub async fn resolve_all<S: AsRef<str>>(
        &self,
        names: &[S],
        kind: PromptKind,
    ) -> Result<Vec<PromptTemplate>, PromptStoreError> {
        try_join_all(names.iter().map(|name| self.resolve(name.as_ref(), kind))).await
    }

    /// Compile a chat template and pick out its system and user messages
    pub fn compile_chat(
        template: &PromptTemplate,
        params: &PromptParams,
    ) -> Result<ChatPair, PromptError> {
        let compiled = template.compile(params);
        for role in compiled.duplicate_roles() {
            warn!(
                prompt = %template.identity(),
                %role,
                "Chat prompt repeats a role; only the first message is used"
            );
        }
        compiled.chat_pair()
    }

    /// Compile a text template to its plain text
    pub fn compile_text(
        template: &PromptTemplate,
        params: &PromptParams,
    ) -> Result<String, PromptError> {
        template.compile(params).into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::ChatMessage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingStore {
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PromptStore for RecordingStore {
        async fn get_prompt(
            &self,
            name: &str,
            kind: PromptKind,
        ) -> Result<PromptTemplate, PromptStoreError> {
            self.requested.lock().unwrap().push(name.to_string());
            if name == "missing" {
                return Err(PromptStoreError::NotFound(name.to_string()));
            }
            Ok(match kind {
                PromptKind::Chat => PromptTemplate::chat(
                    name,
                    1,
                    vec![
                        ChatMessage::system("sys {{user_input}}"),
                        ChatMessage::user("usr {{user_input}}"),
                    ],
                ),
                PromptKind::Text => PromptTemplate::text(name, 1, "{{user_input}}"),
            })
        }
    }

    fn resolver() -> (PromptResolver, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore {
            requested: Mutex::new(Vec::new()),
        });
        (PromptResolver::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_order() {
        let (resolver, _) = resolver();
        let templates = resolver
            .resolve_all(&["b", "a", "c"], PromptKind::Chat)
            .await
            .unwrap();
        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_resolve_all_fails_if_any_fails() {
        let (resolver, _) = resolver();
        let result = resolver
            .resolve_all(&["a", "missing", "c"], PromptKind::Chat)
            .await;
        assert!(matches!(result, Err(PromptStoreError::NotFound(name)) if name == "missing"));
    }

    #[tokio::test]
    async fn test_compile_chat_and_text() {
        let (resolver, store) = resolver();
        let params = PromptParams::new().with("user_input", "hi");

        let chat = resolver.resolve("m", PromptKind::Chat).await.unwrap();
        let pair = PromptResolver::compile_chat(&chat, &params).unwrap();
        assert_eq!(pair.system, "sys hi");
        assert_eq!(pair.user, "usr hi");

        let text = resolver.resolve("e", PromptKind::Text).await.unwrap();
        assert_eq!(PromptResolver::compile_text(&text, &params).unwrap(), "hi");

        assert_eq!(store.requested.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_compile_chat_with_repeated_roles_uses_first() {
        let template = PromptTemplate::chat(
            "manager1",
            4,
            vec![
                ChatMessage::system("first {{user_input}}"),
                ChatMessage::user("ask {{user_input}}"),
                ChatMessage::system("second"),
                ChatMessage::user("ignored"),
            ],
        );
        let params = PromptParams::new().with("user_input", "hi");

        let pair = PromptResolver::compile_chat(&template, &params).unwrap();
        assert_eq!(pair.system, "first hi");
        assert_eq!(pair.user, "ask hi");
    }
}
