//! Gemini generation client

use super::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::config::FileGeminiConfig;
use advisor_application::ports::generation::{GenerationClient, GenerationError};
use advisor_domain::{GenerationResult, Model};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Calls `generateContent` once per request, without retries
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(api_key: SecretString, timeout: Duration) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Other(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Build from the `[gemini]` section, resolving the API key
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GenerationError> {
        let api_key = config.api_key().ok_or_else(|| {
            GenerationError::MissingCredentials(format!(
                "set {} or gemini.api_key",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(api_key, Duration::from_secs(config.timeout_secs))?
            .with_base_url(&config.base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn generate_url(&self, model: &Model) -> String {
        let id = model.as_str().trim();
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            id.strip_prefix("models/").unwrap_or(id)
        )
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_text: &str,
        model: &Model,
    ) -> Result<GenerationResult, GenerationError> {
        let request = GenerateContentRequest::new(system_instruction, user_text);
        let start = Utc::now();

        let response = self
            .http
            .post(self.generate_url(model))
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        let end = Utc::now();

        debug!(
            model = %model,
            input_tokens = body.prompt_tokens(),
            output_tokens = body.candidate_tokens(),
            "Generation complete"
        );

        Ok(GenerationResult::new(
            body.text(),
            body.prompt_tokens(),
            body.candidate_tokens(),
            start,
            end,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            SecretString::new("test-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_sends_policy_and_prices_usage() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash-001:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "systemInstruction": {"parts": [{"text": "You are a coach."}]},
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}],
                "generationConfig": {"temperature": 1.0, "maxOutputTokens": 8192},
                "safetySettings": [{
                    "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                    "threshold": "BLOCK_MEDIUM_AND_ABOVE"
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "Be specific."}]}}],
                "usageMetadata": {"promptTokenCount": 1000000, "candidatesTokenCount": 2000000}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .generate("You are a coach.", "hi", &Model::Gemini20Flash001)
            .await
            .unwrap();

        assert_eq!(result.content(), "Be specific.");
        assert_eq!(result.input_tokens(), 1_000_000);
        assert_eq!(result.output_tokens(), 2_000_000);
        assert!((result.input_cost() - 0.075).abs() < 1e-12);
        assert!((result.output_cost() - 0.6).abs() < 1e-12);
        assert!(result.end_time() >= result.start_time());
    }

    #[tokio::test]
    async fn test_empty_response_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = client(&server)
            .generate("", "score this", &Model::Gemini25Pro)
            .await
            .unwrap();

        assert_eq!(result.content(), "");
        assert_eq!(result.input_tokens(), 0);
        assert_eq!(result.total_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_service_error_is_propagated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "Resource exhausted"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .generate("sys", "hi", &Model::Gemini20Flash001)
            .await
            .unwrap_err();

        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Resource exhausted");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FileGeminiConfig {
            api_key_env: "ADVISOR_TEST_UNSET_GEMINI_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(GenerationError::MissingCredentials(_))
        ));
    }
}
