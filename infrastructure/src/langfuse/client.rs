//! Authenticated Langfuse public API client

use crate::config::{FileLangfuseConfig, LangfuseCredentials};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LangfuseError {
    #[error("invalid URL: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http error: {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("missing credentials: set {public_env} and {secret_env}")]
    MissingCredentials {
        public_env: String,
        secret_env: String,
    },
}

impl LangfuseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LangfuseError::Http { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Basic-auth client for `/api/public`
#[derive(Clone)]
pub struct LangfuseClient {
    http: Client,
    base_url: String,
    public_key: String,
    secret_key: SecretString,
}

impl LangfuseClient {
    pub fn new(base_url: impl Into<String>, public_key: impl Into<String>, secret_key: SecretString) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            public_key: public_key.into(),
            secret_key,
        }
    }

    /// Build from the `[langfuse]` section, resolving host and keys
    pub fn from_config(config: &FileLangfuseConfig) -> Result<Self, LangfuseError> {
        let LangfuseCredentials {
            public_key,
            secret_key,
        } = config
            .credentials()
            .ok_or_else(|| LangfuseError::MissingCredentials {
                public_env: config.public_key_env.clone(),
                secret_env: config.secret_key_env.clone(),
            })?;
        Ok(Self::new(config.base_url(), public_key, secret_key))
    }

    /// `{base}/api/public/{segments...}`, each segment percent-encoded
    pub(super) fn url(&self, segments: &[&str]) -> Result<Url, LangfuseError> {
        let mut url =
            Url::parse(self.base_url.trim_end_matches('/')).map_err(|e| LangfuseError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LangfuseError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "public"])
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.public_key, Some(self.secret_key.expose_secret()))
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, LangfuseError> {
        let response = self
            .authorized(self.http.get(url))
            .query(query)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, LangfuseError> {
        let response = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn check(response: Response) -> Result<Response, LangfuseError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(LangfuseError::Http { status, body })
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LangfuseError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| LangfuseError::Decode(e.to_string()))
    }
}
