//! Streaming client for an OpenAI-style `/v1/chat/completions` endpoint.

pub mod convert;
pub mod types;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::fmt::Display;

use crate::core::source::CompletionSource;
use crate::core::types::{ContextMessage, IncrementStream};
use crate::providers::error::ProviderError;
use crate::providers::http::{AuthStrategy, HttpClient, HttpConfig, SseParser};
use crate::providers::types::{ApiKey, BaseUrl, ModelId};

pub use convert::{EventOutcome, classify};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Clone)]
pub struct CompletionsClient {
    http: HttpClient,
    auth: AuthStrategy,
    model: ModelId,
    base_url: BaseUrl,
    api_key_env: String,
    strict_status: bool,
}

impl std::fmt::Debug for CompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionsClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("strict_status", &self.strict_status)
            .finish_non_exhaustive()
    }
}

impl CompletionsClient {
    pub fn new(api_key: ApiKey) -> Result<Self, ProviderError> {
        Self::with_http_config(AuthStrategy::bearer(api_key), HttpConfig::default())
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::new(ApiKey::from_env(DEFAULT_API_KEY_ENV)?)
    }

    pub fn with_http_config(
        auth: AuthStrategy,
        http_config: HttpConfig,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::with_config(http_config)?,
            auth,
            model: ModelId::new(DEFAULT_MODEL),
            base_url: BaseUrl::new(DEFAULT_BASE_URL),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            strict_status: false,
        })
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<ModelId>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<BaseUrl>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_api_key_env(mut self, var_name: impl Into<String>) -> Self {
        self.api_key_env = var_name.into();
        self
    }

    /// Reject non-success responses before reading the body. Off by default:
    /// the body of any response is read as a stream.
    #[must_use]
    pub const fn with_strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        self.base_url.join(COMPLETIONS_PATH)
    }

    async fn send(&self, context: &[ContextMessage]) -> Result<reqwest::Response, ProviderError> {
        let api_request = types::ChatCompletionRequest {
            model: self.model.as_str(),
            stream: true,
            messages: context,
        };

        let body = serde_json::to_string(&api_request)
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let url = self.endpoint();
        tracing::debug!(%url, model = %self.model, messages = context.len(), "sending completion request");

        let response = self
            .http
            .post(&url, &self.auth)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&e, self.http.connect_timeout()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if self.strict_status {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(
                status.as_u16(),
                &error_body,
                &self.api_key_env,
            ));
        }

        tracing::warn!(
            status = status.as_u16(),
            "completion endpoint returned a non-success status; reading body as a stream anyway"
        );
        Ok(response)
    }
}

/// Turns a raw response byte stream into text increments, dropping every
/// event that does not classify as one.
pub fn increments<S, E>(byte_stream: S) -> IncrementStream
where
    S: Stream<Item = Result<Bytes, E>> + Unpin + Send + 'static,
    E: Display + Send + 'static,
{
    let stream = SseParser::parse_stream(byte_stream).filter_map(|result| async move {
        match result {
            Ok(event) => match classify(&event) {
                EventOutcome::Increment(text) => Some(Ok(text)),
                EventOutcome::Skip => None,
            },
            Err(e) => Some(Err(e)),
        }
    });

    Box::pin(stream)
}

#[async_trait]
impl CompletionSource for CompletionsClient {
    fn model(&self) -> &str {
        self.model.as_str()
    }

    async fn stream(&self, context: Vec<ContextMessage>) -> Result<IncrementStream, ProviderError> {
        let response = self.send(&context).await?;
        Ok(increments(response.bytes_stream()))
    }
}
