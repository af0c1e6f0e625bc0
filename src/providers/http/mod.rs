pub mod auth;
pub mod sse;

pub use auth::AuthStrategy;
pub use sse::{SseEvent, SseParser};

use reqwest::Client;
use std::time::Duration;

use crate::providers::error::ProviderError;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            user_agent: Some(concat!("parley/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Thin wrapper over a `reqwest::Client`. Each request opens its own stream;
/// there is no retry layer. Only connecting is bounded in time: a reply body
/// is read for as long as the server keeps it open.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua);
        }

        let inner = builder.build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self { inner, config })
    }

    #[must_use]
    pub fn post(&self, url: &str, auth: &AuthStrategy) -> reqwest::RequestBuilder {
        auth.apply(self.inner.post(url))
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.config.connect_timeout
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
