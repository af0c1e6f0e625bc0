//! Scripted [`CompletionSource`] for tests. Replies are fed through the same
//! event splitter and classifier as real response bodies.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::source::CompletionSource;
use crate::core::types::{ContextMessage, IncrementStream};
use crate::providers::completions::increments;
use crate::providers::error::ProviderError;

#[derive(Debug, Clone)]
pub struct MockResponse {
    chunks: Vec<Bytes>,
    refuse: Option<String>,
    fail_after: Option<String>,
}

impl MockResponse {
    /// Raw body chunks, delivered as-is.
    #[must_use]
    pub fn body<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            refuse: None,
            fail_after: None,
        }
    }

    /// One well-formed `data:` event per increment, one event per chunk.
    #[must_use]
    pub fn increments<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::body(texts.into_iter().map(|text| Bytes::from(data_event(text.as_ref()))))
    }

    /// The request itself fails, as with a refused connection.
    #[must_use]
    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            chunks: Vec::new(),
            refuse: Some(message.into()),
            fail_after: None,
        }
    }

    /// Ends the body with a transport error after the scripted chunks.
    #[must_use]
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.fail_after = Some(message.into());
        self
    }
}

/// Formats one completion chunk exactly as the endpoint sends it.
#[must_use]
pub fn data_event(content: &str) -> String {
    let payload = serde_json::json!({ "choices": [{ "delta": { "content": content } }] });
    format!("data:{payload}\n\n")
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct MockSource {
    model: String,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<Vec<ContextMessage>>>>,
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn with_response(self, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    #[must_use]
    pub fn requests(&self) -> Vec<Vec<ContextMessage>> {
        lock(&self.requests).clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionSource for MockSource {
    fn model(&self) -> &str {
        &self.model
    }

    async fn stream(&self, context: Vec<ContextMessage>) -> Result<IncrementStream, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(context);

        let response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| ProviderError::Connection("MockSource: no responses queued".into()))?;

        if let Some(message) = response.refuse {
            return Err(ProviderError::Connection(message));
        }

        let mut items: Vec<Result<Bytes, String>> = response.chunks.into_iter().map(Ok).collect();
        if let Some(message) = response.fail_after {
            items.push(Err(message));
        }

        Ok(increments(futures::stream::iter(items)))
    }
}
