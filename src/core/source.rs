use async_trait::async_trait;
use futures::StreamExt;

use super::types::{ContextMessage, IncrementStream};
use crate::chat::{Round, build_context};
use crate::providers::error::ProviderError;

/// Anything that can turn a request context into a stream of text increments.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    fn model(&self) -> &str;

    async fn stream(&self, context: Vec<ContextMessage>) -> Result<IncrementStream, ProviderError>;

    /// Sends `history` plus `prompt` and calls `on_increment` once per
    /// increment, in arrival order, until the body closes.
    async fn consume(
        &self,
        history: &[Round],
        prompt: &str,
        on_increment: &mut (dyn for<'s> FnMut(&'s str) + Send),
    ) -> Result<(), ProviderError> {
        let mut increments = self.stream(build_context(history, prompt)).await?;

        while let Some(increment) = increments.next().await {
            on_increment(&increment?);
        }

        Ok(())
    }
}
