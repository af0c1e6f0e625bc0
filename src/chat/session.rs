use super::conversation::{Conversation, Round, build_context};
use super::error::{ChatError, SubmitError};
use super::view::ViewPort;
use crate::core::source::CompletionSource;
use crate::core::types::ContextMessage;

/// Snapshot taken when a round starts: the rounds before it plus the new
/// prompt. This is everything the network side needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub history: Vec<Round>,
    pub prompt: String,
}

impl PendingRequest {
    #[must_use]
    pub fn context(&self) -> Vec<ContextMessage> {
        build_context(&self.history, &self.prompt)
    }
}

/// Owns the conversation and the single in-flight flag.
#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    responding: bool,
}

impl ChatSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            responding: false,
        }
    }

    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        self.conversation.rounds()
    }

    #[must_use]
    pub const fn is_responding(&self) -> bool {
        self.responding
    }

    #[must_use]
    pub fn can_submit(&self, prompt: &str) -> bool {
        self.check_submit(prompt).is_ok()
    }

    fn check_submit(&self, prompt: &str) -> Result<(), SubmitError> {
        if self.responding {
            Err(SubmitError::Responding)
        } else if prompt.trim().is_empty() {
            Err(SubmitError::EmptyPrompt)
        } else {
            Ok(())
        }
    }

    /// Appends a new round with an empty reply and marks the session as
    /// responding. Fails without touching state if a round is already in
    /// progress or the prompt is empty.
    pub fn begin_round(&mut self, prompt: impl Into<String>) -> Result<PendingRequest, SubmitError> {
        let prompt = prompt.into();
        self.check_submit(&prompt)?;

        let history = self.conversation.rounds().to_vec();
        self.conversation.push_round(prompt.clone());
        self.responding = true;

        tracing::debug!(rounds = self.conversation.len(), "round started");

        Ok(PendingRequest { history, prompt })
    }

    /// Appends to the in-progress round. Returns `false` and does nothing
    /// when no round is in progress.
    pub fn append_increment(&mut self, increment: &str) -> bool {
        if !self.responding {
            return false;
        }

        match self.conversation.last_mut() {
            Some(mut round) => {
                round.append(increment);
                true
            }
            None => false,
        }
    }

    pub fn finish_round(&mut self) {
        if self.responding {
            tracing::debug!(rounds = self.conversation.len(), "round finished");
        }
        self.responding = false;
    }

    /// Clears all rounds. Refused while a response is still streaming.
    pub fn reset(&mut self) -> Result<(), SubmitError> {
        if self.responding {
            return Err(SubmitError::Responding);
        }
        self.conversation.clear();
        Ok(())
    }

    /// Runs one full round against `source`: starts the round, appends every
    /// increment to it while refreshing `view`, and clears the responding flag
    /// when the stream ends or fails.
    pub async fn submit<S, V>(
        &mut self,
        source: &S,
        prompt: impl Into<String>,
        view: &mut V,
    ) -> Result<(), ChatError>
    where
        S: CompletionSource + ?Sized,
        V: ViewPort + Send + ?Sized,
    {
        let request = self.begin_round(prompt)?;
        let outcome = self.stream_reply(source, &request, view).await;
        self.finish_round();

        if let Err(ref e) = outcome {
            tracing::warn!(error = %e, "response failed");
        }
        outcome
    }

    async fn stream_reply<S, V>(
        &mut self,
        source: &S,
        request: &PendingRequest,
        view: &mut V,
    ) -> Result<(), ChatError>
    where
        S: CompletionSource + ?Sized,
        V: ViewPort + Send + ?Sized,
    {
        let conversation = &mut self.conversation;
        let mut on_increment = |increment: &str| {
            if let Some(mut round) = conversation.last_mut() {
                round.append(increment);
                view.refresh(round.as_round());
                view.scroll_to_bottom();
            }
        };

        source
            .consume(&request.history, &request.prompt, &mut on_increment)
            .await?;
        Ok(())
    }
}
