use serde::Serialize;

use crate::core::types::ContextMessage;

/// One prompt and its (possibly still growing) reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    user_text: String,
    bot_text: String,
}

impl Round {
    #[must_use]
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: String::new(),
        }
    }

    #[must_use]
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    #[must_use]
    pub fn bot_text(&self) -> &str {
        &self.bot_text
    }
}

/// Exclusive append handle to a single round. Only the reply text can grow.
#[derive(Debug)]
pub struct RoundMut<'a> {
    round: &'a mut Round,
}

impl RoundMut<'_> {
    pub fn append(&mut self, increment: &str) {
        self.round.bot_text.push_str(increment);
    }

    #[must_use]
    pub fn as_round(&self) -> &Round {
        &*self.round
    }
}

/// Rounds in submission order. Rounds are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    rounds: Vec<Round>,
}

impl Conversation {
    #[must_use]
    pub const fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn push_round(&mut self, user_text: impl Into<String>) -> RoundMut<'_> {
        self.rounds.push(Round::new(user_text));
        let index = self.rounds.len() - 1;
        RoundMut {
            round: &mut self.rounds[index],
        }
    }

    pub fn last_mut(&mut self) -> Option<RoundMut<'_>> {
        self.rounds.last_mut().map(|round| RoundMut { round })
    }

    pub(crate) fn clear(&mut self) {
        self.rounds.clear();
    }
}

/// Flattens `history` into alternating user/assistant entries and appends
/// `prompt` as the final user entry.
#[must_use]
pub fn build_context(history: &[Round], prompt: &str) -> Vec<ContextMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 1);

    for round in history {
        messages.push(ContextMessage::user(round.user_text()));
        messages.push(ContextMessage::assistant(round.bot_text()));
    }

    messages.push(ContextMessage::user(prompt));
    messages
}
