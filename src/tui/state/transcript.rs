use super::AppState;
use crate::tui::widgets::{ChatMessage, MessageLevel};

/// A system line shown in the chat. `after_rounds` is how many rounds existed
/// when it was posted, which fixes where it sits among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub after_rounds: usize,
    pub text: String,
    pub level: MessageLevel,
}

impl AppState {
    /// Flattens rounds and notices into the blocks the chat widget draws.
    /// The last round is drawn as streaming while a reply is open.
    #[must_use]
    pub fn transcript(&self) -> Vec<ChatMessage> {
        let rounds = self.session.rounds();
        let mut messages = Vec::with_capacity(rounds.len() * 2 + self.notices.len());
        let mut notices = self.notices.iter().peekable();

        for (idx, round) in rounds.iter().enumerate() {
            while let Some(notice) = notices.next_if(|n| n.after_rounds <= idx) {
                messages.push(notice.to_message());
            }

            messages.push(ChatMessage::User(round.user_text().to_string()));

            let streaming = self.is_responding() && idx + 1 == rounds.len();
            let reply = round.bot_text().to_string();
            messages.push(if streaming {
                ChatMessage::StreamingAssistant(reply)
            } else {
                ChatMessage::Assistant(reply)
            });
        }

        messages.extend(notices.map(Notice::to_message));
        messages
    }
}

impl Notice {
    fn to_message(&self) -> ChatMessage {
        ChatMessage::System {
            text: self.text.clone(),
            level: self.level,
        }
    }
}
