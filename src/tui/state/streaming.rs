use super::AppState;
use crate::chat::ViewPort;
use crate::tui::widgets::MessageLevel;

impl AppState {
    /// Appends one increment to the open round and follows it to the bottom.
    /// Increments that arrive with no round open are dropped.
    pub fn apply_increment(&mut self, increment: &str) {
        if !self.session.append_increment(increment) {
            tracing::debug!("increment arrived with no open round");
            return;
        }

        if let Some(round) = self.session.rounds().last() {
            self.scroll.refresh(round);
        }
        ViewPort::scroll_to_bottom(&mut self.scroll);
    }

    pub fn finish_response(&mut self) {
        self.session.finish_round();
        self.request_start = None;
    }

    /// Closes the round as it stands and reports the failure in the chat.
    pub fn fail_response(&mut self, error: &str) {
        self.finish_response();
        self.add_notice_with_level(format!("Error: {error}"), MessageLevel::Error);
    }
}
