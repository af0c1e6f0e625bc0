mod streaming;
mod transcript;

pub use transcript::Notice;

use crate::chat::{ChatSession, PendingRequest, SubmitError};
use crate::tui::widgets::{MessageLevel, ScrollState};
use std::time::{Duration, Instant};

/// Everything the draw loop reads. The chat session lives here, so the UI
/// task is the only writer of conversation state.
pub struct AppState {
    pub should_quit: bool,
    pub frame: usize,
    pub spinner_frame: usize,
    pub session: ChatSession,
    pub scroll: ScrollState,
    notices: Vec<Notice>,

    spinner_last_update: Option<Instant>,
    request_start: Option<Instant>,
}

impl AppState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            should_quit: false,
            frame: 0,
            spinner_frame: 0,
            session: ChatSession::new(),
            scroll: ScrollState::new(),
            notices: Vec::new(),
            spinner_last_update: None,
            request_start: None,
        }
    }

    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.update_spinner();
    }

    fn update_spinner(&mut self) {
        const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

        let now = Instant::now();
        match self.spinner_last_update {
            Some(last) if now.duration_since(last) >= SPINNER_INTERVAL => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                self.spinner_last_update = Some(now);
            }
            None => {
                self.spinner_last_update = Some(now);
            }
            _ => {}
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub const fn is_responding(&self) -> bool {
        self.session.is_responding()
    }

    /// Opens a round for `prompt` and starts the elapsed timer.
    pub fn begin_round(&mut self, prompt: String) -> Result<PendingRequest, SubmitError> {
        let request = self.session.begin_round(prompt)?;
        self.request_start = Some(Instant::now());
        self.scroll.scroll_to_bottom();
        Ok(request)
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.request_start.map(|start| start.elapsed())
    }

    pub fn add_notice(&mut self, text: impl Into<String>) {
        self.add_notice_with_level(text, MessageLevel::Info);
    }

    pub fn add_notice_with_level(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.notices.push(Notice {
            after_rounds: self.session.rounds().len(),
            text: text.into(),
            level,
        });
        self.scroll.reset_manual_scroll();
    }

    /// Drops every round and notice. Refused while a reply is streaming.
    pub fn clear_conversation(&mut self) -> Result<(), SubmitError> {
        self.session.reset()?;
        self.notices.clear();
        self.scroll = ScrollState::new();
        Ok(())
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll.scroll_to_top();
    }

    pub const fn scroll_to_bottom(&mut self) {
        self.scroll.scroll_to_bottom();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
