use crate::chat::{Round, ViewPort};

/// Vertical offset of the chat view. Follows the bottom until the user
/// scrolls by hand.
#[derive(Debug, Clone)]
pub struct ScrollState {
    position: usize,
    total_lines: usize,
    viewport_height: usize,
    manual_scroll: bool,
}

impl ScrollState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            total_lines: 0,
            viewport_height: 0,
            manual_scroll: false,
        }
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn is_manual_scroll(&self) -> bool {
        self.manual_scroll
    }

    #[must_use]
    pub const fn is_at_bottom(&self) -> bool {
        if self.total_lines <= self.viewport_height {
            true
        } else {
            self.position >= self.max_scroll()
        }
    }

    pub fn update(&mut self, total_lines: usize, viewport_height: usize) {
        self.total_lines = total_lines;
        self.viewport_height = viewport_height;
        self.position = self.position.min(self.max_scroll());
    }

    pub const fn scroll_to_bottom(&mut self) {
        self.position = self.max_scroll();
        self.manual_scroll = false;
    }

    pub const fn scroll_to_top(&mut self) {
        self.position = 0;
        self.manual_scroll = true;
    }

    pub const fn scroll_up(&mut self, lines: usize) {
        self.position = self.position.saturating_sub(lines);
        self.manual_scroll = true;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.position = (self.position + lines).min(self.max_scroll());
        self.manual_scroll = true;
    }

    pub const fn reset_manual_scroll(&mut self) {
        self.manual_scroll = false;
    }

    const fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }
}

/// Increments pull the view back to the newest line; the draw pass picks up
/// the new text, so `refresh` has nothing to do.
impl ViewPort for ScrollState {
    fn refresh(&mut self, _round: &Round) {}

    fn scroll_to_bottom(&mut self) {
        Self::scroll_to_bottom(self);
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
