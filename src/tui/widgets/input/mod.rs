mod action;
mod key_handler;
mod render;

pub use action::InputAction;

use crate::ui::theme::Theme;
use ratatui::style::Style;
use tui_textarea::TextArea;

/// Prompt editor. Submission can be switched off while a reply is
/// streaming; typing still works, Enter just does nothing.
pub struct InputWidget<'a> {
    textarea: TextArea<'a>,
    submit_enabled: bool,
}

impl InputWidget<'_> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: Self::create_textarea(),
            submit_enabled: true,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    pub fn set_text(&mut self, text: &str) {
        let lines: Vec<String> = text.lines().map(ToString::to_string).collect();
        self.textarea = TextArea::new(lines);
        Self::configure(&mut self.textarea);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn clear(&mut self) {
        self.textarea = Self::create_textarea();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    pub fn take(&mut self) -> String {
        let text = self.text();
        self.clear();
        text
    }

    pub const fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    #[must_use]
    pub const fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn create_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text("");
        Self::configure(&mut textarea);
        textarea
    }

    fn configure(textarea: &mut TextArea<'_>) {
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(Theme::white());
    }
}

impl Default for InputWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}
