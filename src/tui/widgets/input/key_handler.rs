use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{InputAction, InputWidget};
use crate::tui::app::SLASH_COMMANDS;

impl InputWidget<'_> {
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::SHIFT) => {
                self.textarea.insert_newline();
                InputAction::Continue
            }
            (KeyCode::Enter, KeyModifiers::NONE) => self.handle_enter(),

            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.complete_command();
                InputAction::Continue
            }

            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                InputAction::Clear
            }

            _ => {
                self.textarea.input(key);
                InputAction::Continue
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) -> InputAction {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.textarea.insert_newline();
            }
            self.textarea.insert_str(line.trim_end_matches('\r'));
        }
        InputAction::Continue
    }

    /// Slash commands go through even while submission is off.
    fn handle_enter(&mut self) -> InputAction {
        let text = self.text();
        if text.trim().is_empty() || (!self.submit_enabled && !text.starts_with('/')) {
            InputAction::Continue
        } else {
            InputAction::Submit(self.take())
        }
    }

    /// Completes a slash command when the typed prefix matches exactly one.
    fn complete_command(&mut self) {
        let text = self.text();
        if !text.starts_with('/') || text.contains(char::is_whitespace) {
            return;
        }

        let mut matches = SLASH_COMMANDS.iter().filter(|cmd| cmd.starts_with(&text));
        if let (Some(only), None) = (matches.next(), matches.next()) {
            self.set_text(only);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(widget: &mut InputWidget<'_>, text: &str) {
        for c in text.chars() {
            widget.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_submits_and_clears() {
        let mut widget = InputWidget::new();
        type_text(&mut widget, "Hello");

        assert_eq!(
            widget.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("Hello".into())
        );
        assert!(widget.is_empty());
    }

    #[test]
    fn test_enter_is_ignored_while_disabled() {
        let mut widget = InputWidget::new();
        type_text(&mut widget, "second");
        widget.set_submit_enabled(false);

        assert_eq!(widget.handle_key(key(KeyCode::Enter)), InputAction::Continue);
        assert_eq!(widget.text(), "second");

        widget.set_submit_enabled(true);
        assert_eq!(
            widget.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("second".into())
        );
    }

    #[test]
    fn test_commands_submit_while_disabled() {
        let mut widget = InputWidget::new();
        widget.set_submit_enabled(false);
        type_text(&mut widget, "/help");

        assert_eq!(
            widget.handle_key(key(KeyCode::Enter)),
            InputAction::Submit("/help".into())
        );
    }

    #[test]
    fn test_blank_input_does_not_submit() {
        let mut widget = InputWidget::new();
        assert_eq!(widget.handle_key(key(KeyCode::Enter)), InputAction::Continue);

        type_text(&mut widget, "   ");
        assert_eq!(widget.handle_key(key(KeyCode::Enter)), InputAction::Continue);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut widget = InputWidget::new();
        type_text(&mut widget, "a");
        widget.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut widget, "b");

        assert_eq!(widget.text(), "a\nb");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut widget = InputWidget::new();
        type_text(&mut widget, "draft");

        let action = widget.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        assert_eq!(action, InputAction::Clear);
        assert!(widget.is_empty());
    }

    #[test]
    fn test_paste_keeps_lines() {
        let mut widget = InputWidget::new();
        widget.handle_paste("one\r\ntwo");

        assert_eq!(widget.text(), "one\ntwo");
    }

    #[test]
    fn test_tab_completes_unique_command() {
        let mut widget = InputWidget::new();
        type_text(&mut widget, "/he");
        widget.handle_key(key(KeyCode::Tab));

        assert_eq!(widget.text(), "/help");
    }
}
