#![allow(clippy::cast_possible_truncation)]

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use super::InputWidget;
use crate::ui::theme::Theme;

const SEND_HINT: &str = "↵ send";
const WAIT_HINT: &str = "waiting";
const HINT_WIDTH: u16 = 8;

impl InputWidget<'_> {
    pub fn render(&mut self, area: Rect, frame: &mut Frame) {
        Self::render_separator(area, frame.buffer_mut());

        let input_area = Self::input_area(area);
        self.render_prefix(input_area, frame.buffer_mut());
        self.render_hint(input_area, frame.buffer_mut());

        let textarea_area = Self::textarea_area(input_area);
        self.render_textarea(textarea_area, frame);
    }

    fn render_separator(area: Rect, buf: &mut Buffer) {
        let separator_area = Rect { height: 1, ..area };

        let line = Line::from(Span::styled(
            "─".repeat(area.width as usize),
            Theme::border(),
        ));
        Paragraph::new(line).render(separator_area, buf);
    }

    fn render_prefix(&self, input_area: Rect, buf: &mut Buffer) {
        let prefix_area = Rect {
            width: 2,
            height: 1,
            ..input_area
        };

        let style = if self.submit_enabled {
            Theme::white()
        } else {
            Theme::muted()
        };
        Paragraph::new(Line::from(Span::styled("> ", style))).render(prefix_area, buf);
    }

    /// Send hint once there is text to send; a muted wait hint while a reply
    /// is streaming.
    fn render_hint(&self, input_area: Rect, buf: &mut Buffer) {
        let (text, style) = if !self.submit_enabled {
            (WAIT_HINT, Theme::warning())
        } else if self.is_empty() {
            return;
        } else {
            (SEND_HINT, Theme::muted())
        };

        let hint_width = text.chars().count() as u16;
        if input_area.width <= hint_width + 1 {
            return;
        }

        let hint_area = Rect {
            x: input_area.x + input_area.width - hint_width - 1,
            y: input_area.y,
            width: hint_width,
            height: 1,
        };
        Paragraph::new(Line::from(Span::styled(text, style))).render(hint_area, buf);
    }

    fn render_textarea(&mut self, area: Rect, frame: &mut Frame) {
        self.textarea
            .set_block(Block::default().borders(Borders::NONE));

        frame.render_widget(&self.textarea, area);

        let (cursor_row, cursor_col) = self.textarea.cursor();
        frame.set_cursor_position(Position::new(
            area.x + cursor_col as u16,
            area.y + cursor_row as u16,
        ));
    }

    const fn input_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(1),
        }
    }

    const fn textarea_area(input_area: Rect) -> Rect {
        Rect {
            x: input_area.x + 2,
            y: input_area.y,
            width: input_area.width.saturating_sub(2 + HINT_WIDTH),
            height: input_area.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(widget: &mut InputWidget<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        terminal
            .draw(|f| widget.render(f.area(), f))
            .unwrap();

        let buf = terminal.backend().buffer();
        (0..3)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_textarea_area_leaves_room_for_hint() {
        let input_area = Rect::new(0, 0, 80, 3);
        let textarea = InputWidget::textarea_area(input_area);

        assert!(textarea.width < input_area.width);
        assert_eq!(textarea.x, 2);
    }

    #[test]
    fn test_shows_send_hint_only_with_text() {
        let mut widget = InputWidget::new();
        assert!(!rendered(&mut widget).contains("send"));

        widget.set_text("hi");
        assert!(rendered(&mut widget).contains("send"));
    }

    #[test]
    fn test_shows_wait_hint_while_disabled() {
        let mut widget = InputWidget::new();
        widget.set_text("hi");
        widget.set_submit_enabled(false);

        let screen = rendered(&mut widget);
        assert!(screen.contains(WAIT_HINT));
        assert!(!screen.contains("send"));
    }
}
