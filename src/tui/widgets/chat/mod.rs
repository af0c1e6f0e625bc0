mod message;
mod render;
mod scroll_state;

pub use message::{ChatMessage, MessageLevel};
pub use render::{ASSISTANT_LABEL, USER_LABEL};
pub use scroll_state::ScrollState;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::ui::theme::Theme;

const MORE_INDICATOR: &str = "↓ More";

pub struct ChatWidget<'a> {
    messages: &'a [ChatMessage],
    scroll: &'a mut ScrollState,
}

impl<'a> ChatWidget<'a> {
    #[must_use]
    pub const fn new(messages: &'a [ChatMessage], scroll: &'a mut ScrollState) -> Self {
        Self { messages, scroll }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        if self.messages.is_empty() {
            Self::render_empty_state(area, buf);
            return;
        }

        let content_width = area.width.saturating_sub(4);
        let lines = self.collect_all_lines(content_width);

        self.update_scroll_and_render(area, buf, &lines, content_width);
    }

    fn collect_all_lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (idx, message) in self.messages.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::from(""));
            }
            lines.extend(message.render_to_lines(width));
        }

        lines
    }

    fn update_scroll_and_render(
        self,
        area: Rect,
        buf: &mut Buffer,
        lines: &[Line<'static>],
        content_width: u16,
    ) {
        let viewport_height = area.height as usize;
        self.scroll.update(lines.len(), viewport_height);

        if !self.scroll.is_manual_scroll() {
            self.scroll.scroll_to_bottom();
        }

        let offset = self.scroll.position();
        let end = (offset + viewport_height).min(lines.len());

        for (row, line) in lines[offset..end].iter().enumerate() {
            buf.set_line(area.x + 2, area.y + row as u16, line, content_width);
        }

        if !self.scroll.is_at_bottom() {
            Self::render_scroll_indicator(area, buf);
        }
    }

    fn render_empty_state(area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("Welcome to Parley", Theme::primary_bold()))
                .alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                "Type a message below and press Enter. Replies stream in as they arrive.",
                Theme::muted(),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                "/help for commands, Ctrl+C to exit",
                Theme::muted(),
            ))
            .alignment(Alignment::Center),
        ];

        Paragraph::new(lines).render(area, buf);
    }

    fn render_scroll_indicator(area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height == 0 {
            return;
        }
        let indicator_area = Rect {
            x: area.x + area.width - 10,
            y: area.y + area.height - 1,
            width: 10,
            height: 1,
        };

        Paragraph::new(Line::from(Span::styled(MORE_INDICATOR, Theme::warning())))
            .render(indicator_area, buf);
    }
}
