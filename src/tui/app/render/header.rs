use crate::ui::theme::{BoxChars, Theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// What the header shows about the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub model: String,
    pub endpoint: String,
}

impl HeaderInfo {
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("Model: {} | Endpoint: {}", self.model, self.endpoint)
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, info: &HeaderInfo) {
    let title = format!("Parley v{}", env!("CARGO_PKG_VERSION"));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Theme::border())
        .border_set(ratatui::symbols::border::Set {
            bottom_left: BoxChars::ROUND_BOTTOM_LEFT,
            bottom_right: BoxChars::ROUND_BOTTOM_RIGHT,
            ..ratatui::symbols::border::ROUNDED
        });

    let lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(title, Theme::primary_bold()),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(info.subtitle(), Theme::muted()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
