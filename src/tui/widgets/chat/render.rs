use ratatui::text::{Line, Span};

use super::{ChatMessage, MessageLevel};
use crate::ui::theme::Theme;

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "ChatGPT";
const INDENT: &str = "  ";
const CURSOR: &str = "▊";

impl ChatMessage {
    pub fn render_to_lines(&self, width: u16) -> Vec<Line<'static>> {
        match self {
            Self::User(text) => render_block(USER_LABEL, Theme::user_label(), text, width, false),
            Self::Assistant(text) => {
                render_block(ASSISTANT_LABEL, Theme::assistant_label(), text, width, false)
            }
            Self::StreamingAssistant(text) => {
                render_block(ASSISTANT_LABEL, Theme::assistant_label(), text, width, true)
            }
            Self::System { text, level } => render_system(text, *level, width),
        }
    }
}

fn render_block(
    label: &'static str,
    label_style: ratatui::style::Style,
    text: &str,
    width: u16,
    streaming: bool,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(label, label_style))];
    lines.extend(wrap_body(text, width));

    if streaming {
        append_cursor(&mut lines);
    }

    lines
}

/// Wraps each source line separately so explicit newlines survive.
fn wrap_body(text: &str, width: u16) -> Vec<Line<'static>> {
    if text.is_empty() {
        return Vec::new();
    }

    let available = (width as usize).saturating_sub(INDENT.len()).max(1);
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        if source_line.is_empty() {
            lines.push(Line::from(""));
            continue;
        }
        for piece in textwrap::wrap(source_line, available) {
            lines.push(Line::from(Span::styled(
                format!("{INDENT}{piece}"),
                Theme::off_white(),
            )));
        }
    }

    lines
}

fn render_system(text: &str, level: MessageLevel, width: u16) -> Vec<Line<'static>> {
    let style = level.style();
    let prefix = format!("{} ", level.icon());
    let available = (width as usize).saturating_sub(prefix.len()).max(1);

    let pieces: Vec<String> = text
        .lines()
        .flat_map(|line| textwrap::wrap(line, available))
        .map(std::borrow::Cow::into_owned)
        .collect();

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let lead = if i == 0 {
                prefix.clone()
            } else {
                " ".repeat(prefix.len())
            };
            Line::from(vec![Span::styled(lead, style), Span::styled(piece, style)])
        })
        .collect()
}

fn append_cursor(lines: &mut Vec<Line<'static>>) {
    let cursor = Span::styled(CURSOR, Theme::primary());

    if lines.len() == 1 {
        lines.push(Line::from(vec![Span::raw(INDENT), cursor]));
    } else if let Some(last_line) = lines.last_mut() {
        last_line.spans.push(cursor);
    }
}
