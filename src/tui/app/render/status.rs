use crate::ui::theme::{Spinners, Theme};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use std::time::Duration;

const HINTS: &str = "/ commands | PgUp/PgDn scroll";

/// Snapshot of what the status bar needs, taken before the draw closure.
#[derive(Debug, Clone, Copy)]
pub struct StatusView {
    pub responding: bool,
    pub elapsed: Option<Duration>,
    pub spinner_frame: usize,
    pub rounds: usize,
}

impl StatusView {
    /// Right-hand text: spinner and elapsed time while a reply streams,
    /// otherwise the round count.
    #[must_use]
    pub fn right_text(&self) -> String {
        if self.responding {
            let frames = Spinners::BRAILLE;
            let frame_char = frames[self.spinner_frame % frames.len()];
            let elapsed = self.elapsed.map(format_elapsed).unwrap_or_default();
            format!("{frame_char} Responding{elapsed}")
        } else {
            match self.rounds {
                0 => String::new(),
                1 => "1 round".to_string(),
                n => format!("{n} rounds"),
            }
        }
    }
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs > 0 {
        format!(" {secs}s")
    } else {
        format!(" {}ms", d.as_millis())
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, view: StatusView) {
    let left_line = Line::from(vec![Span::raw(" "), Span::styled(HINTS, Theme::muted())]);
    frame
        .buffer_mut()
        .set_line(area.x, area.y, &left_line, area.width);

    let text = view.right_text();
    if text.is_empty() {
        return;
    }

    let style = if view.responding {
        Theme::warning()
    } else {
        Theme::muted()
    };
    let right_line = Line::from(vec![Span::styled(text, style), Span::raw(" ")]);
    let status_len = right_line.width() as u16;
    let status_x = area.x + area.width.saturating_sub(status_len);
    frame
        .buffer_mut()
        .set_line(status_x, area.y, &right_line, status_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(responding: bool, rounds: usize) -> StatusView {
        StatusView {
            responding,
            elapsed: Some(Duration::from_secs(3)),
            spinner_frame: 0,
            rounds,
        }
    }

    #[test]
    fn test_responding_shows_spinner_and_elapsed() {
        assert_eq!(view(true, 1).right_text(), "⠋ Responding 3s");
    }

    #[test]
    fn test_idle_shows_round_count() {
        assert_eq!(view(false, 0).right_text(), "");
        assert_eq!(view(false, 1).right_text(), "1 round");
        assert_eq!(view(false, 4).right_text(), "4 rounds");
    }

    #[test]
    fn test_sub_second_elapsed_uses_millis() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), " 250ms");
    }
}
