use ratatui::layout::{Constraint, Direction, Layout, Rect};

const HEADER_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;
const MIN_INPUT_ROWS: usize = 2;
const MAX_INPUT_ROWS: usize = 6;

pub struct LayoutAreas {
    pub header: Rect,
    pub chat: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Separator line plus the editor rows, growing with the draft up to a cap.
#[must_use]
pub fn input_height(input_lines: usize) -> u16 {
    let rows = input_lines.clamp(MIN_INPUT_ROWS, MAX_INPUT_ROWS);
    1 + rows as u16
}

#[must_use]
pub fn calculate_layout(area: Rect, input_lines: usize) -> LayoutAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(input_height(input_lines)),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    LayoutAreas {
        header: chunks[0],
        chat: chunks[1],
        input: chunks[2],
        status: chunks[3],
    }
}
