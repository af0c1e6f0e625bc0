mod loops;

pub use loops::{terminal_event_loop, tick_loop};

use crossterm::event::KeyEvent;
use std::time::Duration;

pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);
pub const SCROLL_DELTA: i16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(KeyEvent),
    Paste(String),
    MouseScroll(i16),
    Resize(u16, u16),
    Tick,
    /// One piece of reply text, in arrival order.
    Increment(String),
    ResponseComplete,
    ResponseFailed(String),
}
