use super::{AppEvent, POLL_TIMEOUT, SCROLL_DELTA, TICK_INTERVAL};
use crate::core::Result;
use crossterm::event::{self, Event as CrosstermEvent, MouseEventKind};
use tokio::sync::mpsc::UnboundedSender;

/// Maps a raw terminal event onto the app's event set. Focus changes and
/// mouse clicks are ignored.
#[must_use]
pub fn translate(event: CrosstermEvent) -> Option<AppEvent> {
    match event {
        CrosstermEvent::Key(key) => Some(AppEvent::Input(key)),
        CrosstermEvent::Paste(text) => Some(AppEvent::Paste(text)),
        CrosstermEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(AppEvent::MouseScroll(-SCROLL_DELTA)),
            MouseEventKind::ScrollDown => Some(AppEvent::MouseScroll(SCROLL_DELTA)),
            _ => None,
        },
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
    }
}

pub async fn terminal_event_loop(tx: UnboundedSender<AppEvent>) -> Result<()> {
    loop {
        if event::poll(POLL_TIMEOUT)?
            && let Some(app_event) = translate(event::read()?)
            && tx.send(app_event).is_err()
        {
            break;
        }
        if tx.is_closed() {
            break;
        }
    }
    Ok(())
}

pub async fn tick_loop(tx: UnboundedSender<AppEvent>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).is_err() {
            break;
        }
    }
}
