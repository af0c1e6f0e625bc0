use super::conversation::Round;

/// What the session needs from whatever is displaying the conversation.
/// Both hooks are best effort and default to doing nothing, so an unmounted
/// view is just [`DetachedView`].
pub trait ViewPort {
    fn refresh(&mut self, _round: &Round) {}

    fn scroll_to_bottom(&mut self) {}
}

/// No view attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedView;

impl ViewPort for DetachedView {}

/// Writes each round's reply to an `io::Write` as it grows. Used by the
/// one-shot `ask` command.
#[derive(Debug)]
pub struct EchoView<W> {
    out: W,
    written: usize,
}

impl<W: std::io::Write> EchoView<W> {
    pub const fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: std::io::Write> ViewPort for EchoView<W> {
    fn refresh(&mut self, round: &Round) {
        let text = round.bot_text();
        if let Some(tail) = text.get(self.written..) {
            if self.out.write_all(tail.as_bytes()).is_ok() {
                let _ = self.out.flush();
                self.written = text.len();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Conversation;

    #[test]
    fn test_echo_view_writes_only_new_text() {
        let mut conversation = Conversation::new();
        let mut view = EchoView::new(Vec::new());

        let mut handle = conversation.push_round("q");
        handle.append("Hi");
        view.refresh(handle.as_round());
        handle.append(" there");
        view.refresh(handle.as_round());
        view.refresh(handle.as_round());

        assert_eq!(view.into_inner(), b"Hi there");
    }

    #[test]
    fn test_detached_view_accepts_calls() {
        let mut conversation = Conversation::new();
        let handle = conversation.push_round("q");
        let mut view = DetachedView;

        view.refresh(handle.as_round());
        view.scroll_to_bottom();
    }
}
