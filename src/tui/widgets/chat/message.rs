use ratatui::style::Style;

use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

impl MessageLevel {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Info => "[i]",
            Self::Error => "[x]",
        }
    }

    #[must_use]
    pub const fn style(self) -> Style {
        match self {
            Self::Info => Theme::primary(),
            Self::Error => Theme::error(),
        }
    }
}

/// One renderable block of the chat view. A round becomes a `User` block
/// followed by an `Assistant` or `StreamingAssistant` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    User(String),
    Assistant(String),
    StreamingAssistant(String),
    System { text: String, level: MessageLevel },
}
