use ratatui::style::{Color, Modifier, Style};

pub struct Palette;

impl Palette {
    pub const TEAL: Color = Color::Rgb(16, 163, 127);
    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const RED: Color = Color::Rgb(239, 68, 68);
    pub const GRAY: Color = Color::Rgb(107, 114, 128);
    pub const DARK_GRAY: Color = Color::Rgb(55, 65, 81);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const OFF_WHITE: Color = Color::Rgb(200, 200, 200);
}

pub struct BoxChars;

impl BoxChars {
    pub const ROUND_BOTTOM_LEFT: &'static str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &'static str = "╯";
}

pub struct Spinners;

impl Spinners {
    pub const BRAILLE: &'static [&'static str] =
        &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}

pub struct Theme;

impl Theme {
    #[must_use]
    pub const fn primary() -> Style {
        Style::new().fg(Palette::CYAN)
    }

    #[must_use]
    pub const fn primary_bold() -> Style {
        Self::primary().add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub const fn warning() -> Style {
        Style::new().fg(Palette::AMBER)
    }

    #[must_use]
    pub const fn error() -> Style {
        Style::new().fg(Palette::RED)
    }

    #[must_use]
    pub const fn muted() -> Style {
        Style::new().fg(Palette::GRAY)
    }

    #[must_use]
    pub const fn border() -> Style {
        Style::new().fg(Palette::DARK_GRAY)
    }

    #[must_use]
    pub const fn white() -> Style {
        Style::new().fg(Palette::WHITE)
    }

    #[must_use]
    pub const fn off_white() -> Style {
        Style::new().fg(Palette::OFF_WHITE)
    }

    /// "You" heading above each prompt.
    #[must_use]
    pub const fn user_label() -> Style {
        Style::new().fg(Palette::WHITE).add_modifier(Modifier::BOLD)
    }

    /// "ChatGPT" heading above each reply.
    #[must_use]
    pub const fn assistant_label() -> Style {
        Style::new().fg(Palette::TEAL).add_modifier(Modifier::BOLD)
    }
}
