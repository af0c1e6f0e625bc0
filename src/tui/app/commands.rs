pub const HELP_TEXT: &str = r"Available commands:
/help  - Show this help message
/clear - Clear the conversation
/exit  - Exit the application

Enter sends, Shift+Enter adds a line, PgUp/PgDn scroll.";

pub const SLASH_COMMANDS: &[&str] = &["/help", "/clear", "/exit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Clear,
    Exit,
    Unknown(String),
}

impl SlashCommand {
    pub fn parse(input: &str) -> Self {
        let cmd = input.split_whitespace().next().unwrap_or("");
        match cmd {
            "/help" => Self::Help,
            "/clear" => Self::Clear,
            "/exit" | "/quit" => Self::Exit,
            _ => Self::Unknown(cmd.to_string()),
        }
    }
}
