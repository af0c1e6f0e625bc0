pub mod chat;
pub mod input;

pub use chat::{ChatMessage, ChatWidget, MessageLevel, ScrollState};
pub use input::{InputAction, InputWidget};
