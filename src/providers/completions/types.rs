use serde::{Deserialize, Serialize};

use crate::core::types::ContextMessage;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
    pub messages: &'a [ContextMessage],
}

/// One `data:` payload. Every level is optional so that a chunk with an
/// unexpected shape still deserializes and is rejected by classification.
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}
