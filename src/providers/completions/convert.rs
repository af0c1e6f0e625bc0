use super::types::StreamChunk;
use crate::providers::http::SseEvent;

/// What a single stream event contributes to the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Increment(String),
    Skip,
}

/// Extracts `choices[0].delta.content`. Anything else (no `data:` prefix,
/// invalid JSON, a different shape, `[DONE]`) is a skip, not an error.
#[must_use]
pub fn classify(event: &SseEvent) -> EventOutcome {
    let Some(data) = event.data() else {
        return EventOutcome::Skip;
    };

    let Ok(chunk) = serde_json::from_str::<StreamChunk>(data) else {
        tracing::trace!(event = %event.raw(), "skipping unparsable event");
        return EventOutcome::Skip;
    };

    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .map_or(EventOutcome::Skip, EventOutcome::Increment)
}
