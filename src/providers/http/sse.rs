use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;

use crate::providers::error::ProviderError;

const DATA_PREFIX: &str = "data:";

/// One blank-line-delimited event, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    raw: String,
}

impl SseEvent {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Payload after the literal `data:` prefix, or `None` when the event
    /// does not start with it (comments, keep-alives, `event:` lines).
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.raw
            .strip_prefix(DATA_PREFIX)
            .map(str::trim_start)
    }
}

/// Splits a byte stream into events on blank lines.
///
/// Bytes are held until a full event has arrived, so the output does not
/// depend on how the transport chunked the body, and a UTF-8 sequence split
/// across two reads is decoded whole.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
}

impl SseParser {
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn process_chunk(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        // Pending bytes were already searched; only a boundary straddling the
        // old tail (at most three bytes of it) can start before the new data.
        let mut scan_from = self.buffer.len().saturating_sub(3);
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut consumed = 0;

        while let Some((event_end, next_start)) =
            find_boundary(&self.buffer[consumed..], scan_from)
        {
            let raw = &self.buffer[consumed..consumed + event_end];
            if let Some(event) = decode_event(raw) {
                events.push(event);
            }
            consumed += next_start;
            scan_from = 0;
        }

        self.buffer.drain(..consumed);
        events
    }

    /// Emits whatever is left once the body has closed. Servers normally end
    /// on a blank line, in which case this returns `None`.
    pub fn flush(&mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        decode_event(&rest)
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Adapts a response byte stream into a finite stream of events. A
    /// transport error is yielded once and ends the stream.
    pub fn parse_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<SseEvent, ProviderError>>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: Display,
    {
        let state = (byte_stream, Self::new(), VecDeque::new(), false);

        stream::unfold(state, |(mut bytes, mut parser, mut ready, mut closed)| async move {
            loop {
                if let Some(event) = ready.pop_front() {
                    return Some((Ok(event), (bytes, parser, ready, closed)));
                }
                if closed {
                    return None;
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => ready.extend(parser.process_chunk(&chunk)),
                    Some(Err(e)) => {
                        closed = true;
                        let err = ProviderError::StreamError(e.to_string());
                        return Some((Err(err), (bytes, parser, ready, closed)));
                    }
                    None => {
                        closed = true;
                        ready.extend(parser.flush());
                    }
                }
            }
        })
    }
}

/// Locates the first blank line whose leading newline is at or after
/// `search_from`. Returns the end of the event text and the offset where the
/// next event starts. Accepts `\n\n` and `\r\n\r\n`.
fn find_boundary(buf: &[u8], mut search_from: usize) -> Option<(usize, usize)> {
    while let Some(pos) = buf[search_from..].iter().position(|&b| b == b'\n') {
        let newline = search_from + pos;
        let mut next = newline + 1;
        if buf.get(next) == Some(&b'\r') {
            next += 1;
        }
        if buf.get(next) == Some(&b'\n') {
            let event_end = if newline > 0 && buf[newline - 1] == b'\r' {
                newline - 1
            } else {
                newline
            };
            return Some((event_end, next + 1));
        }
        search_from = newline + 1;
    }

    None
}

fn decode_event(raw: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_matches(|c| c == '\r' || c == '\n');
    if text.is_empty() {
        None
    } else {
        Some(SseEvent::new(text))
    }
}
