//! Incremental reader for the assistant's `text/event-stream` replies.

use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use std::ops::ControlFlow;

const EVENT_DELIMITER: &str = "\n\n";
const DATA_PREFIX: &str = "data:";

/// Payload of one `data:` block. Any combination of fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StreamEvent {
    #[serde(default)]
    pub delta: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Turns raw body chunks into parsed events. Holds back incomplete UTF-8
/// sequences and the trailing partial block until more bytes arrive.
#[derive(Debug, Default)]
pub struct SseDecoder {
    undecoded: Vec<u8>,
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.undecoded.extend_from_slice(chunk);
        self.decode_available();

        let mut events = Vec::new();
        while let Some(end) = self.buffer.find(EVENT_DELIMITER) {
            let block: String = self.buffer.drain(..end + EVENT_DELIMITER.len()).collect();
            if let Some(event) = parse_block(&block[..end]) {
                events.push(event);
            }
        }
        events
    }

    /// Discards whatever is left once the body ends.
    pub fn finish(self) {
        let leftover = self.buffer.trim();
        if !leftover.is_empty() || !self.undecoded.is_empty() {
            tracing::debug!(
                bytes = leftover.len() + self.undecoded.len(),
                "dropping incomplete event at end of stream"
            );
        }
    }

    fn decode_available(&mut self) {
        loop {
            match std::str::from_utf8(&self.undecoded) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    self.undecoded.clear();
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    // Prefix is known-valid UTF-8.
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.undecoded[..valid]));
                    match err.error_len() {
                        Some(invalid) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            self.undecoded.drain(..valid + invalid);
                        }
                        None => {
                            self.undecoded.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }
}

fn parse_block(block: &str) -> Option<StreamEvent> {
    let payload = block
        .lines()
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }

    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::debug!(error = %err, "skipping malformed stream event");
            None
        }
    }
}

/// Feeds every chunk of `body` through a decoder and hands each event to
/// `on_event` until the body ends or `on_event` breaks.
pub async fn pump_events<S, B, E, F>(body: S, mut on_event: F) -> Result<(), E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    F: FnMut(StreamEvent) -> ControlFlow<()>,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for event in decoder.push(chunk.as_ref()) {
            if on_event(event).is_break() {
                tracing::debug!("event consumer went away, abandoning stream");
                return Ok(());
            }
        }
    }

    decoder.finish();
    Ok(())
}
