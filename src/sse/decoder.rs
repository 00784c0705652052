//! Chunk-to-event decoding shared by the async and blocking streams.
//!
//! Bytes arrive in arbitrary chunks. The decoder keeps partial lines (and
//! partial UTF-8 sequences) buffered until their `\n` arrives, so the events
//! produced never depend on where the transport split the body.

use std::collections::VecDeque;

use bytes::BytesMut;
use tracing::warn;

use super::events::StreamEvent;
use super::parser::SseParser;
use crate::error::StreamError;

/// Consecutive undecodable frames tolerated before the stream is failed.
pub const MAX_CONSECUTIVE_MALFORMED: u32 = 3;

/// Incremental SSE decoder.
///
/// Feed raw chunks with [`feed`](Self::feed), signal end of body with
/// [`finish`](Self::finish), and drain results with
/// [`next_item`](Self::next_item). After a [`StreamError`] is queued the
/// decoder ignores further input.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
    /// Prefix of `buffer` already known to hold no `\n`.
    scanned: usize,
    parser: SseParser,
    ready: VecDeque<Result<StreamEvent, StreamError>>,
    consecutive_malformed: u32,
    failed: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and decode every complete line in the buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        if self.failed {
            return;
        }
        self.buffer.extend_from_slice(chunk);

        loop {
            let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') else {
                self.scanned = self.buffer.len();
                return;
            };
            let mut line = self.buffer.split_to(self.scanned + offset + 1);
            self.scanned = 0;
            line.truncate(line.len() - 1);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }
            let line = String::from_utf8_lossy(&line);
            let result = self.parser.feed_line(&line);
            self.handle(result);
            if self.failed {
                return;
            }
        }
    }

    /// The transport ended: treat a trailing unterminated line as complete
    /// and flush the pending frame.
    pub fn finish(&mut self) {
        if self.failed {
            return;
        }
        if !self.buffer.is_empty() {
            self.feed(b"\n");
        }
        if !self.failed {
            let result = self.parser.flush();
            self.handle(result);
        }
    }

    /// Next decoded event or the terminal stream error.
    pub fn next_item(&mut self) -> Option<Result<StreamEvent, StreamError>> {
        self.ready.pop_front()
    }

    /// True once a [`StreamError`] has been produced.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn handle(&mut self, result: Result<Option<StreamEvent>, super::SseParseError>) {
        match result {
            Ok(Some(event)) => {
                self.consecutive_malformed = 0;
                self.ready.push_back(Ok(event));
            }
            Ok(None) => {}
            Err(err) => {
                self.consecutive_malformed += 1;
                warn!(
                    error = %err,
                    consecutive = self.consecutive_malformed,
                    "skipping malformed SSE frame"
                );
                if self.consecutive_malformed >= MAX_CONSECUTIVE_MALFORMED {
                    self.ready.push_back(Err(StreamError::MalformedFrames {
                        count: self.consecutive_malformed,
                        last_error: err.to_string(),
                    }));
                    self.failed = true;
                    self.buffer.clear();
                    self.scanned = 0;
                    self.parser.reset();
                }
            }
        }
    }
}
