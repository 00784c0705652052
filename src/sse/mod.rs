//! SSE (Server-Sent Events) stream parser
//!
//! Parses the listen endpoints' SSE format:
//! - `event: <type>` - optional explicit event type
//! - `data: <json>` - data payload line (`data: keepalive` is a heartbeat)
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent, SseLine, SseParseError)
//! - `payloads` - Internal payload deserialization structs
//! - `parser` - Line classification and frame accumulation (SseParser)
//! - `decoder` - Byte chunks to events, malformed-frame policy (SseDecoder)
//! - `stream` - Async `EventStream` and blocking `EventIter`

mod decoder;
mod events;
mod parser;
mod payloads;
mod stream;

// Re-export public types
pub use decoder::{SseDecoder, MAX_CONSECUTIVE_MALFORMED};
pub use events::{SseLine, SseParseError, StreamEvent};
pub use parser::{parse_sse_line, parse_stream_event, SseParser};
pub use stream::{EventIter, EventStream};
