//! Event stream adapters over a transport body.
//!
//! [`EventStream`] is the async form (a `futures::Stream` over a
//! [`ByteStream`]); [`EventIter`] is the blocking form (an `Iterator` over any
//! `std::io::Read`). Both share [`SseDecoder`], so they yield the same events
//! for the same bytes.

use std::io::{ErrorKind, Read};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tracing::debug;

use super::decoder::SseDecoder;
use super::events::StreamEvent;
use crate::error::{SploxError, SploxResult, StreamError};
use crate::traits::ByteStream;

/// Read buffer size for the blocking iterator.
const READ_CHUNK: usize = 8 * 1024;

/// Live event stream from a listen endpoint.
///
/// Yields events in receive order until the server closes the connection,
/// the stream is dropped, or an error is yielded (after which it ends).
/// Dropping the stream closes the underlying connection.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
///
/// let mut events = client.chats().listen("chat-1").await?;
/// while let Some(event) = events.next().await {
///     match event? {
///         StreamEvent::TextDelta { delta } => print!("{delta}"),
///         StreamEvent::Done { .. } => break,
///         _ => {}
///     }
/// }
/// ```
pub struct EventStream {
    body: Option<ByteStream>,
    decoder: SseDecoder,
    pending_error: Option<SploxError>,
}

impl EventStream {
    pub fn new(body: ByteStream) -> Self {
        Self {
            body: Some(body),
            decoder: SseDecoder::new(),
            pending_error: None,
        }
    }

    /// Close the connection now. Calling it again, or after the server has
    /// already closed, does nothing.
    pub fn close(&mut self) {
        self.body = None;
    }

    /// True while the transport body is still held.
    pub fn is_open(&self) -> bool {
        self.body.is_some()
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("open", &self.body.is_some())
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl Stream for EventStream {
    type Item = SploxResult<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(item) = this.decoder.next_item() {
                if item.is_err() {
                    this.close();
                }
                return Poll::Ready(Some(item.map_err(SploxError::from)));
            }
            if let Some(err) = this.pending_error.take() {
                return Poll::Ready(Some(Err(err)));
            }
            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };
            match body.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => this.decoder.feed(&chunk),
                Poll::Ready(Some(Err(err))) => {
                    debug!(error = %err, "event stream transport failed");
                    this.body = None;
                    this.pending_error = Some(
                        StreamError::ConnectionLost {
                            message: err.to_string(),
                        }
                        .into(),
                    );
                }
                Poll::Ready(None) => {
                    debug!("event stream closed by server");
                    this.body = None;
                    this.decoder.finish();
                }
            }
        }
    }
}

/// Blocking event iterator over any reader.
///
/// Same semantics as [`EventStream`]: receive order, one terminal error at
/// most, and dropping it drops (closes) the reader.
///
/// # Example
///
/// ```ignore
/// let body: &[u8] = b"data: {\"type\":\"text_delta\",\"delta\":\"hi\"}\n\n";
/// for event in EventIter::new(body) {
///     println!("{:?}", event?);
/// }
/// ```
pub struct EventIter<R> {
    reader: Option<R>,
    decoder: SseDecoder,
    pending_error: Option<SploxError>,
    buf: Box<[u8]>,
}

impl<R: Read> EventIter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            decoder: SseDecoder::new(),
            pending_error: None,
            buf: vec![0u8; READ_CHUNK].into_boxed_slice(),
        }
    }

    /// Close the reader now. Idempotent.
    pub fn close(&mut self) {
        self.reader = None;
    }
}

impl<R> std::fmt::Debug for EventIter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventIter")
            .field("open", &self.reader.is_some())
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl<R: Read> Iterator for EventIter<R> {
    type Item = SploxResult<StreamEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.decoder.next_item() {
                if item.is_err() {
                    self.close();
                }
                return Some(item.map_err(SploxError::from));
            }
            if let Some(err) = self.pending_error.take() {
                return Some(Err(err));
            }
            let reader = self.reader.as_mut()?;
            match reader.read(&mut self.buf) {
                Ok(0) => {
                    debug!("event stream closed by server");
                    self.reader = None;
                    self.decoder.finish();
                }
                Ok(n) => self.decoder.feed(&self.buf[..n]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!(error = %err, "event stream transport failed");
                    self.reader = None;
                    self.pending_error = Some(
                        StreamError::ConnectionLost {
                            message: err.to_string(),
                        }
                        .into(),
                    );
                }
            }
        }
    }
}
