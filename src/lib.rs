//! Splox - Rust client for the Splox workflow and agent-memory API.
//!
//! - [`SploxClient`] - async client; [`blocking::SploxClient`] mirrors it
//! - [`EventStream`] / [`EventIter`] - live workflow and chat events (SSE)
//! - [`connect`] - signed MCP connection tokens and links
//! - [`notify()`] - post JSON to an arbitrary webhook URL
//! - [`SploxError`] - every failure, mapped from HTTP status where applicable
//!
//! ```ignore
//! use futures::StreamExt;
//! use splox::{ClientConfig, RunWorkflowRequest, SploxClient, StreamEvent};
//!
//! let client = SploxClient::new(ClientConfig::from_env())?;
//! let run = client
//!     .workflows()
//!     .run(&RunWorkflowRequest::new("version-id", "chat-id", "start-node-id", "Hi"))
//!     .await?;
//! let mut events = client.workflows().listen(&run.workflow_request_id).await?;
//! while let Some(event) = events.next().await {
//!     let event = event?;
//!     if event.is_terminal_for(&run.workflow_request_id) {
//!         break;
//!     }
//! }
//! ```

pub mod adapters;
mod api;
pub mod blocking;
mod client;
pub mod config;
pub mod connect;
pub mod error;
pub mod models;
mod notify;
pub mod resources;
pub mod sse;
pub mod traits;

pub use client::SploxClient;
pub use config::ClientConfig;
pub use connect::{
    decode_connection_token, generate_connection_link, generate_connection_token,
    generate_connection_token_at, ConnectionClaims,
};
pub use error::{ErrorCategory, SploxError, SploxResult, StreamError};
pub use models::*;
pub use notify::{notify, notify_with, NOTIFY_TIMEOUT};
pub use sse::{EventIter, EventStream, StreamEvent};
