//! Resource groups of the async client.
//!
//! Each group borrows the client's transport and exposes one area of the API:
//! - [`Workflows`] - catalog, runs, listen streams, execution trees
//! - [`Chats`] - chat sessions, history, chat listen streams
//! - [`Events`] - webhook events
//! - [`Memory`] - agent context memory
//! - [`Secrets`] - workflow secrets and end-user secret links
//! - [`Llm`] - chat completions
//! - [`Mcp`] - MCP catalog, connections and connection links
//! - [`Billing`] - balance, transactions, activity

mod billing;
mod chats;
mod events;
mod llm;
mod mcp;
mod memory;
mod secrets;
mod workflows;

pub use billing::Billing;
pub use chats::Chats;
pub use events::Events;
pub use llm::Llm;
pub use mcp::Mcp;
pub use memory::Memory;
pub use secrets::Secrets;
pub use workflows::Workflows;
