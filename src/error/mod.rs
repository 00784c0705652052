//! Error handling for the Splox SDK.
//!
//! - **`SploxError`**: the single error type returned by every operation
//! - **`StreamError`**: failures while consuming an event stream
//! - **`ErrorCategory`**: coarse classification for retry decisions
//! - **`from_status`**: pure mapping from an HTTP response to an error
//!
//! # Example
//!
//! ```ignore
//! use splox::error::{SploxError, SploxResult};
//!
//! match client.workflows().get("wf-123").await {
//!     Ok(full) => println!("{}", full.workflow_version.name),
//!     Err(SploxError::NotFound { .. }) => println!("no such workflow"),
//!     Err(err) if err.is_retryable() => {
//!         eprintln!("transient: {err} ({})", err.category().recovery_hint());
//!     }
//!     Err(err) => return Err(err),
//! }
//! ```
//!
//! # Status mapping
//!
//! | Status | Variant |
//! |--------|---------|
//! | 401, 403 | `Auth` |
//! | 404 | `NotFound` |
//! | 429 | `RateLimit` (with `Retry-After`) |
//! | 400, 422 | `Validation` |
//! | other non-2xx | `Api` |

mod category;
mod result;
mod splox_error;
mod status;
mod stream;

pub use category::ErrorCategory;
pub use result::SploxResult;
pub use splox_error::SploxError;
pub use status::from_status;
pub use stream::StreamError;
