//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with canned responses and stream accounting

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
