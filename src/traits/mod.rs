//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - buffered requests and streaming `GET`s

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, HttpMethod, Response};
