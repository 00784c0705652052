//! Maps non-2xx HTTP responses onto [`SploxError`].

use std::time::Duration;

use super::splox_error::SploxError;
use crate::traits::Headers;

/// Classify a failed response.
///
/// The message is the JSON body's `error` (or `message`) string when there is
/// one, else the raw body, else a fixed message for the status.
pub fn from_status(status: u16, headers: &Headers, body: &str) -> SploxError {
    let message = extract_message(body).unwrap_or_else(|| default_message(status).to_string());
    let body = body.to_string();

    match status {
        401 | 403 => SploxError::Auth {
            status,
            message,
            body,
        },
        404 => SploxError::NotFound { message, body },
        429 => SploxError::RateLimit {
            message,
            retry_after: retry_after(headers),
            body,
        },
        400 | 422 => SploxError::Validation {
            status,
            message,
            body,
        },
        _ => SploxError::Api {
            status,
            message,
            body,
        },
    }
}

fn extract_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message"] {
            if let Some(serde_json::Value::String(s)) = map.get(key) {
                if !s.is_empty() {
                    return Some(s.clone());
                }
            }
        }
    }
    Some(body.to_string())
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Authentication failed",
        403 => "Forbidden",
        404 => "Resource not found",
        410 => "Resource expired",
        422 => "Validation failed",
        429 => "Rate limit exceeded",
        500..=599 => "Server error",
        _ => "Request failed",
    }
}

/// `Retry-After` in (possibly fractional) seconds. HTTP-date values are
/// ignored, as are negative, non-finite or out-of-range numbers.
fn retry_after(headers: &Headers) -> Option<Duration> {
    let value = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
        .map(|(_, value)| value)?;
    let secs = value.trim().parse::<f64>().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}
