use serde::{Deserialize, Serialize};

/// Acknowledgement for `POST /events/{webhook_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventResponse {
    pub ok: bool,
    pub event_id: String,
}
