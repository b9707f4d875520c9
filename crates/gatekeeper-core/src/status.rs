//! Status Snapshots
//!
//! The server's authoritative view of one ticket at one poll, decoded
//! from the `/status/{user_id}` JSON payload. Each poll produces a
//! fresh, immutable snapshot; the controller folds it into UI state.

use std::fmt;

use serde::Deserialize;

/// Server-reported lifecycle phase of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueuePhase {
    /// Waiting in line; `position` carries the place in the queue.
    Queued,
    /// Inside the time-boxed shopping window; `time_remaining` counts down.
    Active,
    /// Past the gate, no UI should remain.
    Admitted,
    /// The time box ran out server-side.
    Expired,
    /// Any wire value this client does not recognize (e.g. the backend's
    /// post-checkout "completed" tombstone). Ignored for robustness.
    Unknown,
}

/// One immutable poll result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: QueuePhase,
    /// Meaningful only when `state == Queued`.
    pub position: Option<u32>,
    /// Seconds left in the active window; may be absent even when active.
    pub time_remaining: Option<u32>,
}

/// Wire shape of a 200 response from `/status/{user_id}`.
#[derive(Debug, Deserialize)]
struct RawStatus {
    status: String,
    #[serde(default)]
    position: Option<u32>,
    #[serde(default)]
    time_remaining: Option<u32>,
}

impl StatusSnapshot {
    /// Decodes a status body. An undecodable body is `Malformed`; an
    /// unrecognized `status` string decodes fine as [`QueuePhase::Unknown`]
    /// so that backend evolution never crashes the controller.
    pub fn from_json(body: &str) -> Result<Self, StatusError> {
        let raw: RawStatus =
            serde_json::from_str(body).map_err(|e| StatusError::Malformed(e.to_string()))?;
        Ok(Self::from(raw))
    }
}

impl From<RawStatus> for StatusSnapshot {
    fn from(raw: RawStatus) -> Self {
        let state = match raw.status.as_str() {
            "queued" => QueuePhase::Queued,
            "active" => QueuePhase::Active,
            "admitted" => QueuePhase::Admitted,
            "expired" => QueuePhase::Expired,
            _ => QueuePhase::Unknown,
        };
        Self {
            state,
            position: raw.position,
            time_remaining: raw.time_remaining,
        }
    }
}

/// Failure classification for one status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// HTTP 404: the server no longer recognizes the ticket. A session
    /// reset signal, distinct from a `status: "expired"` payload.
    NotFound,
    /// Network / DNS / timeout. Recovered by the next scheduled tick.
    Transport(String),
    /// Undecodable response body. Ignored, log only.
    Malformed(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::NotFound => write!(f, "ticket not recognized by server"),
            StatusError::Transport(msg) => write!(f, "transport error: {}", msg),
            StatusError::Malformed(msg) => write!(f, "malformed status payload: {}", msg),
        }
    }
}

impl std::error::Error for StatusError {}
