//! Queue Service Client Seam
//!
//! The two-and-a-half remote calls the gate makes, abstracted so the
//! controller can be driven by an HTTP client in the browser and by
//! scripted fakes in tests.

use std::fmt;

use async_trait::async_trait;

use crate::identity::Identity;
use crate::status::{StatusError, StatusSnapshot};

/// Errors for the side-effecting calls (`join`, `checkout`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Network / DNS / timeout.
    Transport(String),
    /// The server answered but not with the shape we need
    /// (e.g. a join response without a `user_id`).
    Protocol(String),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Transport(msg) => write!(f, "transport error: {}", msg),
            GateError::Protocol(msg) => write!(f, "protocol error: {}", msg),
        }
    }
}

impl std::error::Error for GateError {}

/// Boundary to the admission-queue service.
///
/// `?Send` because everything runs on the single-threaded browser
/// event loop. No retry built into any call — the controller decides.
#[async_trait(?Send)]
pub trait QueueClient {
    /// `POST /join` — issue a ticket. Persists nothing itself; the
    /// controller stores the returned identity.
    async fn join(&self) -> Result<Identity, GateError>;

    /// `GET /status/{user_id}` — fetch the authoritative snapshot.
    async fn status(&self, identity: &Identity) -> Result<StatusSnapshot, StatusError>;

    /// `POST /checkout/{user_id}` — the admitted-visitor business action.
    async fn checkout(&self, identity: &Identity) -> Result<(), GateError>;
}
