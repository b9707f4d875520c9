//! Gatekeeper Core
//!
//! Platform-free half of the browser gate: ticket identity, status
//! snapshots, UI state and the reconciliation controller that folds
//! authoritative server status into rendered UI. Browser concerns
//! (DOM, localStorage, fetch, timers) live behind the traits defined
//! here and are implemented by the `gatekeeper-web` crate.

mod client;
mod controller;
mod identity;
mod status;
mod view;


pub use client::{GateError, QueueClient};
pub use controller::{GateController, Outcome, Phase};
pub use identity::{Identity, IdentityStore};
pub use status::{QueuePhase, StatusError, StatusSnapshot};
pub use view::{Destination, GateView, UiState};
