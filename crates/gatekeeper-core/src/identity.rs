//! Ticket Identity
//!
//! The opaque per-visitor token that identifies a queue position, plus
//! the persistence seam for it. The web crate backs the store with
//! `localStorage`; tests back it with memory.

use std::fmt;

/// Opaque ticket token issued by the queue service.
///
/// At most one is held client-side at a time; absence means "not yet
/// joined". Owned exclusively by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(String);

impl Identity {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable storage for the single ticket identity.
///
/// Must survive a full page reload; a later controller instance on the
/// same page reuses the same identity. No expiry logic here — expiry is
/// decided by the server and enforced by the controller.
pub trait IdentityStore {
    fn load(&self) -> Option<Identity>;
    fn save(&self, identity: &Identity);
    fn clear(&self);
}
