//! Reconciliation Controller
//!
//! The state machine that owns the ticket identity and the UI belief,
//! interprets each status snapshot, and self-heals when the server has
//! forgotten the ticket.
//!
//! All state sits behind `Cell`/`RefCell` and every method takes `&self`:
//! the browser scheduler can fire a tick while a slow response is still
//! in flight, so overlapping tick futures must be expressible. Borrows
//! are never held across an await.

use std::cell::{Cell, RefCell};

use crate::client::QueueClient;
use crate::identity::{Identity, IdentityStore};
use crate::status::{QueuePhase, StatusError, StatusSnapshot};
use crate::view::{Destination, GateView, UiState};

/// Lifecycle of the controller itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before `start()`.
    Uninitialized,
    /// No identity; a join attempt is in flight or has failed. A failed
    /// join leaves the machine idle until the next page load — no retry
    /// loop on this path.
    Joining,
    /// Holding an identity and reconciling on every tick.
    Polling,
    /// Done. Late in-flight results are discarded.
    Terminal(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Admitted,
    Expired,
}

/// The gate controller. Generic over its three seams so the browser
/// wires in DOM/localStorage/fetch and tests wire in fakes.
pub struct GateController<C, S, V> {
    client: C,
    store: S,
    view: V,
    phase: Cell<Phase>,
    identity: RefCell<Option<Identity>>,
    ui: RefCell<UiState>,
    /// Reentrancy flag: at most one concurrent rejoin, however many
    /// overlapping ticks observe a 404.
    rejoining: Cell<bool>,
}

impl<C, S, V> GateController<C, S, V>
where
    C: QueueClient,
    S: IdentityStore,
    V: GateView,
{
    pub fn new(client: C, store: S, view: V) -> Self {
        Self {
            client,
            store,
            view,
            phase: Cell::new(Phase::Uninitialized),
            identity: RefCell::new(None),
            ui: RefCell::new(UiState::default()),
            rejoining: Cell::new(false),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase.get(), Phase::Terminal(_))
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    /// Current UI belief, mostly for inspection in tests.
    pub fn ui_state(&self) -> UiState {
        *self.ui.borrow()
    }

    /// Reuse a persisted identity or join the queue for a fresh one.
    pub async fn start(&self) {
        match self.store.load() {
            Some(identity) => {
                log::debug!("reusing persisted ticket {}", identity);
                *self.identity.borrow_mut() = Some(identity);
                self.phase.set(Phase::Polling);
            }
            None => {
                self.phase.set(Phase::Joining);
                self.join_queue().await;
            }
        }
    }

    /// One scheduler tick: poll status for the current identity and
    /// reconcile the result. A no-op unless the machine is polling.
    pub async fn tick(&self) {
        if self.phase.get() != Phase::Polling {
            return;
        }
        let Some(identity) = self.identity.borrow().clone() else {
            return;
        };

        let result = self.client.status(&identity).await;

        // The round trip may have outlived a terminal transition or a
        // rejoin; a result for a superseded state is discarded, not
        // applied unconditionally.
        if self.phase.get() != Phase::Polling {
            return;
        }

        match result {
            Ok(snapshot) => {
                if self.identity.borrow().as_ref() != Some(&identity) {
                    log::debug!("discarding status for superseded ticket {}", identity);
                    return;
                }
                self.reconcile(&snapshot);
            }
            Err(StatusError::NotFound) => self.rejoin(&identity).await,
            Err(StatusError::Transport(msg)) => {
                log::debug!("status poll failed, retrying next tick: {}", msg);
            }
            Err(StatusError::Malformed(msg)) => {
                log::warn!("ignoring malformed status payload: {}", msg);
            }
        }
    }

    /// The admitted-visitor business action, wired to the page's buy
    /// button. Leaves the ticket intact on failure so a retry can work.
    pub async fn checkout(&self) {
        let Some(identity) = self.identity.borrow().clone() else {
            log::warn!("checkout requested without a ticket");
            return;
        };
        match self.client.checkout(&identity).await {
            Ok(()) => {
                self.store.clear();
                *self.identity.borrow_mut() = None;
                self.phase.set(Phase::Terminal(Outcome::Admitted));
                self.view.navigate(Destination::Success);
            }
            Err(err) => {
                log::warn!("checkout failed: {}", err);
                self.view.checkout_failed();
            }
        }
    }

    /// Fold one authoritative snapshot into the UI belief and render it.
    fn reconcile(&self, snapshot: &StatusSnapshot) {
        match snapshot.state {
            QueuePhase::Queued => {
                let Some(position) = snapshot.position else {
                    log::warn!("queued status without a position, ignoring");
                    return;
                };
                let mut ui = self.ui.borrow_mut();
                ui.show_queue(position);
                self.view.apply(&ui);
            }
            QueuePhase::Active => {
                let mut ui = self.ui.borrow_mut();
                ui.show_countdown(snapshot.time_remaining);
                self.view.apply(&ui);
            }
            QueuePhase::Admitted => {
                let mut ui = self.ui.borrow_mut();
                ui.clear();
                self.view.apply(&ui);
                drop(ui);
                self.phase.set(Phase::Terminal(Outcome::Admitted));
                log::info!("admitted, gate removed");
            }
            QueuePhase::Expired => {
                self.store.clear();
                *self.identity.borrow_mut() = None;
                self.phase.set(Phase::Terminal(Outcome::Expired));
                let mut ui = self.ui.borrow_mut();
                ui.clear();
                self.view.apply(&ui);
                drop(ui);
                log::info!("session expired, leaving page");
                self.view.navigate(Destination::Timeout);
            }
            QueuePhase::Unknown => {
                log::warn!("unrecognized status value, ignoring");
            }
        }
    }

    /// Session reset: the server forgot the ticket `stale`. Drop it and
    /// acquire a fresh one. The `rejoining` flag makes overlapping 404s
    /// collapse into a single join call; the held identity stays in
    /// place until the replacement arrives so that in-flight polls keep
    /// hitting the guard instead of racing a second rejoin.
    async fn rejoin(&self, stale: &Identity) {
        if self.rejoining.replace(true) {
            return;
        }
        if self.identity.borrow().as_ref() != Some(stale) {
            // A finished rejoin already replaced this ticket.
            self.rejoining.set(false);
            return;
        }
        log::info!("ticket no longer recognized, rejoining the queue");
        self.store.clear();
        if !self.join_queue().await {
            *self.identity.borrow_mut() = None;
        }
        self.rejoining.set(false);
    }

    /// Acquire and persist a fresh identity. On success the machine
    /// polls; on failure it stays idle (no identity, ticks no-op) until
    /// the next external trigger.
    async fn join_queue(&self) -> bool {
        match self.client.join().await {
            Ok(identity) => {
                self.store.save(&identity);
                log::debug!("joined queue as {}", identity);
                *self.identity.borrow_mut() = Some(identity);
                self.phase.set(Phase::Polling);
                true
            }
            Err(err) => {
                log::warn!("could not join the queue: {}", err);
                false
            }
        }
    }
}
