//! UI State and the Renderer Seam
//!
//! `UiState` is the controller's belief about what should be on screen,
//! and the only input the renderer gets. The folding helpers here carry
//! the anti-regression rule for the countdown.

/// Desired on-screen state for the two gate surfaces.
///
/// Invariant: `countdown_value` never increases while `countdown_visible`
/// stays true, no matter how stale or out-of-order the snapshots that
/// produced it were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    /// Full-page blocking curtain, shown while queued.
    pub overlay_visible: bool,
    pub overlay_position: u32,
    /// Non-blocking timer badge, shown while in the active window.
    pub countdown_visible: bool,
    pub countdown_value: Option<u32>,
}

impl UiState {
    /// Fold in a `queued` snapshot: curtain up at `position`, timer hidden.
    pub fn show_queue(&mut self, position: u32) {
        self.countdown_visible = false;
        self.overlay_visible = true;
        self.overlay_position = position;
    }

    /// Fold in an `active` snapshot: curtain down, timer up.
    ///
    /// The displayed value only ever moves down. A poll that races or
    /// returns a stale cached value cannot make the timer jump upward,
    /// and a missing `time_remaining` retains the last known value.
    pub fn show_countdown(&mut self, time_remaining: Option<u32>) {
        self.overlay_visible = false;
        self.countdown_visible = true;
        if let Some(remaining) = time_remaining {
            match self.countdown_value {
                Some(current) if remaining >= current => {}
                _ => self.countdown_value = Some(remaining),
            }
        }
    }

    /// Remove every gate surface (admitted or terminal).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Where the gate sends the visitor on a terminal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The session expired before checkout.
    Timeout,
    /// Checkout went through.
    Success,
}

/// Rendering seam. The DOM implementation must be idempotent: applying
/// an unchanged `UiState` must not destroy and recreate surfaces, only
/// toggle visibility and update displayed numbers.
pub trait GateView {
    fn apply(&self, ui: &UiState);

    /// Leave the gated page for good.
    fn navigate(&self, destination: Destination);

    /// Checkout failed; show an actionable retry prompt. The ticket is
    /// left intact so the visitor can try again.
    fn checkout_failed(&self);
}
