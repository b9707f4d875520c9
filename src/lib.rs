//! Gatekeeper Browser Gate
//!
//! Embeddable WASM entry point: wires the reconciliation controller
//! from gatekeeper-core to the page (DOM surfaces, localStorage, fetch)
//! and drives it on a fixed-interval poll with an immediate first tick.

mod client;
mod config;
mod dom;
mod logging;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use gatekeeper_core::GateController;

use crate::client::HttpQueueClient;
use crate::config::GateConfig;
use crate::dom::DomGateView;
use crate::storage::LocalStorageStore;

type WebController = GateController<HttpQueueClient, LocalStorageStore, DomGateView>;

thread_local! {
    /// The single page instance of the gate.
    static CONTROLLER: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
    /// Poll driver; dropping it cancels the interval.
    static POLLER: RefCell<Option<Interval>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();

    let config = GateConfig::from_page();
    let controller = Rc::new(GateController::new(
        HttpQueueClient::new(config.api_url),
        LocalStorageStore::new(config.storage_key),
        DomGateView::new(config.timeout_url, config.success_url),
    ));
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));

    // Immediate first tick so the first paint does not wait out a full
    // interval.
    {
        let controller = controller.clone();
        spawn_local(async move {
            controller.start().await;
            controller.tick().await;
        });
    }

    // Fixed interval, no backoff or jitter; the stateless snapshots
    // tolerate missed and overlapping ticks. Each tick runs as its own
    // task, so a slow response never blocks the next tick.
    let interval = Interval::new(config.poll_interval_ms, move || {
        let controller = controller.clone();
        spawn_local(async move {
            controller.tick().await;
            if controller.is_terminal() {
                // Runs on the microtask queue, outside the interval
                // callback, so the driver can drop itself here.
                POLLER.with(|poller| poller.borrow_mut().take());
            }
        });
    });
    POLLER.with(|poller| *poller.borrow_mut() = Some(interval));
}

/// Page-callable checkout hook for the buy button, the counterpart of
/// the original `window.buyTicket`.
#[wasm_bindgen]
pub async fn buy_ticket() -> Result<(), JsValue> {
    let controller = CONTROLLER.with(|slot| slot.borrow().clone());
    match controller {
        Some(controller) => {
            controller.checkout().await;
            Ok(())
        }
        None => Err(JsValue::from_str("gatekeeper is not initialized")),
    }
}
