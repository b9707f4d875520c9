//! DOM Gate View
//!
//! Owns the two gate surfaces on the host page: the full-page waiting
//! room curtain and the countdown badge. `apply` is idempotent — a
//! surface already in the desired visibility state is never torn down
//! and recreated, only its displayed numbers change.

use gatekeeper_core::{Destination, GateView, UiState};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

const OVERLAY_ID: &str = "gk-overlay";
const POSITION_ID: &str = "gk-position";
const TIMER_ID: &str = "gk-timer";
const COUNTDOWN_ID: &str = "gk-countdown";

/// Countdown badge, shown while the visitor is inside the active window.
const TIMER_HTML: &str = r#"
<div id="gk-timer" style="position:fixed; bottom:20px; right:20px; background:#e74c3c; color:white; padding:15px; border-radius:50px; font-family:sans-serif; font-weight:bold; font-size:20px; box-shadow:0 4px 10px rgba(0,0,0,0.3); z-index:10000; display:none;">
    &#9201;&#65039; <span id="gk-countdown">--</span>s
</div>
"#;

/// Waiting room curtain, shown while the visitor is queued.
const OVERLAY_HTML: &str = r#"
<div id="gk-overlay" style="position:fixed; top:0; left:0; width:100%; height:100%; background:white; z-index:9999; display:flex; flex-direction:column; align-items:center; justify-content:center; font-family:sans-serif;">
    <h1 style="color:#e74c3c; font-size: 2rem;">&#128678; Traffic Control</h1>
    <p style="color:#333; margin-top: 10px;">We are experiencing high demand.</p>
    <div style="background:#f0f0f0; padding: 20px; border-radius: 10px; margin: 20px 0; text-align: center;">
        <div style="font-size:14px; color:#666;">Your Position</div>
        <div style="font-size:40px; font-weight:bold; color:#2c3e50;" id="gk-position">--</div>
    </div>
    <p style="font-size: 12px; color: #999;">Please do not refresh the page.</p>
</div>
"#;

pub struct DomGateView {
    timeout_url: String,
    success_url: String,
}

impl DomGateView {
    pub fn new(timeout_url: impl Into<String>, success_url: impl Into<String>) -> Self {
        Self {
            timeout_url: timeout_url.into(),
            success_url: success_url.into(),
        }
    }

    fn apply_countdown(&self, document: &Document, ui: &UiState) {
        if ui.countdown_visible {
            if document.get_element_by_id(TIMER_ID).is_none() {
                mount(document, TIMER_HTML);
            }
            if let Some(timer) = document.get_element_by_id(TIMER_ID) {
                set_display(&timer, "block");
            }
            if let Some(value) = ui.countdown_value {
                if let Some(counter) = document.get_element_by_id(COUNTDOWN_ID) {
                    set_text(&counter, &value.to_string());
                }
            }
        } else if let Some(timer) = document.get_element_by_id(TIMER_ID) {
            set_display(&timer, "none");
        }
    }

    fn apply_overlay(&self, document: &Document, ui: &UiState) {
        if ui.overlay_visible {
            if document.get_element_by_id(OVERLAY_ID).is_none() {
                mount(document, OVERLAY_HTML);
                set_page_scroll(document, "hidden");
            }
            if let Some(position) = document.get_element_by_id(POSITION_ID) {
                set_text(&position, &ui.overlay_position.to_string());
            }
        } else if let Some(overlay) = document.get_element_by_id(OVERLAY_ID) {
            overlay.remove();
            set_page_scroll(document, "auto");
        }
    }
}

impl GateView for DomGateView {
    fn apply(&self, ui: &UiState) {
        let Some(document) = document() else {
            return;
        };
        // Countdown first, curtain last: when both are requested the
        // curtain wins, matching the order snapshots are evaluated in.
        self.apply_countdown(&document, ui);
        self.apply_overlay(&document, ui);
    }

    fn navigate(&self, destination: Destination) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let url = match destination {
            Destination::Timeout => {
                let _ = window.alert_with_message("Session expired! You took too long.");
                &self.timeout_url
            }
            Destination::Success => &self.success_url,
        };
        if window.location().replace(url).is_err() {
            log::error!("navigation to {} failed", url);
        }
    }

    fn checkout_failed(&self) {
        if let Some(window) = web_sys::window() {
            let _ =
                window.alert_with_message("Checkout failed. Check your connection and try again.");
        }
    }
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn mount(document: &Document, html: &str) {
    let Some(body) = document.body() else {
        return;
    };
    if let Err(err) = body.insert_adjacent_html("beforeend", html) {
        log::error!("could not mount gate surface: {:?}", err);
    }
}

fn set_display(element: &Element, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("display", value);
    }
}

fn set_text(element: &Element, text: &str) {
    if element.text_content().as_deref() != Some(text) {
        element.set_text_content(Some(text));
    }
}

fn set_page_scroll(document: &Document, value: &str) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("overflow", value);
    }
}
