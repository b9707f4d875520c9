//! Gate Configuration
//!
//! Read once at startup from the optional page global
//! `window.__GATEKEEPER_CONFIG__`; every field has a deployment default
//! so a bare `<script>` include works with no setup.

use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the optional configuration global on `window`.
pub const CONFIG_GLOBAL: &str = "__GATEKEEPER_CONFIG__";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Base URL of the admission-queue service.
    pub api_url: String,
    /// Fixed poll interval. 1s keeps the countdown accurate.
    pub poll_interval_ms: u32,
    /// localStorage key holding the ticket identity.
    pub storage_key: String,
    /// Where an expired session is sent.
    pub timeout_url: String,
    /// Where a completed checkout is sent.
    pub success_url: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_url: "https://trafficontrol.onrender.com".to_string(),
            poll_interval_ms: 1_000,
            storage_key: "gatekeeper_id".to_string(),
            timeout_url: "timeout.html".to_string(),
            success_url: "success.html".to_string(),
        }
    }
}

impl GateConfig {
    /// Load the config from the page global, falling back to defaults
    /// when the global is absent or does not deserialize.
    pub fn from_page() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring invalid {}: {}", CONFIG_GLOBAL, err);
                Self::default()
            }
        }
    }
}
