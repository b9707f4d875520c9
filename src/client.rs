//! HTTP Queue Client
//!
//! `QueueClient` over the admission-queue service's JSON endpoints,
//! using the browser's fetch via gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;

use gatekeeper_core::{GateError, Identity, QueueClient, StatusError, StatusSnapshot};

pub struct HttpQueueClient {
    base_url: String,
}

impl HttpQueueClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

/// Wire shape of a `POST /join` response. The backend may also report
/// an immediate `status`/`message`; only the ticket matters here, the
/// first poll fetches authoritative state anyway.
#[derive(Debug, Deserialize)]
struct JoinResponse {
    user_id: String,
}

#[async_trait(?Send)]
impl QueueClient for HttpQueueClient {
    async fn join(&self) -> Result<Identity, GateError> {
        let response = Request::post(&format!("{}/join", self.base_url))
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(GateError::Transport(format!(
                "join returned HTTP {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;
        let join: JoinResponse =
            serde_json::from_str(&body).map_err(|e| GateError::Protocol(e.to_string()))?;
        Ok(Identity::new(join.user_id))
    }

    async fn status(&self, identity: &Identity) -> Result<StatusSnapshot, StatusError> {
        let response = Request::get(&format!("{}/status/{}", self.base_url, identity))
            .send()
            .await
            .map_err(|e| StatusError::Transport(e.to_string()))?;
        match response.status() {
            404 => Err(StatusError::NotFound),
            200 => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| StatusError::Transport(e.to_string()))?;
                StatusSnapshot::from_json(&body)
            }
            other => Err(StatusError::Transport(format!(
                "status returned HTTP {}",
                other
            ))),
        }
    }

    async fn checkout(&self, identity: &Identity) -> Result<(), GateError> {
        let response = Request::post(&format!("{}/checkout/{}", self.base_url, identity))
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(GateError::Transport(format!(
                "checkout returned HTTP {}",
                response.status()
            )))
        }
    }
}
