// src/services/backend.rs
use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    config::{BackendKind, RelayConfig},
    message::{ChatReply, ChatTurn},
};

use super::{hosted::HostedApiAdapter, local::LocalDaemonAdapter};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Missing {0}")]
    MissingCredential(&'static str),

    #[error("failed to reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{reason}: {body}")]
    Decode { reason: String, body: String },
}

/// One model backend. Implementors own their wire shapes; the relay only
/// deals in `ChatTurn` and `ChatReply`.
#[async_trait]
pub trait BackendAdapter: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// Checked by the chat handler before `messages` is inspected, so a
    /// misconfigured relay fails every chat request without touching the
    /// network.
    fn ensure_configured(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn translate_and_invoke(&self, turns: &[ChatTurn]) -> Result<ChatReply, BackendError>;
}

pub fn build_client(config: &RelayConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
}

pub fn build_adapter(config: &RelayConfig, client: reqwest::Client) -> Arc<dyn BackendAdapter> {
    match config.backend {
        BackendKind::Hosted => Arc::new(HostedApiAdapter::new(client, config.hosted.clone())),
        BackendKind::LocalDaemon => Arc::new(LocalDaemonAdapter::new(client, config.local.clone())),
    }
}

/// POST a JSON payload and hand back the parsed JSON body. Non-2xx and
/// non-JSON answers are logged with the raw body.
pub(crate) async fn post_json(
    backend: &'static str,
    request: reqwest::RequestBuilder,
    payload: &serde_json::Value,
) -> Result<serde_json::Value, BackendError> {
    let response = request
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .json(payload)
        .send()
        .await
        .inspect_err(|e| tracing::error!("{} request failed: {}", backend, e))?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!("{} error status: {}", backend, status.as_u16());
        tracing::error!("{} error body: {}", backend, body);
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("{} returned non-JSON body: {}", backend, body);
        BackendError::Decode {
            reason: format!("invalid JSON from {}: {}", backend, e),
            body,
        }
    })
}
