// src/state.rs
use std::sync::Arc;

use crate::config::RelayConfig;
use crate::services::backend::{self, BackendAdapter};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: RelayConfig,
    pub backend: Arc<dyn BackendAdapter>,
}

impl AppState {
    pub fn new(config: RelayConfig, backend: Arc<dyn BackendAdapter>) -> Self {
        Self { config, backend }
    }

    /// Build the HTTP client and the adapter the config selects.
    pub fn from_config(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = backend::build_client(&config)?;
        let backend = backend::build_adapter(&config, client);
        Ok(Self { config, backend })
    }
}
