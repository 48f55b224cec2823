// src/services/local.rs
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::{
    config::LocalDaemonConfig,
    message::{ChatReply, ChatTurn},
};

use super::{
    backend::{BackendAdapter, BackendError, post_json},
    extract::{LOCAL_DAEMON_EXTRACTORS, extract_reply},
};

/// Ollama `/api/chat`: flat messages, no auth, streaming off.
#[derive(Debug, Clone)]
pub struct LocalDaemonAdapter {
    client: Client,
    config: LocalDaemonConfig,
}

impl LocalDaemonAdapter {
    pub fn new(client: Client, config: LocalDaemonConfig) -> Self {
        Self { client, config }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.host.trim_end_matches('/'))
    }

    pub fn build_payload(&self, turns: &[ChatTurn]) -> Value {
        let messages: Vec<Value> = turns
            .iter()
            .map(|turn| json!({ "role": turn.role.as_str(), "content": turn.content }))
            .collect();

        json!({
            "model": self.config.model,
            "messages": messages,
            "stream": false,
        })
    }
}

#[async_trait]
impl BackendAdapter for LocalDaemonAdapter {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn translate_and_invoke(&self, turns: &[ChatTurn]) -> Result<ChatReply, BackendError> {
        let request = self.client.post(self.chat_url());
        let body = post_json(self.name(), request, &self.build_payload(turns)).await?;
        Ok(ChatReply::from_extracted(extract_reply(&body, LOCAL_DAEMON_EXTRACTORS)))
    }
}
