// src/services/hosted.rs
use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::{Value, json};

use crate::{
    config::HostedConfig,
    message::{ChatReply, ChatTurn},
};

use super::{
    backend::{BackendAdapter, BackendError, post_json},
    extract::{HOSTED_EXTRACTORS, extract_reply},
};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI Responses API: nested content blocks, bearer auth.
#[derive(Debug, Clone)]
pub struct HostedApiAdapter {
    client: Client,
    config: HostedConfig,
}

impl HostedApiAdapter {
    pub fn new(client: Client, config: HostedConfig) -> Self {
        Self { client, config }
    }

    pub fn build_payload(&self, turns: &[ChatTurn]) -> Value {
        let input: Vec<Value> = turns
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.as_str(),
                    "content": [{ "type": "text", "text": turn.content }],
                })
            })
            .collect();

        json!({
            "model": self.config.model,
            "input": input,
        })
    }
}

#[async_trait]
impl BackendAdapter for HostedApiAdapter {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn ensure_configured(&self) -> Result<(), BackendError> {
        match &self.config.api_key {
            Some(_) => Ok(()),
            None => Err(BackendError::MissingCredential(API_KEY_VAR)),
        }
    }

    async fn translate_and_invoke(&self, turns: &[ChatTurn]) -> Result<ChatReply, BackendError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(BackendError::MissingCredential(API_KEY_VAR))?;

        let request = self
            .client
            .post(&self.config.url)
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key));

        let body = post_json(self.name(), request, &self.build_payload(turns)).await?;
        Ok(ChatReply::from_extracted(extract_reply(&body, HOSTED_EXTRACTORS)))
    }
}
