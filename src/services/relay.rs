// src/services/relay.rs
use crate::message::{ChatReply, ChatTurn, Role};

use super::backend::{BackendAdapter, BackendError};

/// Forward the conversation to the backend, with the persona turn in front
/// when one is configured. Credentials are checked by the caller.
pub async fn relay_chat(
    backend: &dyn BackendAdapter,
    system_prompt: Option<&str>,
    turns: Vec<ChatTurn>,
) -> Result<ChatReply, BackendError> {
    let outbound = with_persona(system_prompt, turns);
    tracing::debug!("Forwarding {} turns to {}", outbound.len(), backend.name());
    backend.translate_and_invoke(&outbound).await
}

pub fn with_persona(system_prompt: Option<&str>, turns: Vec<ChatTurn>) -> Vec<ChatTurn> {
    match system_prompt {
        Some(prompt) => std::iter::once(ChatTurn::new(Role::System, prompt))
            .chain(turns)
            .collect(),
        None => turns,
    }
}
