// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_REPLY: &str = "No reply.";

/// The `messages` array of an inbound chat body. Only a JSON object with an
/// array under `messages` qualifies; top-level arrays and scalars do not.
pub fn request_messages(body: &Value) -> Option<&Vec<Value>> {
    match body {
        Value::Object(obj) => obj.get("messages")?.as_array(),
        _ => None,
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Anything that is not a known role tag is treated as the user.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("system") => Role::System,
            Some("assistant") => Role::Assistant,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Coerce one element of the inbound array. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let role = Role::from_raw(value.get("role").and_then(Value::as_str));
        let content = match value.get("content") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        Self { role, content }
    }

    pub fn from_values(values: &[Value]) -> Vec<Self> {
        values.iter().map(Self::from_value).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
}

impl ChatReply {
    /// Trim whatever the backend produced, falling back to the placeholder.
    pub fn from_extracted(text: Option<String>) -> Self {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_REPLY.to_string());
        Self { text }
    }
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self { reply: reply.text }
    }
}
