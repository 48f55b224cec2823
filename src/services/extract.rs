// src/services/extract.rs
use serde_json::Value;

/// Pulls reply text out of a backend response, if this shape has it.
pub type Extractor = fn(&Value) -> Option<String>;

/// Responses API: the convenience field first, then the first content block.
pub const HOSTED_EXTRACTORS: &[Extractor] = &[output_text, first_output_content_text];

/// Ollama `/api/chat`.
pub const LOCAL_DAEMON_EXTRACTORS: &[Extractor] = &[message_content];

/// First extractor yielding non-blank text wins.
pub fn extract_reply(body: &Value, extractors: &[Extractor]) -> Option<String> {
    extractors
        .iter()
        .filter_map(|extract| extract(body))
        .find(|text| !text.trim().is_empty())
}

pub fn output_text(body: &Value) -> Option<String> {
    body.get("output_text")?.as_str().map(str::to_string)
}

pub fn first_output_content_text(body: &Value) -> Option<String> {
    body.pointer("/output/0/content/0/text")?
        .as_str()
        .map(str::to_string)
}

pub fn message_content(body: &Value) -> Option<String> {
    body.pointer("/message/content")?.as_str().map(str::to_string)
}
