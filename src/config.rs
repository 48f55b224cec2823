// src/config.rs
use std::{env, str::FromStr, time::Duration};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful university study assistant inside a student app. Be concise and practical.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which model backend the relay forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI Responses API.
    Hosted,
    /// Ollama running next to the relay.
    LocalDaemon,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "hosted" => Ok(BackendKind::Hosted),
            "ollama" | "local" => Ok(BackendKind::LocalDaemon),
            other => Err(format!("unknown backend '{}', expected 'openai' or 'ollama'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HostedConfig {
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct LocalDaemonConfig {
    pub host: String,
    pub model: String,
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub backend: BackendKind,
    pub host: String,
    pub port: u16,
    pub hosted: HostedConfig,
    pub local: LocalDaemonConfig,
    /// `None` disables the persona turn.
    pub system_prompt: Option<String>,
    pub upstream_timeout: Duration,
    pub enable_cors: bool,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as
    /// unset, except for `SYSTEM_PROMPT` where empty means "no persona".
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = parse_or(&get, "RELAY_BACKEND", BackendKind::Hosted)?;
        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&get, "UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?;
        let enable_cors = parse_or(&get, "ENABLE_CORS", true)?;

        let system_prompt = match lookup("SYSTEM_PROMPT") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(p),
            None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
        };

        Ok(Self {
            backend,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            hosted: HostedConfig {
                api_key: get("OPENAI_API_KEY"),
                url: get("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            local: LocalDaemonConfig {
                host: get("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
                model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            },
            system_prompt,
            upstream_timeout: Duration::from_secs(timeout_secs),
            enable_cors,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
