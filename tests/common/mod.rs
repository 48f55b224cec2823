// Mock model backend for integration tests
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use chat_relay::{
    config::RelayConfig,
    message::ChatResponse,
    routes::create_router,
    state::AppState,
};
use serde_json::Value;
use tower::util::ServiceExt;

/// A request the mock backend saw.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    content_type: &'static str,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockBackend {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockBackend {
    /// Answer every POST with `status` and a JSON `body`.
    pub async fn json(status: u16, body: &str) -> Self {
        Self::start(status, body, "application/json").await
    }

    /// Answer every POST with `status` and a plain-text `body`.
    pub async fn text(status: u16, body: &str) -> Self {
        Self::start(status, body, "text/plain").await
    }

    async fn start(status: u16, body: &str, content_type: &'static str) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            content_type,
            seen: seen.clone(),
        };

        let app = Router::new()
            .route("/v1/responses", post(record_handler))
            .route("/api/chat", post(record_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            seen,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn record_handler(
    State(state): State<MockState>,
    req: Request<Body>,
) -> Response {
    let path = req.uri().path().to_string();
    let headers = req.headers().clone();
    let bytes = axum::body::to_bytes(req.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    state.seen.lock().unwrap().push(Recorded { path, headers, body });

    (
        state.status,
        [("content-type", state.content_type)],
        state.body.clone(),
    )
        .into_response()
}

/// Config pointing at `base_url`, with any extra variables layered on top.
pub fn config_for(base_url: &str, extra: &[(&str, &str)]) -> RelayConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("OPENAI_URL".into(), format!("{}/v1/responses", base_url));
    vars.insert("OLLAMA_HOST".into(), base_url.to_string());
    vars.insert("UPSTREAM_TIMEOUT_SECS".into(), "5".into());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    RelayConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn hosted_config(base_url: &str) -> RelayConfig {
    config_for(base_url, &[("OPENAI_API_KEY", "sk-test")])
}

pub fn local_config(base_url: &str) -> RelayConfig {
    config_for(base_url, &[("RELAY_BACKEND", "ollama")])
}

pub fn app_for(config: RelayConfig) -> Router {
    let state = Arc::new(AppState::from_config(config).unwrap());
    create_router(state)
}

pub async fn post_chat(app: Router, body: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai-chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

pub fn reply_of(body: &[u8]) -> String {
    let resp: ChatResponse = serde_json::from_slice(body).unwrap();
    resp.reply
}

pub fn json_of(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

/// An address nothing listens on.
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
