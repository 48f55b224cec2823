use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    error::AppError,
    message::{ChatResponse, ChatTurn, request_messages},
    services::relay::relay_chat,
    state::SharedState,
};

/// `POST /api/ai-chat`. Owns the credential check, which runs before the
/// `messages` check so a misconfigured relay fails every request.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload.map_err(reject_body)?;

    if let Err(e) = state.backend.ensure_configured() {
        tracing::error!("{} in environment variables.", e);
        return Err(e.into());
    }

    let Some(messages) = request_messages(&body) else {
        tracing::info!("Request received. Messages count: none");
        return Err(AppError::BadRequest("messages must be an array".to_string()));
    };
    tracing::info!("Request received. Messages count: {}", messages.len());

    let turns = ChatTurn::from_values(messages);
    let reply = relay_chat(
        state.backend.as_ref(),
        state.config.system_prompt.as_deref(),
        turns,
    )
    .await?;

    Ok(Json(reply.into()))
}

fn reject_body(rejection: JsonRejection) -> AppError {
    tracing::warn!("Rejected chat body: {}", rejection.body_text());
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            AppError::BadRequest(format!("invalid JSON body: {}", rejection.body_text()))
        }
        other => AppError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}
