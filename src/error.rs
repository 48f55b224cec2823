// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::backend::BackendError;

pub const SERVER_ERROR: &str = "Server error";

/// Everything a request can fail with. Converted to a JSON response at the
/// handler boundary and never propagated further.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    BadRequest(String),

    /// Body refused before parsing: wrong content type, too large.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("upstream request failed: {details}")]
    Upstream {
        status: Option<u16>,
        details: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::Configuration(_) | AppError::Upstream { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::MissingCredential(name) => AppError::Configuration(format!("Missing {}", name)),
            BackendError::Transport(e) => AppError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                details: e.to_string(),
            },
            BackendError::Status { status, body } => AppError::Upstream {
                status: Some(status),
                details: body,
            },
            BackendError::Decode { reason, body } => AppError::Upstream {
                status: None,
                details: format!("{}: {}", reason, body),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Configuration(msg)
            | AppError::BadRequest(msg)
            | AppError::Rejected { message: msg, .. } => json!({ "error": msg }),
            AppError::Upstream {
                status: Some(code),
                details,
            } => json!({
                "error": "Upstream request failed",
                "details": details,
                "status": code,
            }),
            AppError::Upstream {
                status: None,
                details,
            } => json!({
                "error": "Upstream request failed",
                "details": details,
            }),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                json!({ "error": SERVER_ERROR })
            }
        };
        (status, Json(body)).into_response()
    }
}
