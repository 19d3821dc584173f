use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::models::{AnalysisError, ErrorKind};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Analysis(e) => match e.kind {
                ErrorKind::EmptyInput => StatusCode::BAD_REQUEST,
                ErrorKind::ProviderBlocked => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::ProviderFailure | ErrorKind::MalformedJson => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => {
                (status, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Analysis(e) => {
                match e.kind {
                    ErrorKind::ProviderFailure => tracing::error!(
                        "LLM error: {}",
                        e.details.as_deref().unwrap_or(&e.message)
                    ),
                    ErrorKind::MalformedJson => {
                        tracing::error!("Error decoding JSON from LLM response: {e}")
                    }
                    ErrorKind::EmptyInput | ErrorKind::ProviderBlocked => {}
                }
                (status, Json(e)).into_response()
            }
        }
    }
}
