use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{models::responses::ApiResponse, store::StoreError};

#[derive(Debug, Error)]
pub enum AdminError {
    /// Rejected before any store call.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Session is missing or expired")]
    Unauthorized,

    #[error("Too many requests")]
    RateLimited,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AdminError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AdminError::Store { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation { .. } => StatusCode::BAD_REQUEST,
            AdminError::InvalidPassword | AdminError::Unauthorized => StatusCode::UNAUTHORIZED,
            AdminError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AdminError::Store { source, .. } if source.is_not_found() => StatusCode::NOT_FOUND,
            AdminError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AdminError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed or mistyped request bodies answer with the same envelope as
/// every other validation failure.
impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::validation("body", rejection.body_text())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AdminError::Validation { field, message } => {
                ApiResponse::failure(message.clone(), status.as_u16() as u32)
                    .with_data(json!({ "field": field }))
            }
            AdminError::Store { context, source } => {
                if source.is_not_found() {
                    tracing::warn!("{}: {}", context, source);
                } else {
                    tracing::error!("{}: {}", context, source);
                }
                ApiResponse::failure(*context, status.as_u16() as u32)
            }
            AdminError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ApiResponse::failure("Internal server error", status.as_u16() as u32)
            }
            other => ApiResponse::failure(other.to_string(), status.as_u16() as u32),
        };

        (status, Json(body)).into_response()
    }
}
