//! Error type of the REST routes.
//!
//! Every failure renders as a JSON body `{"error": "..."}` with a 4xx/5xx
//! status. Upstream failures also carry a `details` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::chat::ChatError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingField(String),
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotConfigured(String),
    #[error("{context}")]
    Upstream { context: String, details: String },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing(msg: impl Into<String>) -> Self {
        ApiError::MissingField(msg.into())
    }

    pub fn upstream(context: impl Into<String>, details: impl ToString) -> Self {
        ApiError::Upstream {
            context: context.into(),
            details: details.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotConfigured(_) | ApiError::Upstream { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Upstream { context, details } => {
                json!({ "error": context, "details": details })
            }
            other => json!({ "error": other.to_string() }),
        };
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NotConfigured(msg) => ApiError::NotConfigured(msg.to_string()),
            AuthError::Rejected { status: 401, message, .. } => ApiError::Unauthorized(message),
            AuthError::Rejected { message, .. } => ApiError::Invalid(message),
            AuthError::Transport(e) => ApiError::upstream("Auth provider request failed", e),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConfigured => ApiError::NotConfigured(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::missing("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::upstream("x", "y").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: ApiError = AuthError::Rejected {
            status: 422,
            code: None,
            message: "Password should be at least 6 characters".into(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Password should be at least 6 characters");
    }
}
