//! Boundary error mapping for the chat API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parley_database::RepositoryError;
use serde::Serialize;
use tracing::error;

use crate::types::ChatServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ChatServiceError> for ApiError {
    fn from(err: ChatServiceError) -> Self {
        match err {
            ChatServiceError::Validation(message) => Self::bad_request(message),
            ChatServiceError::Repository(RepositoryError::NotFound) => {
                Self::not_found("chat not found")
            }
            ChatServiceError::Repository(inner) => {
                error!(error = %inner, "repository failure");
                Self::internal_server_error("internal error")
            }
            ChatServiceError::Transaction(inner) => {
                error!(error = %inner, "transaction failure");
                Self::internal_server_error("internal error")
            }
        }
    }
}
