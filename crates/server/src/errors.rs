use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::{accounts::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// Failures surfaced by the HTML handlers as plain-text responses.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("User exists")]
    UserExists,
    #[error("Invalid login")]
    InvalidLogin,
    #[error("Invalid index")]
    InvalidIndex,
    #[error("{0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::UserExists => StatusCode::CONFLICT,
            WebError::InvalidLogin => StatusCode::UNAUTHORIZED,
            WebError::InvalidIndex => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for WebError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => WebError::InvalidIndex,
            ServiceError::Validation(msg) => WebError::BadRequest(msg),
            ServiceError::Storage(msg) => WebError::Internal(msg),
        }
    }
}

impl From<AuthError> for WebError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => WebError::InvalidLogin,
            AuthError::Validation(msg) => WebError::BadRequest(msg),
            other => WebError::Internal(format!("[{}] {}", other.code(), other)),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
