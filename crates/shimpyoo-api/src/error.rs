use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use shimpyoo_completion::CompletionError;
use shimpyoo_types::api::ApiResponse;

pub const USER_NOT_FOUND: &str = "user does not exist.";
pub const CHAT_ROOM_NOT_FOUND: &str = "chat room does not exist.";
pub const CHAT_ROOM_FORBIDDEN: &str = "chat room is not accessible.";
pub const INVALID_TITLE: &str = "title must be 1-100 characters.";

/// Failures of the chat service. Every variant reaches the caller as a
/// failure envelope with the matching status code.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Internal(String),
}

impl ChatError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_envelope<T>(&self) -> ApiResponse<T> {
        ApiResponse::fail(self.status().as_u16(), self.to_string())
    }

    /// Storage failure while validating a request.
    pub(crate) fn storage(err: anyhow::Error) -> Self {
        error!("Storage error: {:#}", err);
        Self::Internal(format!("database error: {}", err))
    }

    /// Anything that went wrong between building the prompt and persisting
    /// the answer. Upstream status, network and parse failures all collapse
    /// into the same kind.
    pub(crate) fn exchange(err: impl std::fmt::Display) -> Self {
        error!("Chat exchange failed: {}", err);
        Self::Internal(format!("error while calling the completion api: {}", err))
    }
}

impl From<CompletionError> for ChatError {
    fn from(err: CompletionError) -> Self {
        Self::exchange(err)
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_envelope::<()>())).into_response()
    }
}
