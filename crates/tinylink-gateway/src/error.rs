use crate::model::Envelope;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// What a client is told when a request fails.
///
/// The display text is the wire message; underlying causes are logged by the
/// handler and never sent. Responses are HTTP 200 unless the handler pairs
/// the error with a status, as the redirect route does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("failed to decode request")]
    Decode,
    #[error("field URL is a required field")]
    MissingUrl,
    #[error("field URL is not a valid URL")]
    InvalidUrl,
    #[error("field Alias is not a valid alias")]
    InvalidAlias,
    #[error("invalid request")]
    InvalidRequest,
    #[error("url already exists")]
    AliasExists,
    #[error("not found")]
    NotFound,
    #[error("failed to add url")]
    SaveFailed,
    #[error("internal error")]
    Internal,
}

impl AppError {
    /// Status used when the error is served on a route that reports
    /// failures through the HTTP status line.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal | AppError::SaveFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Pairs the envelope with [`AppError::status`] instead of 200.
    pub fn with_status(self) -> (StatusCode, Self) {
        (self.status(), self)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Json(Envelope::error(self.to_string())).into_response()
    }
}
