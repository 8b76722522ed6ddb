//! Error types for the service
//!
//! Each layer has its own enum; `AppError` is what handlers return and maps
//! every failure onto an HTTP status with a `{"detail": ...}` body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use notify_types::ErrorResponse;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record is missing key field '{0}'")]
    MissingKey(String),
}

/// Errors raised by a phrase interpreter
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Phrase interpretation failed: {0}")]
    Failed(String),
}

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid entity type")]
    InvalidEntityType,

    #[error("User settings not found")]
    SettingsNotFound,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidEntityType => StatusCode::BAD_REQUEST,
            AppError::SettingsNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Store(_) | AppError::Interpret(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let detail = if status.is_server_error() {
            log::error!("Request failed: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorResponse { detail })
    }
}
