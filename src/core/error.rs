// Centralized error handling for the store and the API

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::models::api::ErrorResponse;

/// Invariant violations raised by the store itself
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Card with ID {0} not found")]
    CardNotFound(u32),
}

/// A single rejected field in a request payload
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request payload ({} field errors)", .0.len())]
    InvalidFields(Vec<FieldError>),
}

/// Errors surfaced by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid request payload")]
    Validation(Vec<FieldError>),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFields(errors) => ApiError::Validation(errors),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, Vec::new()),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, errors.clone()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, Vec::new()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, Vec::new()),
            ApiError::Internal(err) => {
                // Details stay in the logs
                error!(error = %err, "Internal error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
        };

        (
            status,
            Json(ErrorResponse {
                message: self.to_string(),
                errors,
            }),
        )
            .into_response()
    }
}
