//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every service returns `Result<_, AppError>`, and the API layer relies on the
//! `actix_web::error::ResponseError` implementation to turn each variant into the
//! matching status code with a JSON body.
//!
//! Storage faults are the only variants whose detail never reaches the client: the
//! cause is logged server-side and the response carries a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Message returned to clients for any unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request: unparsable JSON, bad path parameter, id mismatch (HTTP 400).
    BadRequest(String),
    /// Field-level validation failure (HTTP 400).
    /// Carries the structured per-field errors so clients can see which rule failed.
    ValidationError(ValidationErrors),
    /// Authentication failed or is required but missing (HTTP 401).
    Unauthorized(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The request collides with existing state, e.g. a duplicate username (HTTP 409).
    Conflict(String),
    /// Unexpected server-side error not tied to storage (HTTP 500).
    InternalServerError(String),
    /// Fault reported by the storage backend (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(errors) => write!(f, "Validation Error: {}", errors),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Internal and database errors are logged here with their full detail; the client
/// receives only [`INTERNAL_ERROR_MESSAGE`].
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::ValidationError(errors) => HttpResponse::build(status).json(json!({
                "error": "Validation failed",
                "details": errors
            })),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                HttpResponse::build(status).json(json!({
                    "error": INTERNAL_ERROR_MESSAGE
                }))
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => HttpResponse::build(status).json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `StoreError` into `AppError`.
///
/// Duplicate keys become `Conflict`, missing rows become `NotFound`, and anything the
/// backend reports beyond that is a `DatabaseError`.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Duplicate(what) => AppError::Conflict(format!("{} already exists", what)),
            StoreError::NotFound => AppError::NotFound("Record not found".into()),
            StoreError::Backend(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::ValidationError(errors)
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Used when token verification fails (bad signature, expired, wrong issuer/audience).
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}
