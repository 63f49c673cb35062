//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Route handlers, stores and the access gate all return `Result<_, AppError>` so that
//! failures propagate with `?` and are turned into a JSON response in one place.
//!
//! `AppError` implements `actix_web::error::ResponseError`; every error body has the
//! shape `{"error": "<message>"}`. It also provides `From` conversions for `sqlx::Error`,
//! `validator::ValidationErrors`, `bcrypt::BcryptError` and the token service's
//! `TokenError`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, invalid, expired or revoked credentials, or a wrong password (HTTP 401).
    Unauthorized(String),
    /// The caller is authenticated but its role does not grant access (HTTP 403).
    Forbidden(String),
    /// The request body could not be decoded (HTTP 400).
    BadRequest(String),
    /// A requested resource, or a requested page of resources, does not exist (HTTP 404).
    NotFound(String),
    /// A required field is missing or empty.
    ///
    /// Reported as HTTP 500 with the raw message echoed, which is what existing
    /// clients of the board expect.
    ValidationError(String),
    /// A uniqueness rule was violated, e.g. an email that is already registered.
    /// Reported like `ValidationError`.
    Conflict(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from the store (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg) => msg.as_str(),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::Conflict(_)
            | AppError::InternalServerError(_)
            | AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(json!({
            "error": self.message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Unique-constraint violations become `AppError::Conflict`, a missing row becomes
/// `AppError::NotFound`, everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                AppError::Conflict(db_error.message().to_string())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any token that fails verification is an authentication failure.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
