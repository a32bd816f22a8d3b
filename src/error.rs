//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type shared by the store,
//! the services and the HTTP handlers.
//!
//! Domain failures (`DuplicateUsername`, `InvalidCredentials`, `NotFound`,
//! `EmptyCatalog`) are normally caught by the handlers and turned into a flash
//! message plus a redirect. Everything that reaches actix unhandled is rendered
//! through the `ResponseError` implementation below as a JSON body.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A registration attempt used a username that is already taken (HTTP 409).
    DuplicateUsername,
    /// Login failed. Unknown username and wrong password are not distinguished (HTTP 401).
    InvalidCredentials,
    /// A word entry (or other record) does not exist (HTTP 404).
    NotFound(String),
    /// A random entry was requested but the catalog has no entries (HTTP 404).
    EmptyCatalog,
    /// A session is required but missing or invalid (HTTP 401).
    Unauthorized(String),
    /// Form input failed presence checks (HTTP 422).
    ValidationError(String),
    /// The backing store could not serve the request (HTTP 500).
    StoreUnavailable(String),
    /// An unexpected server-side error, e.g. hashing or token encoding failed (HTTP 500).
    InternalServerError(String),
    /// Startup configuration is missing or malformed.
    Configuration(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateUsername => write!(f, "Username already exists"),
            AppError::InvalidCredentials => write!(f, "Incorrect Username and/or Password"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::EmptyCatalog => write!(f, "The catalog has no words yet"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::StoreUnavailable(msg) => write!(f, "Store Unavailable: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::EmptyCatalog => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StoreUnavailable(_)
            | AppError::InternalServerError(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
            // Store and internal details stay in the log.
            return HttpResponse::build(status).json(json!({
                "error": "Internal Server Error"
            }));
        }
        HttpResponse::build(status).json(json!({
            "error": self.to_string()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError::StoreUnavailable`.
///
/// Missing rows are expressed as `Option` by the store, so `RowNotFound`
/// only shows up here when a query unexpectedly returned nothing.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::StoreUnavailable(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::StoreUnavailable(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
