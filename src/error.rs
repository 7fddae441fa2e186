//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. Each operation in the core either returns a success value or
//! fails with exactly one of these kinds; the boundary maps the kind to an
//! HTTP response via `actix_web::error::ResponseError`.
//!
//! The response mapping intentionally preserves two quirks of the reference
//! contract: a failed login is a 400 while a failed session check is a 401
//! with an empty-object body, and not-found responses carry no body so a
//! non-owner cannot distinguish "missing" from "owned by someone else".

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input: bad email format, short password, empty task text,
    /// duplicate email (HTTP 400).
    Validation(String),
    /// Credential verification failure at login: unknown email or password
    /// mismatch (HTTP 400).
    Authentication(String),
    /// Session check failure: missing, unsigned, revoked, or foreign token
    /// (HTTP 401, empty-object body).
    Unauthorized(String),
    /// Missing record, malformed id, or record owned by another user; the
    /// three sub-causes are indistinguishable to the caller (HTTP 404).
    NotFound,
    /// Backing-store or other unexpected failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Authentication(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            // The reference behavior for a rejected session is a bare `{}`.
            AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(json!({})),
            AppError::NotFound => HttpResponse::NotFound().finish(),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the detailed field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Token decoding only happens while checking a session, so a signature or
/// shape failure always surfaces as a 401.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// A hashing failure is an operational problem, not a caller mistake.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
