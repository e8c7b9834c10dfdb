// ABOUTME: Unified error handling with standard error codes and HTTP response mapping
// ABOUTME: Ensures the same failure class yields the same status code in every handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Quarters Property Software

//! # Unified Error Handling System
//!
//! This module provides the single error-classification layer for the
//! Quarters server. It defines standard error types, error codes, and HTTP
//! response formatting so that every route handler maps persistence and
//! validation failures identically.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    #[serde(rename = "INVALID_REFERENCE")]
    InvalidReference = 3003,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            ErrorCode::InvalidInput
            | ErrorCode::MissingRequiredField
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidReference => 400,

            // 404 Not Found
            ErrorCode::ResourceNotFound => 404,

            // 409 Conflict
            ErrorCode::ResourceAlreadyExists => 409,

            // 500 Internal Server Error
            ErrorCode::ConfigError
            | ErrorCode::ConfigMissing
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "The provided input is invalid",
            ErrorCode::MissingRequiredField => "A required field is missing from the request",
            ErrorCode::InvalidFormat => "The data format is invalid",
            ErrorCode::InvalidReference => "A referenced record does not exist",
            ErrorCode::ResourceNotFound => "The requested resource was not found",
            ErrorCode::ResourceAlreadyExists => "A resource with this identifier already exists",
            ErrorCode::ConfigError => "Configuration error encountered",
            ErrorCode::ConfigMissing => "Required configuration is missing",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "request failed");
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A required field was missing or empty
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Required field '{}' is missing or empty", field.into()),
        )
    }

    /// Duplicate resource
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Classify a persistence-layer failure into a uniform HTTP mapping.
    ///
    /// Foreign-key violations become 400 (the client referenced a parent
    /// that does not exist), unique violations become 409, and anything
    /// else is a 500 database error.
    pub fn from_persistence(err: anyhow::Error) -> Self {
        if let Some(sqlx::Error::Database(db_err)) = err.downcast_ref::<sqlx::Error>() {
            match db_err.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return Self::new(
                        ErrorCode::InvalidReference,
                        "Referenced record does not exist",
                    );
                }
                sqlx::error::ErrorKind::UniqueViolation => {
                    return Self::conflict("Record violates a uniqueness constraint");
                }
                _ => {}
            }
        }

        // Fallback for violations wrapped beyond downcast reach
        let message = err.to_string();
        if message.contains("FOREIGN KEY constraint failed") {
            Self::new(
                ErrorCode::InvalidReference,
                "Referenced record does not exist",
            )
        } else if message.contains("UNIQUE constraint failed") {
            Self::conflict("Record violates a uniqueness constraint")
        } else {
            Self::database(message)
        }
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::new(ErrorCode::InternalError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::InvalidReference.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ResourceAlreadyExists.http_status(), 409);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::not_found("Property");
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("RESOURCE_NOT_FOUND"));
        assert!(json.contains("Property not found"));
    }

    #[test]
    fn test_persistence_classifier_fallback() {
        let fk = anyhow::anyhow!("error returned from database: FOREIGN KEY constraint failed");
        assert_eq!(
            AppError::from_persistence(fk).code,
            ErrorCode::InvalidReference
        );

        let unique = anyhow::anyhow!("UNIQUE constraint failed: owners.email");
        assert_eq!(
            AppError::from_persistence(unique).code,
            ErrorCode::ResourceAlreadyExists
        );

        let other = anyhow::anyhow!("connection reset");
        assert_eq!(
            AppError::from_persistence(other).code,
            ErrorCode::DatabaseError
        );
    }
}
