//! Error handling module for the festival sync service.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const FETCH_ERROR: &str = "FETCH_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The festival sheet could not be fetched
    Fetch(String),
    /// Database error
    Database(String),
    /// Resource not found
    NotFound(String),
    /// Invalid configuration
    Config(String),
    /// Bad request
    BadRequest(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => codes::FETCH_ERROR,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Fetch(msg)
            | AppError::Database(msg)
            | AppError::NotFound(msg)
            | AppError::Config(msg)
            | AppError::BadRequest(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Sheet fetch error: {:?}", err);
        AppError::Fetch(format!("Failed to fetch festival sheet: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query: {}", err.body_text()))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorDetails {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.message(),
        }
    }
}

/// Error response envelope for the read API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: ErrorDetails::from(&self),
        };
        (status, Json(body)).into_response()
    }
}

/// Body returned by the sync trigger when a run fails.
#[derive(Debug, Serialize, Deserialize)]
pub struct SyncFailure {
    pub error: String,
    pub details: ErrorDetails,
}

impl From<&AppError> for SyncFailure {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.message(),
            details: ErrorDetails::from(error),
        }
    }
}

/// Wrapper that renders an error in the sync trigger's failure shape.
pub struct SyncError(pub AppError);

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        (status, Json(SyncFailure::from(&self.0))).into_response()
    }
}

impl From<AppError> for SyncError {
    fn from(err: AppError) -> Self {
        SyncError(err)
    }
}
