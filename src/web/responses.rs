//! HTTP response types and utilities
//!
//! Every endpoint answers with the same [`ApiResponse`] envelope. Errors from
//! the service layer are mapped onto status codes in [`handle_error`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

use crate::errors::{AppError, AppResult, LifecycleError, ReferenceError, RepositoryError};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn error_with_details(
        message: String,
        details: HashMap<String, String>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            details: Some(details),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Helper function to convert AppResult to HTTP response
pub fn handle_result<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::success(data))).into_response(),
        Err(error) => handle_error(error),
    }
}

/// Like [`handle_result`] but answers `201 Created` on success
pub fn handle_created<T>(result: AppResult<T>) -> Response
where
    T: Serialize,
{
    match result {
        Ok(data) => (StatusCode::CREATED, Json(ApiResponse::success(data))).into_response(),
        Err(error) => handle_error(error),
    }
}

/// Status, message and optional details for one error
type ErrorParts = (StatusCode, String, Option<HashMap<String, String>>);

fn detail_map<const N: usize>(pairs: [(&str, String); N]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

fn repository_status(error: &RepositoryError) -> ErrorParts {
    match error {
        RepositoryError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, error.to_string(), None),
        RepositoryError::DuplicateKey { table, .. } => (
            StatusCode::CONFLICT,
            format!("A {table} with this key already exists"),
            None,
        ),
        RepositoryError::Unsupported { .. } => (StatusCode::BAD_REQUEST, error.to_string(), None),
        e if e.is_unreachable() => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Store unavailable".to_string(),
            None,
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Data access failed".to_string(),
            None,
        ),
    }
}

fn lifecycle_status(error: &LifecycleError) -> ErrorParts {
    match error {
        LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, error.to_string(), None),
        LifecycleError::TerminalState { .. } => (
            StatusCode::CONFLICT,
            error.to_string(),
            detail_map([("state", "deleted".to_string()), ("terminal", "true".to_string())]),
        ),
        LifecycleError::NoOpTransition { state, .. } => (
            StatusCode::CONFLICT,
            error.to_string(),
            detail_map([("state", state.to_string())]),
        ),
        LifecycleError::StaleTransition { .. } => (StatusCode::CONFLICT, error.to_string(), None),
        LifecycleError::Unsupported { .. } => (StatusCode::BAD_REQUEST, error.to_string(), None),
    }
}

fn reference_status(error: &ReferenceError) -> ErrorParts {
    match error {
        ReferenceError::InvalidReference { field, set, id } => (
            StatusCode::NOT_FOUND,
            error.to_string(),
            detail_map([
                ("field", field.to_string()),
                ("set", set.to_string()),
                ("id", id.to_string()),
            ]),
        ),
        ReferenceError::NotMember { set, id } => (
            StatusCode::NOT_FOUND,
            error.to_string(),
            detail_map([("set", set.to_string()), ("id", id.to_string())]),
        ),
        ReferenceError::AlreadyExists { set, id } => (
            StatusCode::CONFLICT,
            error.to_string(),
            detail_map([("set", set.to_string()), ("id", id.to_string())]),
        ),
        ReferenceError::CacheDegraded { set, .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            error.to_string(),
            detail_map([("set", set.to_string())]),
        ),
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message, details) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone(), None),
        AppError::NotFound { resource, id } => (
            StatusCode::NOT_FOUND,
            format!("{} with id '{}' not found", resource, id),
            None,
        ),
        AppError::Lifecycle(e) => lifecycle_status(e),
        AppError::Reference(e) => reference_status(e),
        AppError::Repository(e) => repository_status(e),
        AppError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database operation failed".to_string(),
            None,
        ),
    };

    if status.is_server_error() {
        error!("Request failed: {}", error);
    }

    let response = if let Some(details) = details {
        ApiResponse::<()>::error_with_details(message, details)
    } else {
        ApiResponse::<()>::error(message)
    };

    (status, Json(response)).into_response()
}
