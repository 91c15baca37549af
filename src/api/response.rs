//! Response types for the Report Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates an error for a path identifier that is not a number.
    pub fn invalid_id(raw: &str) -> Self {
        Self::with_details(
            "INVALID_ID",
            format!("Invalid identifier: {}", raw),
            "Identifiers must be non-negative integers",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for a malformed path identifier.
    pub fn invalid_id(raw: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::invalid_id(raw),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match error.root_cause() {
            EngineError::StudentNotFound { .. } => (StatusCode::NOT_FOUND, "STUDENT_NOT_FOUND"),
            EngineError::ClassNotFound { .. } => (StatusCode::NOT_FOUND, "CLASS_NOT_FOUND"),
            EngineError::AssignmentNotFound { .. } => {
                (StatusCode::NOT_FOUND, "ASSIGNMENT_NOT_FOUND")
            }
            EngineError::GradeNotFound { .. } => (StatusCode::NOT_FOUND, "GRADE_NOT_FOUND"),
            EngineError::AttendanceNotFound { .. } => {
                (StatusCode::NOT_FOUND, "ATTENDANCE_NOT_FOUND")
            }
            EngineError::StoreUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_UNAVAILABLE")
            }
            EngineError::IdentifiersExhausted { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "IDENTIFIERS_EXHAUSTED")
            }
            EngineError::TaskFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "REPORT_TASK_FAILED")
            }
            EngineError::DataNotFound { .. } | EngineError::DataParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATA_ERROR")
            }
            EngineError::ReportFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "REPORT_FAILED")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
