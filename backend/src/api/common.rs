//! Response envelope and error-to-HTTP conversion.
//!
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//!
//! Authentication failures additionally carry a `WWW-Authenticate: Bearer`
//! challenge so clients know which scheme to retry with.

use crate::errors::ServiceError;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Maps a ServiceError to its status, error type and client-facing message.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, &'static str, String) {
    let (status, error_type) = match &error {
        ServiceError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
        ServiceError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
        ServiceError::InvalidToken | ServiceError::NotAuthenticated => {
            (StatusCode::UNAUTHORIZED, "unauthorized")
        }
        ServiceError::InactiveAccount => (StatusCode::BAD_REQUEST, "inactive_user"),
        ServiceError::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        ServiceError::InternalError { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };

    let message = match error {
        ServiceError::Validation { message } => message,
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            "Internal server error".to_string()
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (status, error_type, message)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let challenge = self.requires_challenge();
        let (status, error_type, message) = service_error_to_http(self);

        let body = ApiResponse::<()>::error(message, error_type);

        let mut response = (status, Json(body)).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
