//! Global application error types.
//!
//! This module defines the error type shared by the services, repositories
//! and token utilities. Conversion into HTTP responses lives in
//! `api::common` so that this module stays free of transport concerns.

use thiserror::Error;
use validator::ValidationErrors;

/// Generic service error used across the authentication flow.
///
/// The three authentication failures are intentionally coarse: callers learn
/// *that* they were rejected, never *why* a token or password was wrong.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Login failed. Unknown user and wrong password are indistinguishable.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Token malformed, badly signed, expired or naming an unknown subject.
    #[error("Could not validate credentials")]
    InvalidToken,

    /// No bearer token was presented at all.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Flattens `validator` output into a single `field: message` list.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let error_messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        Self::validation(error_messages.join(", "))
    }

    /// Whether the response for this error must carry a bearer challenge.
    pub fn requires_challenge(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidToken | Self::NotAuthenticated
        )
    }
}
