//! Domain-specific error types and error handling.

mod types;


// Re-export all error types and utilities
pub use types::{ErrorKind, OtpError};

use og_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input rejected before any state is touched
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The ephemeral store could not be reached; the guards cannot be
    /// trusted while this persists
    #[error("Store unavailable: {message}")]
    Store { message: String },

    // Bridge to the passcode outcomes
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// Classification used by callers to pick a transport status
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::ValidationFailure,
            DomainError::Store { .. } => ErrorKind::Infrastructure,
            DomainError::Otp(e) => e.kind(),
        }
    }

    /// The passcode outcome, if this is one
    pub fn as_otp(&self) -> Option<&OtpError> {
        match self {
            DomainError::Otp(e) => Some(e),
            _ => None,
        }
    }

    /// Wrap a store failure for operation `op`
    pub(crate) fn store(op: &str, message: impl std::fmt::Display) -> Self {
        DomainError::Store {
            message: format!("{} failed: {}", op, message),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            // store details stay in the logs
            DomainError::Store { .. } => ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable. Please try again later.",
            ),
            DomainError::Otp(e) => {
                let mut response = ErrorResponse::new(e.error_code(), e.to_string());
                if let Some(seconds) = e.retry_after_seconds() {
                    response = response.add_detail("retry_after", seconds);
                }
                if let Some(left) = e.attempts_left() {
                    response = response.add_detail("attempts_left", left);
                }
                response
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
