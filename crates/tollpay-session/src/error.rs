//! # API Error Type
//!
//! Unified error type returned by session commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command Function  ── Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Form invalid?     ── FieldErrors ─────────────┐                        │
//! │         │                                      │                        │
//! │         ▼                                      ▼                        │
//! │  Store failed?     ── CoreError ──────────► ApiError ───► dashboard     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ─────────────────────────────────────────────► dashboard       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "Validation failed: ifscCode: Please enter a valid IFSC code",
//!   "fields": { "ifscCode": "Please enter a valid IFSC code" }
//! }
//! ```

use serde::Serialize;
use tollpay_core::{CoreError, FieldErrors};

/// Error returned from session commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages for form errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Login rejected
    InvalidCredentials,

    /// Operation needs a linked FASTag
    NoTagLinked,

    /// Deduction exceeds the tag balance
    InsufficientBalance,

    /// Backend call failed
    OperationFailed,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a validation error carrying every failing field.
    pub fn invalid_form(fields: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Validation failed: {}", fields),
            fields: Some(fields),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<FieldErrors> for ApiError {
    fn from(fields: FieldErrors) -> Self {
        ApiError::invalid_form(fields)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoTagLinked => ApiError::new(ErrorCode::NoTagLinked, err.to_string()),
            CoreError::InvalidCredentials => {
                ApiError::new(ErrorCode::InvalidCredentials, err.to_string())
            }
            CoreError::InsufficientBalance { .. } => {
                ApiError::new(ErrorCode::InsufficientBalance, err.to_string())
            }
            CoreError::BalanceOverflow { .. } => ApiError::validation(err.to_string()),
            CoreError::OperationFailed(message) => {
                tracing::error!("Backend operation failed: {}", message);
                ApiError::new(ErrorCode::OperationFailed, message)
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::InvalidForm(fields) => ApiError::invalid_form(fields),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
