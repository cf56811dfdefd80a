//! # Error Types
//!
//! Domain-specific error types for tollpay-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tollpay-core errors (this file)                                       │
//! │  ├── CoreError        - State-dependent domain failures                │
//! │  ├── ValidationError  - A single field failed a rule                   │
//! │  └── FieldErrors      - Every failing field of one form                │
//! │                                                                         │
//! │  tollpay-session errors (separate crate)                               │
//! │  ├── BackendError     - Simulated backend call failed                  │
//! │  └── ApiError         - What the dashboard sees (serialized)           │
//! │                                                                         │
//! │  Flow: FieldErrors/BackendError → CoreError → ApiError → Dashboard     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never bare String
//! 3. Each variant renders a message the dashboard can show as-is

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised by session stores and commands.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A recharge or deduction was attempted with no tag linked.
    ///
    /// The ledger is left untouched.
    #[error("No FASTag linked")]
    NoTagLinked,

    /// Login rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A deduction would take the tag balance below zero.
    #[error("Insufficient balance: {balance} available, {requested} requested")]
    InsufficientBalance { balance: Money, requested: Money },

    /// A recharge would push the tag balance past what can be represented.
    #[error("Recharge of {requested} exceeds the maximum balance (current {balance})")]
    BalanceOverflow { balance: Money, requested: Money },

    /// Catch-all for failed backend calls.
    #[error("{0}")]
    OperationFailed(String),

    /// A single value failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// One or more form fields failed validation.
    #[error("Validation failed: {0}")]
    InvalidForm(#[from] FieldErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single input validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value does not match the expected format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount is outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: Money, max: Money },

    /// Amount must be a whole multiple of `step`.
    #[error("{field} must be in steps of {step}")]
    NotMultipleOf { field: String, step: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Confirmation field differs from the original.
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Password misses one or more strength rules.
    #[error("Password must contain {}", .missing.join(", "))]
    WeakPassword { missing: Vec<String> },
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-keyed validation messages for one form submission.
///
/// One message per failing field. Iteration is in field-name order so the
/// same input always produces the same report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty report.
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Message recorded for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing field names, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(field, message)` pairs, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `Ok(value)` if nothing failed, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::NoTagLinked.to_string(), "No FASTag linked");
        assert_eq!(CoreError::InvalidCredentials.to_string(), "Invalid credentials");

        let err = CoreError::InsufficientBalance {
            balance: Money::from_rupees(50),
            requested: Money::from_rupees(75),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: ₹50.00 available, ₹75.00 requested"
        );

        let err = CoreError::BalanceOverflow {
            balance: Money::from_rupees(425),
            requested: Money::from_rupees(100),
        };
        assert_eq!(
            err.to_string(),
            "Recharge of ₹100.00 exceeds the maximum balance (current ₹425.00)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "bankName".to_string(),
        };
        assert_eq!(err.to_string(), "bankName is required");

        let err = ValidationError::WeakPassword {
            missing: vec!["an uppercase letter".to_string(), "a number".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Password must contain an uppercase letter, a number"
        );
    }

    #[test]
    fn test_field_errors_display_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert("vehicleNumber", "bad vehicle");
        errors.insert("tagId", "bad tag");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "tagId: bad tag; vehicleNumber: bad vehicle");
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["tagId", "vehicleNumber"]);
    }

    #[test]
    fn test_field_errors_into_result() {
        assert_eq!(FieldErrors::new().into_result(7).unwrap(), 7);

        let mut errors = FieldErrors::new();
        errors.insert("ifscCode", "Please enter a valid IFSC code");
        let err = errors.into_result(()).unwrap_err();
        assert_eq!(err.get("ifscCode"), Some("Please enter a valid IFSC code"));
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::MustBePositive {
            field: "amount".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = FieldErrors::new().into();
        assert!(matches!(core_err, CoreError::InvalidForm(_)));
    }
}
