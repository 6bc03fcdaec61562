//! # Error Types
//!
//! Domain-specific error types for huerto-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  huerto-core errors (this file)                                        │
//! │  ├── CoreError        - Not-found lookups and wrapped validation       │
//! │  └── ValidationError  - One failed field check                         │
//! │                                                                         │
//! │  huerto-db errors (separate crate)                                     │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What a screen sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Screen                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never fail, so there is no cart error variant here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested product identifier is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Product detail screen opened with a stale id
    /// - Add-to-cart for an id that was never loaded
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed field check.
///
/// The `Display` output is the message shown under the offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value is not a well-formed email address.
    #[error("invalid email")]
    InvalidEmail,

    /// Value is not a well-formed RUN (`NNNNNNNN-D`).
    #[error("invalid RUN")]
    InvalidRun,

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Two fields that must match do not.
    #[error("passwords do not match")]
    Mismatch,

    /// Terms and conditions checkbox left unticked.
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

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
        let err = CoreError::ProductNotFound("FR999".to_string());
        assert_eq!(err.to_string(), "Product not found: FR999");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "invalid email");
        assert_eq!(ValidationError::InvalidRun.to_string(), "invalid RUN");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 4,
        };
        assert_eq!(err.to_string(), "password must be at least 4 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::InvalidEmail.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
