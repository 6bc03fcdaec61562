//! # Validation Module
//!
//! Field validators for the login and register forms and the catalog search
//! box. Every function is pure: it looks only at its arguments.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Form Validation Flow                               │
//! │                                                                         │
//! │  User taps "Ingresar" / "Crear Cuenta"                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Form::validate()  (forms.rs)                                          │
//! │  ├── validate_email(email)             ─┐                              │
//! │  ├── validate_register_password(pw)     │ every check runs,            │
//! │  ├── validate_confirm_password(pw, c)   │ no short-circuit             │
//! │  ├── validate_run(run)                  │                              │
//! │  └── validate_required(name) ...       ─┘                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Per-field Option<String> messages shown under each input              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use huerto_core::validation::{validate_email, validate_run};
//!
//! assert!(validate_email("a@b.cl").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//! assert!(validate_run("12345678-K").is_ok());
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::{MAX_SEARCH_QUERY_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Email address grammar used by mobile platforms for address fields.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("Invalid regex")
});

/// RUN: 7-8 digits, hyphen, verifier digit or K.
static RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,8}-[0-9kK]$").expect("Invalid regex"));

/// Blank means empty once surrounding whitespace is dropped.
#[inline]
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be blank
/// - `local@domain` with at least one dot in the domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() || !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validates a Chilean RUN.
///
/// Format only (`NNNNNNNN-D`). The modulo-11 verifier digit is not checked.
///
/// ```rust
/// use huerto_core::validation::validate_run;
///
/// assert!(validate_run("12345678-9").is_ok());
/// assert!(validate_run("1234567-k").is_ok());
/// assert!(validate_run("1234-9").is_err());
/// assert!(validate_run("12.345.678-9").is_err());
/// ```
pub fn validate_run(run: &str) -> ValidationResult<()> {
    if !RUN_RE.is_match(run) {
        return Err(ValidationError::InvalidRun);
    }

    Ok(())
}

// =============================================================================
// Password Validators
// =============================================================================

/// Login only needs a non-blank password.
pub fn validate_login_password(password: &str) -> ValidationResult<()> {
    if is_blank(password) {
        return Err(ValidationError::required("password"));
    }

    Ok(())
}

/// Registration requires at least `MIN_PASSWORD_LENGTH` characters.
pub fn validate_register_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// The confirmation must equal the password exactly.
pub fn validate_confirm_password(password: &str, confirm: &str) -> ValidationResult<()> {
    if password != confirm {
        return Err(ValidationError::Mismatch);
    }

    Ok(())
}

// =============================================================================
// Generic Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if is_blank(value) {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Validates that the terms checkbox is ticked.
pub fn validate_terms_accepted(accepted: bool) -> ValidationResult<()> {
    if !accepted {
        return Err(ValidationError::TermsNotAccepted);
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (returns everything)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.cl").is_ok());
        assert!(validate_email("juan.perez+huerto@duocuc.cl").is_ok());
        assert!(validate_email("user_1%x@mail.example.com").is_ok());

        assert_eq!(validate_email("not-an-email"), Err(ValidationError::InvalidEmail));
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("@b.cl").is_err());
        assert!(validate_email("a@.cl").is_err());
        assert!(validate_email("a b@c.cl").is_err());
        assert!(validate_email(" a@b.cl\t").is_ok());
        assert!(validate_email(" a @b.cl").is_err());
    }

    #[test]
    fn test_validate_run() {
        assert!(validate_run("12345678-9").is_ok());
        assert!(validate_run("1234567-0").is_ok());
        assert!(validate_run("12345678-k").is_ok());
        assert!(validate_run("12345678-K").is_ok());

        assert_eq!(validate_run("1234-9"), Err(ValidationError::InvalidRun));
        assert!(validate_run("123456789-9").is_err());
        assert!(validate_run("12345678-").is_err());
        assert!(validate_run("12345678-x").is_err());
        assert!(validate_run("12345678-|").is_err());
        assert!(validate_run("123456789").is_err());
        assert!(validate_run("").is_err());
    }

    #[test]
    fn test_validate_login_password() {
        assert!(validate_login_password("x").is_ok());
        assert_eq!(
            validate_login_password("  "),
            Err(ValidationError::required("password"))
        );
    }

    #[test]
    fn test_validate_register_password() {
        assert!(validate_register_password("abcd").is_ok());
        assert!(validate_register_password("ñañá").is_ok());
        assert!(matches!(
            validate_register_password("abc"),
            Err(ValidationError::TooShort { min: 4, .. })
        ));
        assert!(validate_register_password("").is_err());
    }

    #[test]
    fn test_validate_confirm_password() {
        assert!(validate_confirm_password("abcd", "abcd").is_ok());
        assert!(validate_confirm_password("", "").is_ok());
        assert_eq!(
            validate_confirm_password("abcd", "abce"),
            Err(ValidationError::Mismatch)
        );
    }

    #[test]
    fn test_validate_required_and_terms() {
        assert!(validate_required("name", "Ana").is_ok());
        assert_eq!(
            validate_required("name", " \t"),
            Err(ValidationError::required("name"))
        );
        assert!(validate_terms_accepted(true).is_ok());
        assert_eq!(
            validate_terms_accepted(false),
            Err(ValidationError::TermsNotAccepted)
        );
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  miel ").unwrap(), "miel");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(100)).is_ok());
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
