//! # Form State Holders
//!
//! Field values for the login and register screens plus one optional error
//! message per field.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen opens         ──► LoginForm::default()                         │
//! │  User types in field  ──► set_email(..)   (clears that field's error)  │
//! │  User taps eye icon   ──► toggle_password_visibility()                 │
//! │  User submits         ──► validate()      (all fields, no early exit)  │
//! │  Screen closes        ──► form dropped                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{
    validate_confirm_password, validate_email, validate_login_password,
    validate_register_password, validate_required, validate_run, validate_terms_accepted,
    ValidationResult,
};

/// Common seam for screens that submit a form.
pub trait Form {
    /// Runs every field check, replaces the error slots and returns true when
    /// all of them passed.
    fn validate(&mut self) -> bool;

    /// True if the last validation left no error behind.
    fn is_valid(&self) -> bool;
}

/// Turns a validator outcome into an error slot.
fn message(result: ValidationResult<()>) -> Option<String> {
    result.err().map(|e| e.to_string())
}

// =============================================================================
// Login
// =============================================================================

/// Per-field errors of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of fields carrying an error.
    pub fn count(&self) -> usize {
        [&self.email, &self.password]
            .iter()
            .filter(|e| e.is_some())
            .count()
    }
}

/// Login screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub password_visible: bool,
    pub errors: LoginErrors,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.email = None;
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.password = None;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }
}

impl Form for LoginForm {
    fn validate(&mut self) -> bool {
        self.errors = LoginErrors {
            email: message(validate_email(&self.email)),
            password: message(validate_login_password(&self.password)),
        };
        self.errors.is_empty()
    }

    fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Register
// =============================================================================

/// Per-field errors of the register form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub run: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub accepts_terms: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn count(&self) -> usize {
        [
            &self.first_name,
            &self.last_name,
            &self.run,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.accepts_terms,
        ]
        .iter()
        .filter(|e| e.is_some())
        .count()
    }
}

/// Register screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub run: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepts_terms: bool,
    pub password_visible: bool,
    pub confirm_password_visible: bool,
    pub errors: RegisterErrors,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.first_name = value.into();
        self.errors.first_name = None;
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.last_name = value.into();
        self.errors.last_name = None;
    }

    pub fn set_run(&mut self, value: impl Into<String>) {
        self.run = value.into();
        self.errors.run = None;
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.errors.email = None;
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.errors.password = None;
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.confirm_password = value.into();
        self.errors.confirm_password = None;
    }

    pub fn set_accepts_terms(&mut self, accepted: bool) {
        self.accepts_terms = accepted;
        self.errors.accepts_terms = None;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.confirm_password_visible = !self.confirm_password_visible;
    }
}

impl Form for RegisterForm {
    fn validate(&mut self) -> bool {
        self.errors = RegisterErrors {
            first_name: message(validate_required("first name", &self.first_name)),
            last_name: message(validate_required("last name", &self.last_name)),
            run: message(validate_run(&self.run)),
            email: message(validate_email(&self.email)),
            password: message(validate_register_password(&self.password)),
            confirm_password: message(validate_confirm_password(
                &self.password,
                &self.confirm_password,
            )),
            accepts_terms: message(validate_terms_accepted(self.accepts_terms)),
        };
        self.errors.is_empty()
    }

    fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_register_form() -> RegisterForm {
        let mut form = RegisterForm::new();
        form.set_first_name("Ana");
        form.set_last_name("Rojas");
        form.set_run("12345678-K");
        form.set_email("ana@huerto.cl");
        form.set_password("abcd");
        form.set_confirm_password("abcd");
        form.set_accepts_terms(true);
        form
    }

    #[test]
    fn test_login_form_validation() {
        let mut form = LoginForm::new();
        assert!(!form.validate());
        assert_eq!(form.errors.count(), 2);
        assert_eq!(form.errors.email.as_deref(), Some("invalid email"));
        assert_eq!(form.errors.password.as_deref(), Some("password is required"));

        form.set_email("a@b.cl");
        form.set_password("x");
        assert!(form.validate());
        assert!(form.is_valid());
    }

    #[test]
    fn test_setter_clears_only_its_error() {
        let mut form = LoginForm::new();
        form.validate();

        form.set_email("still-bad");
        assert!(form.errors.email.is_none());
        assert!(form.errors.password.is_some());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_visibility_toggles() {
        let mut login = LoginForm::new();
        login.toggle_password_visibility();
        assert!(login.password_visible);
        login.toggle_password_visibility();
        assert!(!login.password_visible);

        let mut register = RegisterForm::new();
        register.toggle_confirm_password_visibility();
        assert!(register.confirm_password_visible);
        assert!(!register.password_visible);
    }

    #[test]
    fn test_register_form_valid() {
        let mut form = filled_register_form();
        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_register_blank_names_and_short_password() {
        let mut form = filled_register_form();
        form.set_first_name("");
        form.set_last_name("   ");
        form.set_password("abc");
        form.set_confirm_password("abc");

        assert!(!form.validate());
        assert_eq!(
            form.errors.first_name.as_deref(),
            Some("first name is required")
        );
        assert_eq!(form.errors.last_name.as_deref(), Some("last name is required"));
        assert_eq!(
            form.errors.password.as_deref(),
            Some("password must be at least 4 characters")
        );
        // Equality is checked independently of length.
        assert!(form.errors.confirm_password.is_none());
        assert_eq!(form.errors.count(), 3);
    }

    #[test]
    fn test_register_collects_every_failure() {
        let mut form = RegisterForm::new();
        form.set_password("abcd");
        form.set_confirm_password("abce");

        assert!(!form.validate());
        assert_eq!(form.errors.count(), 6);
        assert!(form.errors.password.is_none());
        assert_eq!(
            form.errors.confirm_password.as_deref(),
            Some("passwords do not match")
        );
        assert_eq!(
            form.errors.accepts_terms.as_deref(),
            Some("terms and conditions must be accepted")
        );
    }

    #[test]
    fn test_revalidate_replaces_errors() {
        let mut form = RegisterForm::new();
        form.validate();
        assert!(!form.is_valid());

        let mut fixed = filled_register_form();
        fixed.errors = form.errors.clone();
        assert!(!fixed.is_valid());
        assert!(fixed.validate());
        assert!(fixed.is_valid());
    }
}
