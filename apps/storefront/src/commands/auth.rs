//! # Auth Commands
//!
//! Login and register submission.
//!
//! There is no credential backend: a form that passes validation signs the
//! user in by remembering their email in the session store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_login(&mut form)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  form.validate() ──► false ──► per-field messages stay on the form,    │
//! │       │                        VALIDATION_ERROR "<n> invalid fields"   │
//! │       ▼ true                                                            │
//! │  session.sign_in(email.trim())                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(email) ──► profile observers see the new email                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use huerto_core::{Form, LoginForm, RegisterForm};

use crate::error::{ApiError, ApiResult};
use crate::Storefront;

fn invalid_fields(count: usize) -> ApiError {
    let noun = if count == 1 { "field" } else { "fields" };
    ApiError::validation(format!("{} invalid {}", count, noun))
}

/// Validates the login form and signs the user in.
///
/// ## Returns
/// The stored (trimmed) email.
pub async fn submit_login(app: &Storefront, form: &mut LoginForm) -> ApiResult<String> {
    debug!("submit_login command");

    if !form.validate() {
        debug!(errors = form.errors.count(), "Login form rejected");
        return Err(invalid_fields(form.errors.count()));
    }

    let email = form.email.trim().to_string();
    app.session().sign_in(&email).await?;
    info!(session_id = %app.session_id(), "User signed in");

    Ok(email)
}

/// Validates the register form and signs the new user in.
pub async fn submit_register(app: &Storefront, form: &mut RegisterForm) -> ApiResult<String> {
    debug!("submit_register command");

    if !form.validate() {
        debug!(errors = form.errors.count(), "Register form rejected");
        return Err(invalid_fields(form.errors.count()));
    }

    let email = form.email.trim().to_string();
    app.session().sign_in(&email).await?;
    info!(session_id = %app.session_id(), "User registered");

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_login_success_persists_email() {
        let app = Storefront::in_memory().await.unwrap();
        let mut form = LoginForm::new();
        form.set_email("  a@b.cl ");
        form.set_password("secret");

        assert_eq!(submit_login(&app, &mut form).await.unwrap(), "a@b.cl");
        assert_eq!(
            app.session().user_email().await.unwrap().as_deref(),
            Some("a@b.cl")
        );
    }

    #[tokio::test]
    async fn test_login_failure_keeps_field_errors() {
        let app = Storefront::in_memory().await.unwrap();
        let mut form = LoginForm::new();
        form.set_email("not-an-email");

        let err = submit_login(&app, &mut form).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "2 invalid fields");
        assert_eq!(form.errors.email.as_deref(), Some("invalid email"));
        assert_eq!(app.session().user_email().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_success() {
        let app = Storefront::in_memory().await.unwrap();
        let mut form = RegisterForm::new();
        form.set_first_name("Ana");
        form.set_last_name("Rojas");
        form.set_run("12345678-9");
        form.set_email("ana@huerto.cl");
        form.set_password("abcd");
        form.set_confirm_password("abcd");
        form.set_accepts_terms(true);

        assert_eq!(
            submit_register(&app, &mut form).await.unwrap(),
            "ana@huerto.cl"
        );
    }

    #[tokio::test]
    async fn test_register_failure() {
        let app = Storefront::in_memory().await.unwrap();
        let mut form = RegisterForm::new();
        form.set_first_name("Ana");
        form.set_last_name("Rojas");
        form.set_run("1234-9");
        form.set_email("ana@huerto.cl");
        form.set_password("abcd");
        form.set_confirm_password("abcd");
        form.set_accepts_terms(true);

        let err = submit_register(&app, &mut form).await.unwrap_err();
        assert_eq!(err.message, "1 invalid field");
        assert_eq!(form.errors.run.as_deref(), Some("invalid RUN"));
    }
}
