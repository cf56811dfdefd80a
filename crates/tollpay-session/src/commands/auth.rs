//! # Auth Commands
//!
//! Login, two-step registration and logout.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tollpay_core::validation::{validate_registration_form, PasswordStrength};
use tollpay_core::{FieldErrors, User};

use crate::error::ApiError;
use crate::state::{AuthSnapshot, AuthState};

/// Registration form payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Live checklist shown under the registration password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChecklist {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub is_strong: bool,
}

impl From<PasswordStrength> for PasswordChecklist {
    fn from(strength: PasswordStrength) -> Self {
        PasswordChecklist {
            has_min_length: strength.has_min_length,
            has_uppercase: strength.has_uppercase,
            has_lowercase: strength.has_lowercase,
            has_digit: strength.has_digit,
            has_symbol: strength.has_symbol,
            is_strong: strength.is_strong(),
        }
    }
}

/// Signs in.
///
/// Empty fields are rejected before the backend is called.
pub async fn login(auth: &AuthState, email: &str, password: &str) -> Result<User, ApiError> {
    debug!(email = %email, "login command");

    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.insert("email", "Email is required");
    }
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors.into_result(())?;

    Ok(auth.login(email.trim(), password).await?)
}

/// Validates the registration form and creates the account.
pub async fn register(auth: &AuthState, request: &RegisterRequest) -> Result<User, ApiError> {
    debug!(email = %request.email, "register command");

    let input = validate_registration_form(
        &request.name,
        &request.email,
        &request.phone,
        &request.password,
        &request.confirm_password,
    )?;

    Ok(auth
        .register(&input.name, &input.email, &input.phone, &input.password)
        .await?)
}

pub async fn logout(auth: &AuthState) -> AuthSnapshot {
    debug!("logout command");
    auth.logout().await;
    auth.snapshot().await
}

pub async fn get_session(auth: &AuthState) -> AuthSnapshot {
    debug!("get_session command");
    auth.snapshot().await
}

/// Evaluates a password as the user types. Never fails.
pub fn check_password_strength(password: &str) -> PasswordChecklist {
    PasswordStrength::evaluate(password).into()
}
