//! API DTOs (Data Transfer Objects)

use std::borrow::Cow;
use std::fmt;

use platform::password::{Credential, PasswordPolicyError};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::value_object::user_password::violation_message;

// ============================================================================
// Register / Login
// ============================================================================

/// Register and login request body
///
/// Missing fields decode as empty strings so they are reported as field
/// errors rather than as a malformed body.
#[derive(Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn field_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim().to_string();
    if trimmed.is_empty() {
        return Err(field_error("required", "email is required".to_string()));
    }
    if !trimmed.validate_email() {
        return Err(field_error(
            "email",
            "must be a valid email address".to_string(),
        ));
    }
    Ok(())
}

/// Same policy as sign-up, so lengths are counted after NFKC normalization
fn validate_password(password: &str) -> Result<(), ValidationError> {
    Credential::parse(password.to_string())
        .map(drop)
        .map_err(|violation| {
            let code = match violation {
                PasswordPolicyError::Blank => "required",
                PasswordPolicyError::TooShort(_) => "min",
                PasswordPolicyError::TooLong(_) => "max",
                PasswordPolicyError::ControlCharacter => "control",
            };
            field_error(code, violation_message(violation))
        })
}

// ============================================================================
// Responses
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Identity of the caller
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user_id: String,
}
