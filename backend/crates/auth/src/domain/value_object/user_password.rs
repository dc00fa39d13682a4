//! User Password Value Objects
//!
//! [`RawPassword`] is what the user typed, already checked against the
//! length policy. [`UserPassword`] is its Argon2id hash as persisted.
//! Hashing itself lives in `platform::password`.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult, FieldError};
use platform::password::{
    self, Credential, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordPolicyError, StoredHash,
};

/// Policy-checked clear-text password
pub struct RawPassword(Credential);

impl RawPassword {
    /// 422 with a `password` field error when the policy is violated
    pub fn new(raw: String) -> AppResult<Self> {
        Credential::parse(raw).map(Self).map_err(|violation| {
            AppError::validation(vec![FieldError::new("password", violation_message(violation))])
        })
    }
}

/// Client-facing wording for a policy violation
pub(crate) fn violation_message(violation: PasswordPolicyError) -> String {
    match violation {
        PasswordPolicyError::Blank => "password is required".to_string(),
        PasswordPolicyError::TooShort(_) => {
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH)
        }
        PasswordPolicyError::TooLong(_) => {
            format!("must be at most {} characters", MAX_PASSWORD_LENGTH)
        }
        PasswordPolicyError::ControlCharacter => "must not contain control characters".to_string(),
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPassword([REDACTED])")
    }
}

/// Stored password hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(StoredHash);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        password::hash_password(&raw.0, pepper)
            .map(Self)
            .map_err(|e| AppError::internal().with_source(e))
    }

    /// Rebuild from the `password_hash` column
    pub fn from_phc_string(phc: impl Into<String>) -> AppResult<Self> {
        StoredHash::parse(phc)
            .map(Self)
            .map_err(|e| AppError::internal().with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_str()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        password::verify_password(&raw.0, &self.0, pepper)
    }

    /// Same cost as [`Self::verify`], always `false`; for unknown accounts
    pub fn verify_dummy(raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        password::verify_against_decoy(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPassword([HASH])")
    }
}
