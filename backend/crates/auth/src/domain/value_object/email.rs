//! Email Value Object
//!
//! Addresses are stored in canonical form: surrounding whitespace removed
//! and lower-cased, so lookups by email are case-insensitive.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult, FieldError};
use validator::ValidateEmail;

/// Longest address accepted for storage
const MAX_LEN: usize = 254;

/// Canonical email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Canonicalize and check `raw`
    ///
    /// Uses the same format check as request validation, so an address that
    /// passed the DTO layer is never rejected here.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let canonical = raw.as_ref().trim().to_lowercase();

        let problem = match canonical.len() {
            0 => Some("email is required".to_string()),
            n if n > MAX_LEN => Some(format!("must be at most {} characters", MAX_LEN)),
            _ if !canonical.validate_email() => Some("must be a valid email address".to_string()),
            _ => None,
        };

        match problem {
            Some(message) => Err(AppError::validation(vec![FieldError::new("email", message)])),
            None => Ok(Self(canonical)),
        }
    }

    /// Wrap a value read back from the users table
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
