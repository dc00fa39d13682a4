//! User Role
//!
//! A single free-form role label per account. Registration always assigns
//! [`UserRole::DEFAULT`]; any other label comes from the database as-is.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRole(String);

impl UserRole {
    /// Label given to every self-registered account
    pub const DEFAULT: &'static str = "user";

    /// Wrap a stored label without interpretation
    pub fn from_db(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
