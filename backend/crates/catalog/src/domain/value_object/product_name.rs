//! Product Name

use std::fmt;

use thiserror::Error;

/// Maximum length in characters, matches `VARCHAR(255)`
pub const MAX_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductNameError {
    #[error("name is required")]
    Required,

    #[error("must be at most 255 characters")]
    TooLong,
}

/// Non-empty display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(raw: impl Into<String>) -> Result<Self, ProductNameError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ProductNameError::Required);
        }
        if raw.chars().count() > MAX_NAME_LENGTH {
            return Err(ProductNameError::TooLong);
        }
        Ok(Self(raw))
    }

    /// Reconstruct from a stored row
    pub(crate) fn from_db(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
