//! Request-scoped identity
//!
//! The access-control middleware verifies the session token and inserts a
//! [`CurrentUser`] into the request extensions. Handlers take it as an
//! extractor instead of reading an untyped context value.

use crate::id::UserId;

/// Authenticated caller of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    subject: String,
}

impl CurrentUser {
    /// Wrap the `sub` claim of a verified token
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    /// Raw subject as it appeared in the token
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Subject parsed as a user id, `None` if it is not a well-formed id
    pub fn user_id(&self) -> Option<UserId> {
        self.subject.parse().ok()
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| crate::error::app_error::AppError::unauthorized("unauthorized"))
    }
}
