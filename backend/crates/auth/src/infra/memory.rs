//! In-Memory Repository Implementations
//!
//! Process-local store with the same uniqueness rules as the Postgres
//! schema. Used by tests and for running the API without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> AuthError {
        AuthError::Internal("user store lock poisoned".to_string())
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().map_err(|_| Self::poisoned())?;

        // Check and insert under one lock, like the unique index
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().any(|u| &u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    fn user(email: &str) -> User {
        let raw = RawPassword::new("password1".to_string()).unwrap();
        User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("alice@example.com");
        repo.create(&alice).await.unwrap();

        let by_email = repo.find_by_email(&alice.email).await.unwrap().unwrap();
        assert_eq!(by_email.user_id, alice.user_id);
        assert!(repo.exists_by_email(&alice.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice@example.com")).await.unwrap();

        let result = repo.create(&user("Alice@Example.com")).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repo = InMemoryUserRepository::new();
        assert!(repo
            .find_by_email(&Email::new("nobody@example.com").unwrap())
            .await
            .unwrap()
            .is_none());
        assert!(!repo
            .exists_by_email(&Email::new("nobody@example.com").unwrap())
            .await
            .unwrap());
    }
}
