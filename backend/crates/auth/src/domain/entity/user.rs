//! User Entity
//!
//! Registered account: identity, login email and credential hash.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_password::UserPassword, user_role::UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (the token subject)
    pub user_id: UserId,
    /// Login email, unique, stored lower-cased
    pub email: Email,
    /// Argon2id hash of the password
    pub password_hash: UserPassword,
    /// Role label, `user` for every self-registered account
    pub user_role: UserRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id and the default role
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            user_role: UserRole::default(),
            created_at: Utc::now(),
        }
    }
}
