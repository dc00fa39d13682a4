//! Sign In Use Case
//!
//! Authenticates a user by email and password and issues a session token.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenCodec;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user_id: UserId,
    /// Signed session token for the cookie
    pub token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`] after the same amount of hashing work.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let pepper = self.config.pepper();

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                UserPassword::verify_dummy(&raw_password, pepper);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !user.password_hash.verify(&raw_password, pepper) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.user_id.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::infra::memory::InMemoryUserRepository;
    use platform::token::DEFAULT_TOKEN_TTL;

    async fn setup() -> (SignInUseCase<InMemoryUserRepository>, UserId, Arc<TokenCodec>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let raw = RawPassword::new("password1".to_string()).unwrap();
        let user = User::new(
            Email::new("a@x.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        );
        let user_id = user.user_id;
        repo.create(&user).await.unwrap();

        let tokens = Arc::new(TokenCodec::new(b"test-secret", DEFAULT_TOKEN_TTL));
        let use_case = SignInUseCase::new(
            repo,
            Arc::clone(&tokens),
            Arc::new(AuthConfig::development()),
        );
        (use_case, user_id, tokens)
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_correct_password_signs_in() {
        let (use_case, user_id, tokens) = setup().await;
        let output = use_case.execute(input("A@x.com", "password1")).await.unwrap();

        assert_eq!(output.user_id, user_id);
        assert_eq!(tokens.verify(&output.token).unwrap().sub, user_id.to_string());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_identical() {
        let (use_case, _, _) = setup().await;

        let wrong_password = use_case
            .execute(input("a@x.com", "password2"))
            .await
            .unwrap_err();
        let unknown_email = use_case
            .execute(input("b@x.com", "password1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_policy_violation_is_invalid_credentials() {
        let (use_case, _, _) = setup().await;
        let err = use_case.execute(input("a@x.com", "short")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
