//! Sign Up Use Case
//!
//! Creates a new user account and issues its first session token.

use std::sync::Arc;

use kernel::id::UserId;
use platform::mail::Mailer;
use platform::token::TokenCodec;

use crate::application::config::AuthConfig;
use crate::application::notifier::WelcomeNotifier;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    /// Signed session token for the cookie
    pub token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer + Sync + 'static,
{
    user_repo: Arc<U>,
    notifier: WelcomeNotifier<M>,
    tokens: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, M> SignUpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        notifier: WelcomeNotifier<M>,
        tokens: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            notifier,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(email, password_hash);

        // A concurrent registration that slipped past the pre-check is
        // reported as EmailTaken by the repository
        self.user_repo.create(&user).await?;

        self.notifier.dispatch(&user.email);

        let token = self
            .tokens
            .issue(&user.user_id.to_string())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id,
            token,
        })
    }
}
