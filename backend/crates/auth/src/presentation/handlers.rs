//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::extract::ValidatedJson;
use kernel::identity::CurrentUser;
use kernel::response::ApiResponse;
use platform::mail::Mailer;
use platform::token::TokenCodec;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::notifier::WelcomeNotifier;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{CredentialsRequest, MeResponse, MessageResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: WelcomeNotifier<M>,
    pub tokens: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

impl<R, M> AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub fn new(repo: R, mailer: M, tokens: Arc<TokenCodec>, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            notifier: WelcomeNotifier::new(Arc::new(mailer)),
            tokens,
            config: Arc::new(config),
        }
    }
}

impl<R, M> Clone for AuthAppState<R, M>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            notifier: self.notifier.clone(),
            tokens: Arc::clone(&self.tokens),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie(&state.config, Some(&output.token))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::created(MessageResponse::new("registered successfully")),
    )
        .into_response())
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ValidatedJson(req): ValidatedJson<CredentialsRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie(&state.config, Some(&output.token))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(MessageResponse::new("logged in successfully")),
    )
        .into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/auth/logout
///
/// Stateless: the cookie is cleared, the token itself stays valid until it
/// expires.
pub async fn logout<R, M>(State(state): State<AuthAppState<R, M>>) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let cookie = session_cookie(&state.config, None)?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(MessageResponse::new("logged out")),
    )
        .into_response())
}

/// `Set-Cookie` value that stores `token`, or clears the cookie on `None`
fn session_cookie(config: &AuthConfig, token: Option<&str>) -> AuthResult<HeaderValue> {
    let cookie = config.session_cookie();
    let value = match token {
        Some(token) => cookie.issue(token),
        None => cookie.expire(),
    };
    value.map_err(|e| AuthError::Internal(format!("Unencodable session cookie: {}", e)))
}

// ============================================================================
// Me
// ============================================================================

/// GET /api/v1/auth/me
pub async fn me(user: CurrentUser) -> ApiResponse<MeResponse> {
    ApiResponse::ok(MeResponse {
        user_id: user.subject().to_string(),
    })
}
