//! Auth Router

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use platform::mail::Mailer;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{
    AuthMiddlewareState, RateLimitState, rate_limit_by_client, require_auth,
};

/// Create the Auth router for any repository and mailer implementation
///
/// `register`, `login` and `logout` share the per-client rate limit;
/// `me` sits behind the access-control gate.
pub fn auth_router<R, M>(state: AuthAppState<R, M>, rate_limit: RateLimitState) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let gate = AuthMiddlewareState {
        tokens: state.tokens.clone(),
    };

    let public = Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            rate_limit_by_client(rate_limit.clone(), req, next)
        }));

    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            require_auth(gate.clone(), req, next)
        }));

    public.merge(protected).with_state(state)
}
