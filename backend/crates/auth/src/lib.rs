//! Accounts and Sessions
//!
//! Registration and login with email + password. A successful call returns
//! an HS256 session token in the `auth_token` cookie; [`middleware::require_auth`]
//! turns that token back into a `CurrentUser` for protected routes.
//!
//! Layers follow the other feature crates: `domain` (user entity, value
//! objects, repository port), `application` (sign-up/sign-in use cases and
//! the welcome notifier), `infra` (Postgres and in-memory stores) and
//! `presentation` (DTOs, handlers, router, middleware).
//!
//! Logout only clears the cookie. Issued tokens stay valid until `exp`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::auth_router;

pub mod middleware {
    pub use crate::presentation::middleware::{
        AuthMiddlewareState, RateLimitState, rate_limit_by_client, require_auth,
    };
}
