//! API Server
//!
//! Router assembly shared by the binary and the integration tests.
//! Uses `anyhow` only at startup; handlers speak `kernel::error::AppError`.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::middleware::{AuthMiddlewareState, RateLimitState, require_auth};
use auth::presentation::AuthAppState;
use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, header},
    middleware::{self, Next},
    routing::get,
};
use catalog::CatalogAppState;
use catalog::domain::repository::ProductRepository;
use platform::mail::Mailer;
use platform::rate_limit::RateLimiter;
use platform::token::TokenCodec;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Everything the router needs, already constructed
pub struct AppServices<U, P, M> {
    pub users: U,
    pub products: P,
    pub mailer: M,
    pub tokens: Arc<TokenCodec>,
    pub auth_config: AuthConfig,
    pub limiter: Arc<RateLimiter>,
    pub trust_proxy_headers: bool,
    /// Single origin allowed by CORS
    pub allowed_origin: HeaderValue,
}

/// Build the full application router
///
/// - `GET /health`
/// - `/api/v1/auth/*` (register, login and logout rate limited)
/// - `/api/v1/products[/{id}]` behind the access-control gate
pub fn build_router<U, P, M>(services: AppServices<U, P, M>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let AppServices {
        users,
        products,
        mailer,
        tokens,
        auth_config,
        limiter,
        trust_proxy_headers,
        allowed_origin,
    } = services;

    let gate = AuthMiddlewareState {
        tokens: Arc::clone(&tokens),
    };
    let rate_limit = RateLimitState {
        limiter,
        trust_proxy_headers,
    };

    let auth = auth::auth_router(
        AuthAppState::new(users, mailer, tokens, auth_config),
        rate_limit,
    );

    let catalog = catalog::catalog_router(CatalogAppState::new(products)).route_layer(
        middleware::from_fn(move |req: Request<Body>, next: Next| {
            require_auth(gate.clone(), req, next)
        }),
    );

    let api = Router::new().nest("/auth", auth).merge(catalog);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
        ]))
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}
