//! Auth Middleware
//!
//! - [`require_auth`] guards protected routes with the session token
//! - [`rate_limit_by_client`] throttles the public auth routes per client IP

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::identity::CurrentUser;
use platform::client::extract_client_ip;
use platform::rate_limit::RateLimiter;
use platform::token::TokenCodec;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::config::SESSION_COOKIE_NAME;
use crate::error::AuthError;

// ============================================================================
// Access control
// ============================================================================

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub tokens: Arc<TokenCodec>,
}

/// Middleware that requires a valid session token
///
/// The token is read from the `auth_token` cookie, falling back to an
/// `Authorization: Bearer` header. On success the caller's [`CurrentUser`]
/// is added to the request extensions. Missing and invalid tokens produce
/// the same 401 response.
pub async fn require_auth(
    state: AuthMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = extract_token(req.headers()) else {
        tracing::debug!("No session token presented");
        return Err(AuthError::Unauthenticated.into_response());
    };

    let claims = state
        .tokens
        .verify(&token)
        .map_err(|_| AuthError::Unauthenticated.into_response())?;

    req.extensions_mut().insert(CurrentUser::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    platform::cookie::read_cookie(headers, SESSION_COOKIE_NAME).or_else(|| {
        headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

// ============================================================================
// Rate limiting
// ============================================================================

/// Rate limiter middleware state
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
    /// Honour `X-Forwarded-For` (only behind a trusted proxy)
    pub trust_proxy_headers: bool,
}

/// Middleware that admits a request only if the client has budget left
///
/// Requests whose client IP cannot be determined are let through.
pub async fn rate_limit_by_client(
    state: RateLimitState,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let Some(client_ip) = extract_client_ip(req.headers(), direct_ip, state.trust_proxy_headers)
    else {
        tracing::warn!("Client IP unknown, skipping rate limit");
        return Ok(next.run(req).await);
    };

    let decision = state.limiter.check(client_ip);

    if !decision.allowed {
        tracing::warn!(
            client_ip = %client_ip,
            retry_after_ms = decision.retry_after.as_millis() as u64,
            "Rate limit exceeded"
        );

        // Whole seconds, rounded up
        let retry_after = decision.retry_after.as_secs()
            + u64::from(decision.retry_after.subsec_nanos() > 0);

        return Err((
            [(header::RETRY_AFTER, HeaderValue::from(retry_after.max(1)))],
            AppError::too_many_requests("too many requests, slow down"),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_prefers_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=from-cookie"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers), Some("from-cookie".to_string()));
    }

    #[test]
    fn test_extract_token_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(extract_token(&headers), Some("from-header".to_string()));
    }

    #[test]
    fn test_extract_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_token(&headers), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
