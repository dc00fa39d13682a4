//! Shared harness: the full router over in-memory stores

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use api::{AppServices, build_router};
use auth::{AuthConfig, InMemoryUserRepository};
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request, StatusCode, header};
use catalog::InMemoryProductRepository;
use http_body_util::BodyExt;
use platform::mail::LogMailer;
use platform::rate_limit::{RateLimitConfig, RateLimiter};
use platform::token::{DEFAULT_TOKEN_TTL, TokenCodec};
use serde_json::Value;
use tower::ServiceExt;

pub const ORIGIN: &str = "http://localhost:5173";
pub const SECRET: &[u8] = b"integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub users: InMemoryUserRepository,
    pub products: InMemoryProductRepository,
    pub limiter: Arc<RateLimiter>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// `name=value` part of the Set-Cookie header, ready to send back
    pub fn session_cookie(&self) -> String {
        self.set_cookie()
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn set_cookie(&self) -> &str {
        self.headers
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap()
    }
}

pub fn app() -> TestApp {
    let users = InMemoryUserRepository::new();
    let products = InMemoryProductRepository::new();
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));

    let router = build_router(AppServices {
        users: users.clone(),
        products: products.clone(),
        mailer: LogMailer,
        tokens: Arc::new(TokenCodec::new(SECRET, DEFAULT_TOKEN_TTL)),
        auth_config: AuthConfig::development(),
        limiter: Arc::clone(&limiter),
        trust_proxy_headers: false,
        allowed_origin: ORIGIN.parse().unwrap(),
    });

    TestApp {
        router,
        users,
        products,
        limiter,
    }
}

pub fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, last_octet], 40_000))
}

/// Request from 10.0.0.1 with an optional JSON body and session cookie
pub fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    request_from(peer(1), method, uri, body, cookie)
}

pub fn request_from(
    addr: SocketAddr,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let mut req = builder.body(body).unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

pub async fn send(app: &TestApp, req: Request<Body>) -> TestResponse {
    let response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        text,
    }
}

pub async fn register(app: &TestApp, email: &str, password: &str) -> TestResponse {
    let body = serde_json::json!({ "email": email, "password": password });
    send(app, request("POST", "/api/v1/auth/register", Some(body), None)).await
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> TestResponse {
    let body = serde_json::json!({ "email": email, "password": password });
    send(app, request("POST", "/api/v1/auth/login", Some(body), None)).await
}
