//! API Server Entry Point
//!
//! Loads configuration, connects to PostgreSQL, applies migrations and
//! serves the router until SIGINT or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use api::config::{AppConfig, Environment};
use api::{AppServices, build_router};
use auth::{AuthConfig, PgUserRepository};
use catalog::PgProductRepository;
use platform::mail::{LogMailer, Mailer, ResendMailer};
use platform::rate_limit::{RateLimitConfig, RateLimiter};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "api=info,auth=info,catalog=info,platform=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.environment);

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    match config.resend_api_key.clone() {
        Some(api_key) => {
            let mailer = ResendMailer::new(api_key, config.from_email.clone())?;
            tracing::info!(from = %mailer.from_address(), "Welcome mail via Resend");
            serve(config, pool, mailer).await
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set, welcome mail will only be logged");
            serve(config, pool, LogMailer).await
        }
    }
}

fn init_tracing(environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve<M>(config: AppConfig, pool: PgPool, mailer: M) -> anyhow::Result<()>
where
    M: Mailer + Send + Sync + 'static,
{
    let auth_config = if config.environment.is_production() {
        AuthConfig::production()
    } else {
        AuthConfig::development()
    };

    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));
    let sweeper_cancel = CancellationToken::new();
    let sweeper = limiter.spawn_sweeper(sweeper_cancel.clone());

    let app = build_router(AppServices {
        users: PgUserRepository::new(pool.clone()),
        products: PgProductRepository::new(pool),
        mailer,
        tokens: Arc::new(auth_config.token_codec(config.jwt_secret.as_bytes())),
        auth_config,
        limiter,
        trust_proxy_headers: config.trust_proxy_headers,
        allowed_origin: config
            .allowed_origin
            .parse()
            .context("ALLOWED_ORIGIN is not a valid header value")?,
    });

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, env = ?config.environment, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper_cancel.cancel();
    sweeper.await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
