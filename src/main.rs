//! Loan Contracts API Server
//!
//! Serves the v1 (basic contract) and v2 (interest and status) loan APIs,
//! their OpenAPI documents and static assets.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;

use emprestimos_server::build_app;
use emprestimos_server::config::Config;
use emprestimos_server::loan::{LoanService, LoanServiceV2};
use emprestimos_server::middleware::RateLimiter;
use emprestimos_server::state::AppState;

/// Idle time after which a client's rate limit bucket is dropped
const RATE_LIMIT_IDLE: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Configuration loaded");

    // Each API version owns a disjoint in-memory collection
    let app_state = AppState::new(
        Arc::new(LoanService::new()),
        Arc::new(LoanServiceV2::new()),
        config.environment.clone(),
    );

    let rate_limiter = RateLimiter::new(config.rate_limit_rps);

    let cleanup_limiter = rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_IDLE);
        loop {
            interval.tick().await;
            cleanup_limiter.cleanup(RATE_LIMIT_IDLE).await;
        }
    });

    let app = build_app(&config, app_state, rate_limiter);

    let addr = SocketAddr::new(config.bind_address, config.port);

    tracing::info!("Server listening on {}", addr);
    tracing::info!("API documentation at http://{}/", addr);
    tracing::info!("Health check at http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    // Serve with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
