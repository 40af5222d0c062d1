//! Route definitions and application assembly

mod docs;
mod loan;

pub use docs::docs_routes;
pub use loan::{loan_routes, loan_v2_routes};

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::handlers::health_check;
use crate::middleware::{self, RateLimiter};
use crate::state::AppState;

/// Build the full application: versioned loan APIs, documentation,
/// health endpoint, static files and the middleware stack
pub fn build_app(config: &Config, app_state: AppState, rate_limiter: RateLimiter) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .nest("/v1", loan_routes())
        .nest("/v2", loan_v2_routes())
        .merge(docs_routes())
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers));

    if config.environment.is_production() {
        app = app.layer(axum::middleware::from_fn(middleware::hsts_header));
    }

    app.layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(axum::middleware::from_fn(middleware::rate_limit_layer(
            rate_limiter,
        )))
        .layer(configure_cors(config.cors_allowed_origins.as_deref()))
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
