use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{checkins, health, qr_codes, roster, scan};
use crate::services::CheckinFeed;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub feed: Arc<CheckinFeed>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    let feed = Arc::new(CheckinFeed::new(config.limits.feed_capacity));

    let state = AppState {
        pool,
        config: config.clone(),
        feed,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let request_timeout = TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs));

    // Check-in API (v1). Staff identity comes from the X-Staff-Id header,
    // enforced per-handler by the StaffAuth extractor.
    let api_routes = Router::new()
        .route("/api/v1/events/:event_id/scans", post(scan::process_scan))
        .route(
            "/api/v1/events/:event_id/registrations/:registration_id/checkin",
            post(checkins::manual_checkin),
        )
        .route(
            "/api/v1/events/:event_id/checkins",
            get(checkins::list_checkins),
        )
        .route("/api/v1/events/:event_id/roster", get(roster::get_roster))
        .route(
            "/api/v1/events/:event_id/qr-codes",
            post(qr_codes::create_qr_code),
        )
        .layer(request_timeout.clone());

    // The SSE stream is long-lived and exempt from the request timeout.
    let stream_routes = Router::new().route(
        "/api/v1/events/:event_id/checkins/stream",
        get(checkins::stream_checkins),
    );

    // Public routes (no staff identity required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .layer(request_timeout);

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(stream_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
