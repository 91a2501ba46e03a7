//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes without the `/api` prefix, for nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Request ledger
        .route(
            "/requests",
            get(handlers::requests::list).post(handlers::requests::submit),
        )
        .route("/requests/{id}", get(handlers::requests::get))
        .route(
            "/requests/{id}/status",
            patch(handlers::requests::update_status),
        )
        // Session tracker
        .route("/sessions/ping", post(handlers::sessions::ping))
        // Catalogs
        .route("/voices", get(handlers::catalog::voices))
        .route("/quick-texts", get(handlers::catalog::quick_texts))
        // Settings
        .route(
            "/settings",
            get(handlers::settings::get)
                .put(handlers::settings::update)
                .patch(handlers::settings::update),
        )
        // Events (SSE)
        .route("/events", get(handlers::events::stream))
}

/// API routes under `/api` plus `/health`.
///
/// Axum 0.8 uses brace syntax for path parameters: `{id}`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// API routes plus static assets from `static_dir`, falling back to
/// `index.html` for client-side routing.
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AxumContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    create_router(ctx, cors_config).fallback_service(serve_dir)
}

pub(crate) async fn health_check() -> &'static str {
    "OK"
}
