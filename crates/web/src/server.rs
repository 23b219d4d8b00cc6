//! Web server assembly

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use inkpost_common::Store;

use crate::middleware::request_context;
use crate::pages::page_router;
use crate::routes::api_router;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: inkpost_common::VERSION,
    })
}

/// Assemble the full router: pages, API, health, and the middleware stack.
///
/// The request-context stage is the outermost application layer so every
/// route, API and page alike, sees the context extension.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .merge(page_router())
        .layer(middleware::from_fn(request_context))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Inkpost web listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
