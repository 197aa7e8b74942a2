//! Route registration: site documents, API and system endpoints.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use portfolio::ProfileStore;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::gate::TokenGate;
use crate::messages::MessageStore;
use crate::{auth_middleware, contact, login, site, upload};

/// Application shared state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub gate: Arc<TokenGate>,
    pub store: ProfileStore,
    pub messages: Arc<MessageStore>,
    /// Held while a resume upload is being stored.
    pub upload_slot: Arc<tokio::sync::Mutex<()>>,
}

pub fn build_router(state: AppState) -> Router {
    let owner_routes = Router::new()
        .route("/api/upload/resume", post(upload::resume_handler))
        .layer(DefaultBodyLimit::max(state.config.limits.max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_owner,
        ));

    Router::new()
        .route("/", get(site::index))
        .route("/index.html", get(site::index))
        .route("/profile.jpeg", get(site::profile_photo))
        .route("/resume.pdf", get(site::resume))
        .route("/assets/*path", get(site::asset))
        .route("/api/auth/check", post(login::check_handler))
        .route("/api/contact", post(contact::submit_handler))
        .route("/api/profile", get(site::profile))
        .route("/health", get(health))
        .route("/version", get(version))
        .merge(owner_routes)
        .fallback(site::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "foliod",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
