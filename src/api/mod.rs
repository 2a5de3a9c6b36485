pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::engine::{InferenceEngine, KnowledgeBase};

#[derive(Clone)]
pub struct AppState {
    pub engine: InferenceEngine,
    pub started_at: DateTime<Utc>,
}

pub fn create_app_state(knowledge: KnowledgeBase) -> AppState {
    AppState {
        engine: InferenceEngine::new(Arc::new(knowledge)),
        started_at: Utc::now(),
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/rules", get(routes::rules::list_rules))
        .route("/api/rules/:id", get(routes::rules::get_rule))
        .route("/api/options", get(routes::options::list_options))
        .route("/api/analyze", post(routes::analyze::analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
