use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::models::{Category, Method};

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let kb = state.engine.knowledge();
    Json(json!({
        "status": "healthy",
        "system": "vultester",
        "version": env!("CARGO_PKG_VERSION"),
        "build": {
            "timestamp": env!("BUILD_TIMESTAMP"),
            "git_hash": option_env!("GIT_HASH"),
        },
        "total_rules": kb.rules.len(),
        "categories": Category::ALL.iter().map(Category::as_str).collect::<Vec<_>>(),
        "inference_methods": Method::ALL.iter().map(Method::as_str).collect::<Vec<_>>(),
        "uptime_seconds": (chrono::Utc::now() - state.started_at).num_seconds(),
    }))
}
