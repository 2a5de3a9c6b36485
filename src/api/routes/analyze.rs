use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use crate::api::models::AnalyzeRequest;
use crate::api::AppState;
use crate::errors::VultesterError;
use crate::models::{AnalysisResult, Method};

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, Response> {
    let Json(req) = payload.map_err(|rejection| {
        VultesterError::InvalidRequest(rejection.body_text()).into_response()
    })?;

    let method = match req.method.as_deref() {
        Some(name) => name.parse::<Method>().map_err(IntoResponse::into_response)?,
        None => Method::default(),
    };

    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.analyze(req.facts.as_slice(), method))
        .await
        .map_err(|e| {
            VultesterError::Internal(format!("analysis task failed: {}", e)).into_response()
        })?
        .map_err(IntoResponse::into_response)?;

    Ok(Json(result))
}
