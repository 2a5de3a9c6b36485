use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::models::RulesQuery;
use crate::api::AppState;
use crate::errors::VultesterError;
use crate::models::{Category, Rule};

pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> Result<Json<Value>, VultesterError> {
    let rules = &state.engine.knowledge().rules;

    let selected: Vec<&Rule> = match query.category.as_deref() {
        Some(name) => {
            let category = Category::parse(name).ok_or_else(|| {
                VultesterError::InvalidRequest(format!("Unknown category '{}'", name))
            })?;
            rules.by_category(category).collect()
        }
        None => rules.iter().collect(),
    };

    Ok(Json(json!({
        "total_rules": selected.len(),
        "rules": selected,
    })))
}

pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, VultesterError> {
    let kb = state.engine.knowledge();
    let rule = kb
        .rules
        .get(&id)
        .ok_or_else(|| VultesterError::NotFound("Rule not found".into()))?;

    Ok(Json(json!({
        "rule": rule,
        "recommendation": kb.recommendation(&id).unwrap_or("No specific recommendation"),
    })))
}
