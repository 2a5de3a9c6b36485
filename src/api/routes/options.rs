use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::models::OptionsQuery;
use crate::api::AppState;
use crate::models::{Category, Fact};

/// Everything a client needs to build the fact-selection wizard.
///
/// With `?selected=a,b` the response also lists the facts those selections
/// rule out.
pub async fn list_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Json<Value> {
    let kb = state.engine.knowledge();
    let categories: Vec<Value> = Category::ALL
        .iter()
        .map(|c| {
            json!({
                "id": c.as_str(),
                "label": c.label(),
                "description": c.description(),
            })
        })
        .collect();

    let mut body = json!({
        "categories": categories,
        "options": kb.options,
        "exclusions": kb.exclusions.entries(),
    });

    if let Some(selected) = query.selected.as_deref() {
        let selected: Vec<Fact> = selected
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Fact::from)
            .collect();
        body["selected"] = json!(selected);
        body["disabled"] = json!(kb.exclusions.excluded_by(&selected));
    }

    Json(body)
}
