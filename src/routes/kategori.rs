use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::routes::AppState;

// Get all categories
pub async fn get_all_kategori(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "data": state.categories.as_ref()
    }))
}
