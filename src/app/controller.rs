use axum::Json;
use serde_json::{json, Value};

use super::enums::api_status::ApiStatus;

pub async fn get_root() -> Json<Value> {
    Json(json!({ "status": ApiStatus::Online.value() }))
}
