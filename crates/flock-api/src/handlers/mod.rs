pub mod comments;
pub mod feed;
pub mod likes;
pub mod notifications;
pub mod posts;
pub mod users;

use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
