/*
 * Responsibility
 * - GET /health (疎通用)
 * - 認証・audit log の対象外 (decorator chain を通らない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
