/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /graphql, /metrics
 * - 認証は route layer ではなく GraphQL の decorator chain 側で掛ける
 *   (operation 単位の bypass があるため)
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{graphql::graphql, health::health, metrics::metrics};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/graphql", post(graphql))
        .route("/metrics", get(metrics))
}
