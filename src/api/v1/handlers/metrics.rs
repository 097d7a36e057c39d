/*
 * Responsibility
 * - GET /metrics (Prometheus text exposition)
 * - instrumenting が無効なら 404
 */
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{error::AppError, state::AppState};

pub async fn metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let metrics = state.metrics.as_ref().ok_or(AppError::NotFound)?;

    let text = metrics.encode().map_err(|e| {
        tracing::error!(error = %e, "failed to encode metrics");
        AppError::Internal
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        text,
    )
        .into_response())
}
