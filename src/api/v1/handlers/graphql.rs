/*
 * Responsibility
 * - POST /graphql
 * - body → GraphqlRequest、Authorization / x-request-id → RequestContext
 * - decorator chain を呼び出し、結果を JSON envelope で返す
 *   (query レベルの errors があっても 200)
 */
use axum::{
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::{
        dto::graphql::decode_graphql_request,
        extractors::{BearerToken, RequestId},
    },
    error::AppError,
    services::graphql::RequestContext,
    state::AppState,
};

pub async fn graphql(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RequestId(request_id): RequestId,
    body: Bytes,
) -> Result<Response, AppError> {
    let req = decode_graphql_request(&body)?;
    let ctx = RequestContext::new()
        .with_token(token)
        .with_request_id(request_id);

    let res = state.service.exec(ctx, req).await?;

    let body = serde_json::to_vec(&res).map_err(|e| {
        tracing::error!(error = %e, "failed to encode graphql response");
        AppError::encoding(e)
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
