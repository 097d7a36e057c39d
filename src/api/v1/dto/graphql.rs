/*
 * Responsibility
 * - POST /graphql の request body を canonical な GraphqlRequest に変換する
 * - Content-Type は見ない (JSON として読めるかどうかだけ)
 * - 読めない body は 400 (AppError::BadRequest)
 */
use crate::error::AppError;
use crate::services::graphql::GraphqlRequest;

pub fn decode_graphql_request(body: &[u8]) -> Result<GraphqlRequest, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "undecodable graphql request body");
        AppError::BadRequest
    })
}
