/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError / ExecError / 直列化失敗 を wire の形に変換する
 *
 * Wire 形式
 * - 400: {"error": "bad request"}
 * - 401: {"err": "<認証失敗の種類ごとの固定メッセージ>"}
 * - 500: {"error": "<message>"}
 * - query レベルの errors は 200 のまま envelope に載る (ここは通らない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::graphql::ExecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct AuthErrorResponse {
    pub err: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request")]
    BadRequest,
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Encoding(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn encoding(e: impl std::fmt::Display) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<ExecError> for AppError {
    fn from(e: ExecError) -> Self {
        match e {
            ExecError::Auth(err) => AppError::Unauthorized(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(err) => {
                let body = AuthErrorResponse {
                    err: err.to_string(),
                };
                return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Encoding(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
