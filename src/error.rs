/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - HTTP status への対応付け (status())
 * - TokenError / ResolveError を統一的に変換
 * - IntoResponse 実装 (session 系以外の route 向け JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::{ResolveError, TokenError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("server misconfigured: {0}")]
    Misconfigured(&'static str),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Misconfigured(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Unauthorized => ("UNAUTHORIZED", "unauthorized".to_string()),
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found.")),
            // 設定不備の詳細はログにだけ出す
            AppError::Misconfigured(_) | AppError::Internal => {
                ("INTERNAL_SERVER_ERROR", "internal server error".to_string())
            }
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            // Server-side config error, must not look like an ordinary 401
            TokenError::MissingSecret => AppError::Misconfigured("JWT_SECRET"),
            TokenError::Expired
            | TokenError::BadSignature
            | TokenError::Malformed(_)
            | TokenError::MissingSubject => AppError::Unauthorized,
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound => AppError::not_found("user"),
            // A signed token carrying a non-UUID subject is an issuer bug, not a client error
            ResolveError::InvalidSubject(_) | ResolveError::Store(_) => AppError::Internal,
        }
    }
}
