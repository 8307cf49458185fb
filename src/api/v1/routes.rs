/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth/me (cookie), /auth/verify (Bearer)
 * - 未定義の path は JSON の 404 を返す
 */
use axum::{Router, routing::get};

use crate::error::AppError;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    session::{me, verify},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/me", get(me))
        .route("/auth/verify", get(verify))
        .fallback(|| async { AppError::not_found("route") })
}
