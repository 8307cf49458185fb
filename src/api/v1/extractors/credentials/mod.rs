/*!
 * Credential extractors
 *
 * Responsibility:
 * - リクエストから session token を取り出して handler に渡す (検証はしない)
 * - cookie 経由 (ブラウザ) と Authorization ヘッダ経由 (API クライアント) の二通り
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - SessionCookie
 * - BearerToken
 */

mod core;
mod types;

pub use types::{BearerToken, SESSION_COOKIE, SessionCookie};
