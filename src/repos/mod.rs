/*
 * Responsibility
 * - 外部ストア (identity store) へのアクセスを束ねる
 */
pub mod error;
pub mod user_repo;
