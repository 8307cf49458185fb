/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認証は middleware ではなく handler 側 (extractor + SessionService) で扱う
 */
pub mod cors;
pub mod http;
pub mod security_headers;
