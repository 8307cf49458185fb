/*
 * Responsibility
 * - Handler から見える「提示された credential」の型
 * - None は「提示なし」を表す。エラーではなく未認証として扱う
 */

/// Cookie name carrying the browser session token.
pub const SESSION_COOKIE: &str = "token";

/// Token taken from the `token` cookie, if present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(pub Option<String>);

/// Token taken from `Authorization: Bearer <token>`, if the header has exactly that shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);
