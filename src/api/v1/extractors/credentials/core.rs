use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use axum_extra::extract::cookie::CookieJar;

use super::{BearerToken, SESSION_COOKIE, SessionCookie};

/// `Authorization: Bearer <token>` から token を取り出す
/// scheme は大文字小文字を区別し、区切りは半角スペース 1 つのみ
/// 形が合わないものはすべて「提示なし」(None)
pub(crate) fn bearer_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }

    Some(token.to_string())
}

pub(crate) fn session_from_headers(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let value = jar.get(SESSION_COOKIE)?.value();

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}

// Neither extractor rejects; absence is decided by the handler.
impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionCookie(session_from_headers(&parts.headers)))
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(BearerToken(bearer_from_headers(&parts.headers)))
    }
}
