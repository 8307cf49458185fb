/*
 * Responsibility
 * - /auth/me, /auth/verify の response DTO
 * - 失敗時も boolean フラグだけを返す (理由は返さない)
 */
use serde::Serialize;

use crate::services::auth::UserProfile;

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<UserProfile> for SessionUser {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            role: p.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
}

impl MeResponse {
    pub fn authenticated(user: impl Into<SessionUser>) -> Self {
        Self {
            authenticated: true,
            user: Some(user.into()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
}
