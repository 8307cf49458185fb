use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRow, UserStore};
use crate::services::auth::session_jwt::SessionClaims;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("token subject is not a valid user id: {0}")]
    InvalidSubject(String),
    #[error("no user for token subject")]
    NotFound,
    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Outward-facing projection of a stored user.
///
/// Exactly these four fields leave the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.to_string(),
            email: row.email,
            name: row.name,
            role: row.role,
        }
    }
}

/// Resolves the subject of a verified token to a currently existing user.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("store", &self.store.backend_name())
            .finish()
    }
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn resolve(&self, claims: &SessionClaims) -> Result<UserProfile, ResolveError> {
        let user_id = claims
            .user_id
            .as_str()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| ResolveError::InvalidSubject(claims.user_id.to_string()))?;

        let row = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(ResolveError::NotFound)?;

        Ok(row.into())
    }
}
