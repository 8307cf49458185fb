/*
 * Responsibility
 * - users テーブルの読み取り (主キー検索のみ、書き込みはしない)
 * - UserStore trait を境界にして、service 側は PgPool を直接知らない
 * - DB エラーは RepoError に変換して返す
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

const FIND_BY_ID_SQL: &str = r#"
    SELECT id, email, name, role
    FROM users
    WHERE id = $1
"#;

/// The columns of a stored user that this service reads.
///
/// The table holds more (password hash, timestamps); the query never selects
/// them, so they cannot leak through the profile.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Identity store lookup used by the identity resolver.
///
/// Implementations must be shareable across requests (`Arc<dyn UserStore>`).
#[async_trait]
pub trait UserStore: Send + Sync {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Find one user by primary key.
    //
    // Returns:
    // - `Ok(Some(row))` if the user exists
    // - `Ok(None)` if no such user
    // - `Err(_)` on backend failure
    async fn find_by_id(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_id(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(FIND_BY_ID_SQL)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::Db)?;

        Ok(row)
    }
}
