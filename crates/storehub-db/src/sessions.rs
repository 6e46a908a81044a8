//! Access-token resolution against `account_sessions`.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use storehub_core::{AccountInfo, CollaboratorError, SessionResolver};

use crate::DbError;

/// Digest under which an access token is stored: hex SHA-256 of `salt:token`.
#[must_use]
pub fn hash_token(salt: &str, token: &str) -> String {
    let input = format!("{salt}:{token}");
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SessionAccountRow {
    id: i64,
    account_name: String,
    merchant_id: Option<i64>,
}

/// Looks up the enabled account behind an unexpired session token.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_account_by_token_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<AccountInfo>, DbError> {
    let row = sqlx::query_as::<_, SessionAccountRow>(
        "SELECT a.id, a.account_name, a.merchant_id \
         FROM account_sessions s \
         JOIN accounts a ON a.id = s.account_id \
         WHERE s.token_hash = $1 \
           AND s.expires_at > NOW() \
           AND a.status = 'A'",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| AccountInfo {
        id: r.id,
        account_name: r.account_name,
        merchant_id: r.merchant_id,
    }))
}

/// [`SessionResolver`] backed by the `account_sessions` table.
#[derive(Clone)]
pub struct PgSessionResolver {
    pool: PgPool,
    salt: String,
}

impl PgSessionResolver {
    #[must_use]
    pub fn new(pool: PgPool, salt: impl Into<String>) -> Self {
        Self {
            pool,
            salt: salt.into(),
        }
    }
}

#[async_trait]
impl SessionResolver for PgSessionResolver {
    async fn resolve(&self, token: &str) -> Result<Option<AccountInfo>, CollaboratorError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }
        find_account_by_token_hash(&self.pool, &hash_token(&self.salt, token))
            .await
            .map_err(CollaboratorError::session)
    }
}
