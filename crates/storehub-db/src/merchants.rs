//! Database operations for the `merchants` table.

use sqlx::PgPool;
use storehub_core::{Merchant, MerchantFilter, Status};

use crate::DbError;

/// A row from the `merchants` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MerchantRow {
    pub id: i64,
    pub name: String,
    pub status: String,
}

impl TryFrom<MerchantRow> for Merchant {
    type Error = DbError;

    fn try_from(row: MerchantRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<Status>()
            .map_err(|_| DbError::InvalidValue {
                column: "merchants.status",
                value: row.status.clone(),
            })?;
        Ok(Merchant {
            id: row.id,
            name: row.name,
            status,
        })
    }
}

/// Returns merchants matching `filter`, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_merchants(
    pool: &PgPool,
    filter: &MerchantFilter,
) -> Result<Vec<MerchantRow>, DbError> {
    let rows = sqlx::query_as::<_, MerchantRow>(
        "SELECT id, name, status \
         FROM merchants \
         WHERE ($1::BIGINT IS NULL OR id = $1) \
           AND ($2::TEXT IS NULL OR status = $2) \
         ORDER BY id",
    )
    .bind(filter.merchant_id)
    .bind(filter.status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single merchant by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_merchant_by_id(pool: &PgPool, id: i64) -> Result<Option<MerchantRow>, DbError> {
    let row = sqlx::query_as::<_, MerchantRow>(
        "SELECT id, name, status FROM merchants WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
