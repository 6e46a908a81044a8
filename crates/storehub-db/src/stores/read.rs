//! Read operations for the `stores` table.

use sqlx::PgPool;
use storehub_core::{PageRequest, StoreFilter};

use super::types::StoreRow;
use super::{contains_pattern, FILTER_CLAUSE, STORE_COLUMNS};
use crate::DbError;

/// Returns one page of stores matching `filter`, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_stores_page(
    pool: &PgPool,
    filter: &StoreFilter,
    page: PageRequest,
) -> Result<Vec<StoreRow>, DbError> {
    let sql = format!(
        "SELECT {STORE_COLUMNS} FROM stores {FILTER_CLAUSE} \
         ORDER BY id DESC \
         LIMIT $5 OFFSET $6"
    );
    let rows = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(filter.id)
        .bind(filter.name.as_deref().map(contains_pattern))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.merchant_id)
        .bind(page.page_size)
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Counts stores matching `filter`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_stores(pool: &PgPool, filter: &StoreFilter) -> Result<i64, DbError> {
    let sql = format!("SELECT COUNT(*) FROM stores {FILTER_CLAUSE}");
    let total = sqlx::query_scalar::<_, i64>(&sql)
        .bind(filter.id)
        .bind(filter.name.as_deref().map(contains_pattern))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.merchant_id)
        .fetch_one(pool)
        .await?;

    Ok(total)
}

/// Returns every store matching `filter`, default store first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_stores(pool: &PgPool, filter: &StoreFilter) -> Result<Vec<StoreRow>, DbError> {
    let sql = format!(
        "SELECT {STORE_COLUMNS} FROM stores {FILTER_CLAUSE} \
         ORDER BY is_default DESC, id"
    );
    let rows = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(filter.id)
        .bind(filter.name.as_deref().map(contains_pattern))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.merchant_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Returns the store with exactly this name, whatever its status.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_store_by_name(pool: &PgPool, name: &str) -> Result<Option<StoreRow>, DbError> {
    let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE name = $1");
    let row = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns a single store by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_store_by_id(pool: &PgPool, id: i64) -> Result<Option<StoreRow>, DbError> {
    let sql = format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = $1");
    let row = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
