//! Write operations for the `stores` table.

use sqlx::{PgPool, Postgres, Transaction};
use storehub_core::{Status, StoreRecord, YesOrNo};

use super::types::StoreRow;
use super::STORE_COLUMNS;
use crate::DbError;

/// Inserts a new store and returns the stored row.
///
/// When the new store is flagged default, every other store of the same
/// merchant loses the flag in the same transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, including unique-name violations.
pub async fn insert_store(pool: &PgPool, record: &StoreRecord) -> Result<StoreRow, DbError> {
    let mut tx = pool.begin().await?;

    let sql = format!(
        "INSERT INTO stores \
           (merchant_id, name, contact, phone, description, is_default, address, hours, \
            latitude, longitude, status, wx_mch_id, wx_api_v2, operator) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
         RETURNING {STORE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(record.merchant_id)
        .bind(&record.name)
        .bind(&record.contact)
        .bind(&record.phone)
        .bind(&record.description)
        .bind(record.is_default.as_str())
        .bind(&record.address)
        .bind(&record.hours)
        .bind(&record.latitude)
        .bind(&record.longitude)
        .bind(record.status.as_str())
        .bind(&record.wx_mch_id)
        .bind(&record.wx_api_v2)
        .bind(&record.operator)
        .fetch_one(&mut *tx)
        .await?;

    if record.is_default == YesOrNo::Yes {
        clear_other_defaults(&mut tx, row.merchant_id, row.id).await?;
    }

    tx.commit().await?;
    Ok(row)
}

/// Overwrites every editable column of an existing store.
///
/// `merchant_id = None` keeps the current owner. `Some(merchant_id)` only
/// matches a store that merchant already owns. Returns `None` when no store
/// matches.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, including unique-name violations.
pub async fn update_store(
    pool: &PgPool,
    store_id: i64,
    record: &StoreRecord,
) -> Result<Option<StoreRow>, DbError> {
    let mut tx = pool.begin().await?;

    let sql = format!(
        "UPDATE stores SET \
             name = $3, contact = $4, phone = $5, description = $6, is_default = $7, \
             address = $8, hours = $9, latitude = $10, longitude = $11, status = $12, \
             wx_mch_id = $13, wx_api_v2 = $14, operator = $15, update_time = NOW() \
         WHERE id = $1 AND ($2::BIGINT IS NULL OR merchant_id = $2) \
         RETURNING {STORE_COLUMNS}"
    );
    let row = sqlx::query_as::<_, StoreRow>(&sql)
        .bind(store_id)
        .bind(record.merchant_id)
        .bind(&record.name)
        .bind(&record.contact)
        .bind(&record.phone)
        .bind(&record.description)
        .bind(record.is_default.as_str())
        .bind(&record.address)
        .bind(&record.hours)
        .bind(&record.latitude)
        .bind(&record.longitude)
        .bind(record.status.as_str())
        .bind(&record.wx_mch_id)
        .bind(&record.wx_api_v2)
        .bind(&record.operator)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(None);
    };

    if record.is_default == YesOrNo::Yes {
        clear_other_defaults(&mut tx, row.merchant_id, row.id).await?;
    }

    tx.commit().await?;
    Ok(Some(row))
}

/// Sets a store's status and stamps the operator.
///
/// Returns the number of rows affected (0 when the store does not exist).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn update_store_status(
    pool: &PgPool,
    store_id: i64,
    operator: &str,
    status: Status,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "UPDATE stores \
         SET status = $1, operator = $2, update_time = NOW() \
         WHERE id = $3",
    )
    .bind(status.as_str())
    .bind(operator)
    .bind(store_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

async fn clear_other_defaults(
    tx: &mut Transaction<'_, Postgres>,
    merchant_id: Option<i64>,
    keep_id: i64,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE stores SET is_default = 'N', update_time = NOW() \
         WHERE merchant_id IS NOT DISTINCT FROM $1 AND id <> $2 AND is_default = 'Y'",
    )
    .bind(merchant_id)
    .bind(keep_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
