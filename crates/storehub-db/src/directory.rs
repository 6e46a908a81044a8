//! [`StoreDirectory`] implementation over the Postgres tables.

use async_trait::async_trait;
use sqlx::PgPool;
use storehub_core::{
    CollaboratorError, Merchant, MerchantFilter, PageRequest, Paginated, Status, Store,
    StoreDirectory, StoreFilter, StoreRecord,
};

use crate::{merchants, stores, DbError};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStoreDirectory {
    pool: PgPool,
}

impl PgStoreDirectory {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn directory_error(e: DbError) -> CollaboratorError {
    CollaboratorError::directory(e)
}

fn map_write_error(name: &str, e: DbError) -> CollaboratorError {
    if let DbError::Sqlx(sqlx::Error::Database(db_err)) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return CollaboratorError::DuplicateName(name.to_owned());
        }
    }
    directory_error(e)
}

fn into_stores(rows: Vec<stores::StoreRow>) -> Result<Vec<Store>, CollaboratorError> {
    rows.into_iter()
        .map(|row| Store::try_from(row).map_err(directory_error))
        .collect()
}

#[async_trait]
impl StoreDirectory for PgStoreDirectory {
    async fn query_paginated(
        &self,
        filter: &StoreFilter,
        page: PageRequest,
    ) -> Result<Paginated<Store>, CollaboratorError> {
        let total = stores::count_stores(&self.pool, filter)
            .await
            .map_err(directory_error)?;
        let rows = stores::list_stores_page(&self.pool, filter, page)
            .await
            .map_err(directory_error)?;
        Ok(Paginated::new(into_stores(rows)?, total, page))
    }

    async fn query_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Store>, CollaboratorError> {
        let rows = stores::list_stores(&self.pool, filter)
            .await
            .map_err(directory_error)?;
        into_stores(rows)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Store>, CollaboratorError> {
        stores::get_store_by_name(&self.pool, name)
            .await
            .map_err(directory_error)?
            .map(|row| Store::try_from(row).map_err(directory_error))
            .transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, CollaboratorError> {
        stores::get_store_by_id(&self.pool, id)
            .await
            .map_err(directory_error)?
            .map(|row| Store::try_from(row).map_err(directory_error))
            .transpose()
    }

    async fn save_store(&self, record: StoreRecord) -> Result<Store, CollaboratorError> {
        let row = match record.id {
            Some(id) => stores::update_store(&self.pool, id, &record)
                .await
                .map_err(|e| map_write_error(&record.name, e))?
                .ok_or(CollaboratorError::StoreNotFound(id))?,
            None => stores::insert_store(&self.pool, &record)
                .await
                .map_err(|e| map_write_error(&record.name, e))?,
        };
        tracing::info!(store_id = row.id, operator = %record.operator, "store saved");
        Store::try_from(row).map_err(directory_error)
    }

    async fn update_status(
        &self,
        id: i64,
        operator: &str,
        status: Status,
    ) -> Result<(), CollaboratorError> {
        let affected = stores::update_store_status(&self.pool, id, operator, status)
            .await
            .map_err(directory_error)?;
        if affected == 0 {
            return Err(CollaboratorError::StoreNotFound(id));
        }
        tracing::info!(store_id = id, %operator, %status, "store status updated");
        Ok(())
    }

    async fn list_merchants(
        &self,
        filter: &MerchantFilter,
    ) -> Result<Vec<Merchant>, CollaboratorError> {
        merchants::list_merchants(&self.pool, filter)
            .await
            .map_err(directory_error)?
            .into_iter()
            .map(|row| Merchant::try_from(row).map_err(directory_error))
            .collect()
    }

    async fn find_merchant(&self, id: i64) -> Result<Option<Merchant>, CollaboratorError> {
        merchants::get_merchant_by_id(&self.pool, id)
            .await
            .map_err(directory_error)?
            .map(|row| Merchant::try_from(row).map_err(directory_error))
            .transpose()
    }
}
