//! Collaborator contracts consumed by the store admin endpoints.
//!
//! The server holds each collaborator as an `Arc<dyn Trait>`; the Postgres and
//! HTTP implementations live in `storehub-db` and `storehub-geo`.

use async_trait::async_trait;
use thiserror::Error;

use crate::store::{
    AccountInfo, Merchant, MerchantFilter, PageRequest, Paginated, Status, Store, StoreFilter,
    StoreRecord,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("store directory failure: {0}")]
    Directory(#[source] BoxError),

    /// The directory refused a write because another store already uses the name.
    #[error("store name '{0}' already exists")]
    DuplicateName(String),

    #[error("store {0} does not exist")]
    StoreNotFound(i64),

    #[error("session lookup failure: {0}")]
    Session(#[source] BoxError),

    #[error("geocoding failure: {0}")]
    Geocoding(#[source] BoxError),
}

impl CollaboratorError {
    pub fn directory(err: impl Into<BoxError>) -> Self {
        Self::Directory(err.into())
    }

    pub fn session(err: impl Into<BoxError>) -> Self {
        Self::Session(err.into())
    }

    pub fn geocoding(err: impl Into<BoxError>) -> Self {
        Self::Geocoding(err.into())
    }
}

/// Maps an opaque access token to the account behind it.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Returns `None` for unknown or expired tokens.
    async fn resolve(&self, token: &str) -> Result<Option<AccountInfo>, CollaboratorError>;
}

/// Persistence-backed access to store and merchant records.
#[async_trait]
pub trait StoreDirectory: Send + Sync {
    async fn query_paginated(
        &self,
        filter: &StoreFilter,
        page: PageRequest,
    ) -> Result<Paginated<Store>, CollaboratorError>;

    async fn query_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Store>, CollaboratorError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Store>, CollaboratorError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Store>, CollaboratorError>;

    /// Inserts when `record.id` is `None`, otherwise updates; returns the stored row.
    ///
    /// An update that matches no store, or a store owned by another merchant,
    /// fails with [`CollaboratorError::StoreNotFound`].
    async fn save_store(&self, record: StoreRecord) -> Result<Store, CollaboratorError>;

    async fn update_status(
        &self,
        id: i64,
        operator: &str,
        status: Status,
    ) -> Result<(), CollaboratorError>;

    async fn list_merchants(
        &self,
        filter: &MerchantFilter,
    ) -> Result<Vec<Merchant>, CollaboratorError>;

    async fn find_merchant(&self, id: i64) -> Result<Option<Merchant>, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Resolves a free-text address to coordinates.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<LatLng, CollaboratorError>;
}

/// Neutralizes markup and script content in user-supplied text.
pub trait InputSanitizer: Send + Sync {
    fn sanitize(&self, input: &str) -> String;
}
