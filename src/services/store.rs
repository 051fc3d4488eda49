use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Person, PersonData, PersonFilter, PersonPage};

/// Errors that can occur when persisting people
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("person {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Persistence of person records
///
/// The store owns identity and timestamps: `create` assigns the id and sets
/// `created_at == updated_at`, `update` refreshes `updated_at` only.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn create(&self, data: &PersonData) -> Result<Person, StoreError>;

    /// Replace every mutable column of person `id`
    async fn update(&self, id: i64, data: &PersonData) -> Result<Person, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Person, StoreError>;

    /// One page of the people matching `filter`, newest first, plus the match count
    async fn list(&self, filter: &PersonFilter) -> Result<PersonPage, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
