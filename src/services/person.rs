use std::sync::Arc;
use thiserror::Error;

use crate::core::apply_enrichment;
use crate::models::{Person, PersonData, PersonFilter, PersonInput, PersonPage};
use crate::services::enrichment::Enricher;
use crate::services::store::{PersonStore, StoreError};

/// Errors surfaced by the person service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("person {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Store(other),
        }
    }
}

/// Orchestrates enrichment and persistence of people
///
/// Enrichment never fails an operation: whatever subset of fields the lookups
/// produced is applied, possibly none.
pub struct PersonService {
    store: Arc<dyn PersonStore>,
    enricher: Arc<dyn Enricher>,
}

impl PersonService {
    pub fn new(store: Arc<dyn PersonStore>, enricher: Arc<dyn Enricher>) -> Self {
        Self { store, enricher }
    }

    /// Enrich a new person by first name and persist it
    pub async fn create(&self, input: PersonInput) -> Result<Person, ServiceError> {
        tracing::info!(
            name = %input.name,
            surname = %input.surname,
            patronymic = ?input.patronymic,
            "Creating person"
        );

        let enrichment = self.enricher.enrich_person(&input.name).await;

        let mut data = PersonData::from(input);
        apply_enrichment(&mut data, &enrichment);

        let person = self.store.create(&data).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create person");
            ServiceError::from(e)
        })?;

        tracing::info!(person_id = person.id, "Created person");

        Ok(person)
    }

    /// Replace person `id` with `data`, re-enriched by its (possibly new) name.
    ///
    /// Enrichment runs on every update, so previously enriched fields are
    /// overwritten by fresh lookups even when the name did not change.
    pub async fn update(&self, id: i64, mut data: PersonData) -> Result<Person, ServiceError> {
        tracing::info!(
            person_id = id,
            name = %data.name,
            surname = %data.surname,
            "Updating person"
        );

        self.ensure_exists(id).await?;

        let enrichment = self.enricher.enrich_person(&data.name).await;
        apply_enrichment(&mut data, &enrichment);

        let person = self.store.update(id, &data).await.map_err(|e| {
            log_store_error(id, "update", &e);
            ServiceError::from(e)
        })?;

        tracing::info!(person_id = id, "Updated person");

        Ok(person)
    }

    /// Delete person `id`; a missing id is reported, not ignored
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        tracing::info!(person_id = id, "Deleting person");

        self.ensure_exists(id).await?;

        self.store.delete(id).await.map_err(|e| {
            log_store_error(id, "delete", &e);
            ServiceError::from(e)
        })?;

        tracing::info!(person_id = id, "Deleted person");

        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Person, ServiceError> {
        tracing::debug!(person_id = id, "Fetching person");

        self.store.get_by_id(id).await.map_err(|e| {
            log_store_error(id, "get_by_id", &e);
            ServiceError::from(e)
        })
    }

    pub async fn list(&self, filter: &PersonFilter) -> Result<PersonPage, ServiceError> {
        tracing::debug!(?filter, "Listing people");

        self.store.list(filter).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list people");
            ServiceError::from(e)
        })
    }

    pub async fn health_check(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        self.store.get_by_id(id).await.map(|_| ()).map_err(|e| {
            log_store_error(id, "lookup", &e);
            ServiceError::from(e)
        })
    }
}

fn log_store_error(id: i64, operation: &str, err: &StoreError) {
    match err {
        StoreError::NotFound(_) => tracing::warn!(person_id = id, operation, "Person not found"),
        _ => tracing::error!(person_id = id, operation, error = %err, "Person store failed"),
    }
}
