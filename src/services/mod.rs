// Service exports
pub mod enrichment;
pub mod person;
pub mod postgres;
pub mod store;

pub use enrichment::{Enricher, EnrichmentClient, EnrichmentError};
pub use person::{PersonService, ServiceError};
pub use postgres::PostgresStore;
pub use store::{PersonStore, StoreError};
