//! People Enricher - CRUD service for person records
//!
//! New and updated records are enriched with age, gender and nationality
//! estimates looked up by first name from three independent public services.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use models::{EnrichmentResult, Person, PersonData, PersonFilter, PersonInput, PersonPage};
pub use services::{Enricher, EnrichmentClient, PersonService, PersonStore, PostgresStore};
