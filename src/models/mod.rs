// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{EnrichmentResult, Person, PersonData, PersonFilter, PersonInput, PersonPage};
pub use requests::{CreatePersonRequest, ListPersonsQuery, UpdatePersonRequest};
pub use responses::{ErrorResponse, HealthResponse, PaginatedResponse};
