use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// Person record as persisted in the `people` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    /// Probability of `nationality`, stored as text with two decimals ("0.83")
    pub nationality_probability: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonInput {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
}

/// Every mutable column of a person, i.e. a record minus identity and timestamps.
///
/// Used as the payload for both inserts and full-replacement updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonData {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub nationality_probability: Option<String>,
}

impl From<PersonInput> for PersonData {
    fn from(input: PersonInput) -> Self {
        Self {
            name: input.name,
            surname: input.surname,
            patronymic: input.patronymic,
            ..Self::default()
        }
    }
}

/// Filter and pagination for listing people
///
/// Text filters on name, surname and patronymic are case-insensitive substring
/// matches; gender and nationality must match exactly; the age bounds are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub age_from: Option<i32>,
    pub age_to: Option<i32>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for PersonFilter {
    fn default() -> Self {
        Self {
            name: None,
            surname: None,
            patronymic: None,
            gender: None,
            nationality: None,
            age_from: None,
            age_to: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PersonFilter {
    /// Page and page size with out-of-range values replaced by the defaults
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

/// One page of a filtered listing plus the number of rows matching the filter
#[derive(Debug, Clone, PartialEq)]
pub struct PersonPage {
    pub people: Vec<Person>,
    pub total: i64,
}

/// Aggregated answers of the age, gender and nationality lookups.
///
/// Each field is `None` when its lookup failed or had no answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResult {
    pub age: Option<i32>,
    pub gender: Option<String>,
    /// Country code of the highest ranked nationality
    pub nationality: Option<String>,
    pub nationality_probability: Option<f64>,
}

impl EnrichmentResult {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.gender.is_none() && self.nationality.is_none()
    }
}
