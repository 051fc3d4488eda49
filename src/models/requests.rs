use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::core::pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::models::domain::{PersonData, PersonFilter, PersonInput};

/// Body of `POST /persons`
///
/// `name` and `surname` are trimmed on the way in, so whitespace alone fails the
/// required-field check the same way an empty string does.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, message = "name is required"))]
    #[serde(default, deserialize_with = "trimmed")]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    #[serde(default, deserialize_with = "trimmed")]
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
}

impl From<CreatePersonRequest> for PersonInput {
    fn from(req: CreatePersonRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: non_empty(req.patronymic),
        }
    }
}

/// Body of `PUT /persons/{id}`: the full replacement record.
///
/// An `id` in the body is accepted and ignored; the path decides which record changes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "name is required"))]
    #[serde(default, deserialize_with = "trimmed")]
    pub name: String,
    #[validate(length(min = 1, message = "surname is required"))]
    #[serde(default, deserialize_with = "trimmed")]
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[validate(range(min = 0, message = "age must not be negative"))]
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub nationality_probability: Option<String>,
}

impl From<UpdatePersonRequest> for PersonData {
    fn from(req: UpdatePersonRequest) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: non_empty(req.patronymic),
            age: req.age,
            gender: non_empty(req.gender),
            nationality: non_empty(req.nationality),
            nationality_probability: non_empty(req.nationality_probability),
        }
    }
}

/// Query string of `GET /persons`
///
/// Empty values (`?name=`) count as absent. Numeric values that do not parse are
/// dropped as well, so the listing never fails on a malformed filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPersonsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub surname: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub patronymic: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub nationality: Option<String>,
    #[serde(default, alias = "age_from", deserialize_with = "unparsable_as_none")]
    pub age_min: Option<i32>,
    #[serde(default, alias = "age_to", deserialize_with = "unparsable_as_none")]
    pub age_max: Option<i32>,
    #[serde(default, deserialize_with = "unparsable_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "unparsable_as_none")]
    pub page_size: Option<i64>,
}

impl From<ListPersonsQuery> for PersonFilter {
    fn from(query: ListPersonsQuery) -> Self {
        let pagination = Pagination::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        Self {
            name: query.name,
            surname: query.surname,
            patronymic: query.patronymic,
            gender: query.gender,
            nationality: query.nationality,
            age_from: query.age_min,
            age_to: query.age_max,
            page: pagination.page,
            page_size: pagination.page_size,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deserialize a required string field with surrounding whitespace removed
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

/// Deserialize a text query value, treating an empty string like a missing parameter
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

/// Deserialize a numeric query value; empty or unparsable input counts as absent
fn unparsable_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let value = raw.as_deref().map(str::trim).filter(|v| !v.is_empty());

    Ok(value.and_then(|v| match v.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::debug!(value = v, "Ignoring unparsable numeric query value");
            None
        }
    }))
}
