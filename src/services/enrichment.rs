use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::EnrichmentSettings;
use crate::models::EnrichmentResult;

/// The three name-keyed lookup services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Age,
    Gender,
    Nationality,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lookup::Age => "age",
            Lookup::Gender => "gender",
            Lookup::Nationality => "nationality",
        };
        f.write_str(name)
    }
}

/// Errors of a single lookup. They never leave this module: `enrich_person`
/// logs them and leaves the corresponding field empty.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("{lookup} lookup request failed: {source}")]
    Request {
        lookup: Lookup,
        #[source]
        source: reqwest::Error,
    },

    #[error("{lookup} lookup returned status {status}")]
    Status { lookup: Lookup, status: StatusCode },

    #[error("{lookup} lookup returned an undecodable body: {source}")]
    Decode {
        lookup: Lookup,
        #[source]
        source: reqwest::Error,
    },

    #[error("{lookup} lookup has no data for this name")]
    NoData { lookup: Lookup },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Body of the age service: `{name, age, count}`
#[derive(Debug, Clone, Deserialize)]
pub struct AgeResponse {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub count: Option<i64>,
}

/// Body of the gender service: `{name, gender, probability, count}`
#[derive(Debug, Clone, Deserialize)]
pub struct GenderResponse {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub probability: Option<f64>,
    pub count: Option<i64>,
}

/// Body of the nationality service: `{name, country: [{country_id, probability}]}`
#[derive(Debug, Clone, Deserialize)]
pub struct NationalityResponse {
    pub name: Option<String>,
    #[serde(default)]
    pub country: Vec<CountryEstimate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryEstimate {
    pub country_id: String,
    pub probability: f64,
}

/// Source of enrichment data for a first name
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Look up everything known about `name`. Never fails; a lookup that
    /// cannot answer leaves its fields as `None`.
    async fn enrich_person(&self, name: &str) -> EnrichmentResult;
}

/// HTTP client for the age, gender and nationality services
pub struct EnrichmentClient {
    client: Client,
    age_url: String,
    gender_url: String,
    nationality_url: String,
}

impl EnrichmentClient {
    /// Create a client whose requests each time out after `timeout_secs`
    pub fn new(settings: &EnrichmentSettings) -> Result<Self, EnrichmentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            age_url: settings.age_url.clone(),
            gender_url: settings.gender_url.clone(),
            nationality_url: settings.nationality_url.clone(),
        })
    }

    /// Estimated age for `name`
    pub async fn fetch_age(&self, name: &str) -> Result<i32, EnrichmentError> {
        let response: AgeResponse = self.fetch(Lookup::Age, &self.age_url, name).await?;
        response
            .age
            .filter(|age| *age >= 0)
            .ok_or(EnrichmentError::NoData { lookup: Lookup::Age })
    }

    /// Most likely gender for `name`
    pub async fn fetch_gender(&self, name: &str) -> Result<String, EnrichmentError> {
        let response: GenderResponse = self.fetch(Lookup::Gender, &self.gender_url, name).await?;
        response
            .gender
            .filter(|gender| !gender.is_empty())
            .ok_or(EnrichmentError::NoData {
                lookup: Lookup::Gender,
            })
    }

    /// Highest ranked country for `name`; the service returns countries best first
    pub async fn fetch_nationality(&self, name: &str) -> Result<CountryEstimate, EnrichmentError> {
        let response: NationalityResponse = self
            .fetch(Lookup::Nationality, &self.nationality_url, name)
            .await?;
        response
            .country
            .into_iter()
            .next()
            .ok_or(EnrichmentError::NoData {
                lookup: Lookup::Nationality,
            })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        lookup: Lookup,
        base_url: &str,
        name: &str,
    ) -> Result<T, EnrichmentError> {
        let url = format!(
            "{}?name={}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        );

        tracing::debug!("Requesting {} lookup: {}", lookup, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| EnrichmentError::Request { lookup, source })?;

        if !response.status().is_success() {
            return Err(EnrichmentError::Status {
                lookup,
                status: response.status(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| EnrichmentError::Decode { lookup, source })
    }
}

#[async_trait]
impl Enricher for EnrichmentClient {
    async fn enrich_person(&self, name: &str) -> EnrichmentResult {
        tracing::debug!(person_name = name, "Enriching person");

        let (age, gender, nationality) = tokio::join!(
            self.fetch_age(name),
            self.fetch_gender(name),
            self.fetch_nationality(name),
        );

        let mut result = EnrichmentResult::default();

        match age {
            Ok(age) => result.age = Some(age),
            Err(e) => tracing::warn!(person_name = name, error = %e, "Failed to fetch age"),
        }

        match gender {
            Ok(gender) => result.gender = Some(gender),
            Err(e) => tracing::warn!(person_name = name, error = %e, "Failed to fetch gender"),
        }

        match nationality {
            Ok(country) => {
                result.nationality = Some(country.country_id);
                result.nationality_probability = Some(country.probability);
            }
            Err(e) => tracing::warn!(person_name = name, error = %e, "Failed to fetch nationality"),
        }

        if result.is_empty() {
            tracing::debug!(person_name = name, "No enrichment data");
            return result;
        }

        tracing::debug!(
            person_name = name,
            age = ?result.age,
            gender = ?result.gender,
            nationality = ?result.nationality,
            "Enrichment finished"
        );

        result
    }
}
