// Shared fixtures for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use people_enricher::models::{EnrichmentResult, Person, PersonData, PersonFilter, PersonPage};
use people_enricher::services::{Enricher, PersonStore, StoreError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// In-memory person store with the same filter and ordering rules as PostgreSQL
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    people: BTreeMap<i64, Person>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.people.len()
    }
}

fn contains(haystack: &Option<String>, needle: &Option<String>) -> bool {
    match (haystack, needle) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(h), Some(n)) => h.to_lowercase().contains(&n.to_lowercase()),
    }
}

fn equals(value: &Option<String>, wanted: &Option<String>) -> bool {
    wanted.is_none() || value == wanted
}

fn matches(person: &Person, filter: &PersonFilter) -> bool {
    let age_ok = match (person.age, filter.age_from, filter.age_to) {
        (_, None, None) => true,
        (None, _, _) => false,
        (Some(age), from, to) => from.map_or(true, |f| age >= f) && to.map_or(true, |t| age <= t),
    };

    contains(&Some(person.name.clone()), &filter.name)
        && contains(&Some(person.surname.clone()), &filter.surname)
        && contains(&person.patronymic, &filter.patronymic)
        && equals(&person.gender, &filter.gender)
        && equals(&person.nationality, &filter.nationality)
        && age_ok
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn create(&self, data: &PersonData) -> Result<Person, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let now = Utc::now();
        let person = Person {
            id: inner.next_id,
            name: data.name.clone(),
            surname: data.surname.clone(),
            patronymic: data.patronymic.clone(),
            age: data.age,
            gender: data.gender.clone(),
            nationality: data.nationality.clone(),
            nationality_probability: data.nationality_probability.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update(&self, id: i64, data: &PersonData) -> Result<Person, StoreError> {
        let mut inner = self.inner.lock().await;
        let person = inner.people.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        person.name = data.name.clone();
        person.surname = data.surname.clone();
        person.patronymic = data.patronymic.clone();
        person.age = data.age;
        person.gender = data.gender.clone();
        person.nationality = data.nationality.clone();
        person.nationality_probability = data.nationality_probability.clone();
        person.updated_at = Utc::now().max(person.updated_at + Duration::microseconds(1));
        Ok(person.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        inner.people.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    async fn get_by_id(&self, id: i64) -> Result<Person, StoreError> {
        let inner = self.inner.lock().await;
        inner.people.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, filter: &PersonFilter) -> Result<PersonPage, StoreError> {
        let inner = self.inner.lock().await;
        let pagination = filter.pagination();
        let matching: Vec<&Person> = inner
            .people
            .values()
            .rev()
            .filter(|p| matches(p, filter))
            .collect();

        let people = matching
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .map(|p| (*p).clone())
            .collect();

        Ok(PersonPage {
            people,
            total: matching.len() as i64,
        })
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Store whose every call fails with a database error
pub struct FailingStore;

#[async_trait]
impl PersonStore for FailingStore {
    async fn create(&self, _data: &PersonData) -> Result<Person, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _data: &PersonData) -> Result<Person, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_id(&self, _id: i64) -> Result<Person, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self, _filter: &PersonFilter) -> Result<PersonPage, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Enricher returning a fixed result and counting its calls
pub struct StaticEnricher {
    result: EnrichmentResult,
    calls: AtomicUsize,
    names: std::sync::Mutex<Vec<String>>,
}

impl StaticEnricher {
    pub fn new(result: EnrichmentResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            names: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// An enricher for which every lookup failed
    pub fn empty() -> Self {
        Self::new(EnrichmentResult::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl Enricher for StaticEnricher {
    async fn enrich_person(&self, name: &str) -> EnrichmentResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(name.to_string());
        self.result.clone()
    }
}

pub fn ivan_enrichment() -> EnrichmentResult {
    EnrichmentResult {
        age: Some(42),
        gender: Some("male".to_string()),
        nationality: Some("RU".to_string()),
        nationality_probability: Some(0.83),
    }
}

pub fn person_data(name: &str, surname: &str, age: Option<i32>) -> PersonData {
    PersonData {
        name: name.to_string(),
        surname: surname.to_string(),
        age,
        ..PersonData::default()
    }
}
