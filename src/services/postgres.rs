use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::core::query;
use crate::models::{Person, PersonData, PersonFilter, PersonPage};
use crate::services::store::{PersonStore, StoreError};

/// PostgreSQL-backed person store
///
/// Rows live in the `people` table created by the bundled migrations.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect using the database settings and run pending migrations
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let options = PgConnectOptions::from_str(&settings.connection_url())?.options([(
            "statement_timeout",
            format!("{}s", settings.statement_timeout_secs),
        )]);

        tracing::info!(
            "Connecting to PostgreSQL (max: {}, min: {} connections)",
            settings.max_connections,
            settings.min_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running migrations on it first
    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl PersonStore for PostgresStore {
    async fn create(&self, data: &PersonData) -> Result<Person, StoreError> {
        let query = r#"
            INSERT INTO people (
                name, surname, patronymic, age, gender, nationality,
                nationality_probability, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, name, surname, patronymic, age, gender, nationality,
                      nationality_probability, created_at, updated_at
        "#;

        let person = sqlx::query_as::<_, Person>(query)
            .bind(&data.name)
            .bind(&data.surname)
            .bind(&data.patronymic)
            .bind(data.age)
            .bind(&data.gender)
            .bind(&data.nationality)
            .bind(&data.nationality_probability)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "create", error = %e, "Failed to insert person");
                StoreError::from(e)
            })?;

        tracing::debug!(person_id = person.id, "Inserted person");

        Ok(person)
    }

    /// `updated_at` is pushed at least one microsecond past its previous value so
    /// it strictly increases even when two updates land in the same clock tick.
    async fn update(&self, id: i64, data: &PersonData) -> Result<Person, StoreError> {
        let query = r#"
            UPDATE people
            SET name = $1,
                surname = $2,
                patronymic = $3,
                age = $4,
                gender = $5,
                nationality = $6,
                nationality_probability = $7,
                updated_at = GREATEST($8, updated_at + INTERVAL '1 microsecond')
            WHERE id = $9
            RETURNING id, name, surname, patronymic, age, gender, nationality,
                      nationality_probability, created_at, updated_at
        "#;

        let person = sqlx::query_as::<_, Person>(query)
            .bind(&data.name)
            .bind(&data.surname)
            .bind(&data.patronymic)
            .bind(data.age)
            .bind(&data.gender)
            .bind(&data.nationality)
            .bind(&data.nationality_probability)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "update", person_id = id, error = %e, "Failed to update person");
                StoreError::from(e)
            })?;

        match person {
            Some(person) => {
                tracing::debug!(person_id = id, "Updated person");
                Ok(person)
            }
            None => {
                tracing::warn!(operation = "update", person_id = id, "Person not found");
                Err(StoreError::NotFound(id))
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "delete", person_id = id, error = %e, "Failed to delete person");
                StoreError::from(e)
            })?;

        if result.rows_affected() == 0 {
            tracing::warn!(operation = "delete", person_id = id, "Person not found");
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!(person_id = id, "Deleted person");

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Person, StoreError> {
        let query = r#"
            SELECT id, name, surname, patronymic, age, gender, nationality,
                   nationality_probability, created_at, updated_at
            FROM people
            WHERE id = $1
        "#;

        sqlx::query_as::<_, Person>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "get_by_id", person_id = id, error = %e, "Failed to fetch person");
                StoreError::from(e)
            })?
            .ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, filter: &PersonFilter) -> Result<PersonPage, StoreError> {
        let predicates = query::predicates(filter);
        let pagination = filter.pagination();

        let mut count = query::count_query(&predicates);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "list", error = %e, "Failed to count people");
                StoreError::from(e)
            })?;

        let mut page = query::page_query(&predicates, pagination);
        let people: Vec<Person> = page
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(operation = "list", error = %e, "Failed to fetch people page");
                StoreError::from(e)
            })?;

        tracing::debug!(
            total,
            count = people.len(),
            page = pagination.page,
            page_size = pagination.page_size,
            offset = pagination.offset(),
            "Listed people"
        );

        Ok(PersonPage { people, total })
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
