use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub enrichment: EnrichmentSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Full connection string; takes precedence over the individual parts below
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub statement_timeout_secs: u64,
}

impl DatabaseSettings {
    /// Connection string, either `url` or assembled from host, port, credentials and name
    pub fn connection_url(&self) -> String {
        match self.url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.to_string(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                urlencoding::encode(&self.user),
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.name,
                self.ssl_mode
            ),
        }
    }
}

/// Base URLs of the three lookup services
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentSettings {
    pub age_url: String,
    pub gender_url: String,
    pub nationality_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

/// Plain environment variables understood in addition to the `PEOPLE_` prefixed ones
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_SSL_MODE", "database.ssl_mode"),
    ("DB_MAX_CONNECTIONS", "database.max_connections"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("LOG_LEVEL", "logging.level"),
    ("AGE_API_URL", "enrichment.age_url"),
    ("GENDER_API_URL", "enrichment.gender_url"),
    ("NATIONALITY_API_URL", "enrichment.nationality_url"),
];

impl Settings {
    /// Load configuration from files and the process environment
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables prefixed with PEOPLE_
    ///    e.g., PEOPLE_SERVER__PORT -> server.port
    /// 4. Plain variables such as DATABASE_URL or LOG_LEVEL
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(std::env::vars().collect())
    }

    /// Load configuration using `env` in place of the process environment
    pub fn from_env(env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut builder = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("PEOPLE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            );

        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = env.get(*var).filter(|v| !v.is_empty()) {
                builder = builder.set_override(*key, value.as_str())?;
            }
        }

        builder.build()?.try_deserialize()
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432)?
        .set_default("database.user", "postgres")?
        .set_default("database.password", "")?
        .set_default("database.name", "people_enricher")?
        .set_default("database.ssl_mode", "disable")?
        .set_default("database.max_connections", 10)?
        .set_default("database.min_connections", 1)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("database.idle_timeout_secs", 600)?
        .set_default("database.max_lifetime_secs", 300)?
        .set_default("database.statement_timeout_secs", 10)?
        .set_default("enrichment.age_url", "https://api.agify.io")?
        .set_default("enrichment.gender_url", "https://api.genderize.io")?
        .set_default("enrichment.nationality_url", "https://api.nationalize.io")?
        .set_default("enrichment.timeout_secs", 10)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "json")
}
