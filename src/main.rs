use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use people_enricher::config::{LoggingSettings, Settings};
use people_enricher::routes::{self, AppState};
use people_enricher::services::{EnrichmentClient, PersonService, PostgresStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber described by the logging settings
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(logging.level.trim().to_lowercase())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing_subscriber::fmt().init();
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting People Enricher service...");

    let store = PostgresStore::connect(&settings.database).await.map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        std::io::Error::other(format!("PostgreSQL connection error: {}", e))
    })?;

    info!("PostgreSQL store initialized");

    let enricher = EnrichmentClient::new(&settings.enrichment).map_err(|e| {
        error!("Failed to create enrichment client: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!(
        age_url = %settings.enrichment.age_url,
        gender_url = %settings.enrichment.gender_url,
        nationality_url = %settings.enrichment.nationality_url,
        "Enrichment client initialized"
    );

    let app_state = AppState {
        persons: Arc::new(PersonService::new(Arc::new(store), Arc::new(enricher))),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
