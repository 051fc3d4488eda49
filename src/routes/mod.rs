// Route exports
pub mod error;
pub mod health;
pub mod persons;

use actix_web::web;

pub use error::ApiError;
pub use persons::AppState;

/// Register every route together with the extractor error handlers
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(error::handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(error::handle_path_error))
        .configure(health::configure)
        .configure(persons::configure);
}
