use actix_web::http::StatusCode;
use actix_web::{error, HttpRequest, HttpResponse};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::ErrorResponse;
use crate::services::ServiceError;

/// Error returned by the HTTP handlers, rendered as an `ErrorResponse` body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { error: &'static str, message: String },

    #[error("person {0} not found")]
    NotFound(i64),

    /// Details are logged, never sent to the client
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    pub fn validation(errors: ValidationErrors) -> Self {
        tracing::debug!("Validation failed: {}", errors);
        ApiError::BadRequest {
            error: "validation_failed",
            message: errors.to_string(),
        }
    }

    /// Map a service failure, keeping not-found distinct from everything else
    pub fn from_service(err: ServiceError, context: &'static str) -> Self {
        match err {
            ServiceError::NotFound(id) => ApiError::NotFound(id),
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "{}", context);
                ApiError::Internal(context)
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { error, .. } => *error,
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("JSON payload error on {}: {}", req.path(), err);
    ApiError::BadRequest {
        error: "invalid_json",
        message: format!("Invalid JSON: {}", err),
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Query error on {}: {}", req.path(), err);
    ApiError::BadRequest {
        error: "invalid_query",
        message: format!("Invalid query: {}", err),
    }
    .into()
}

/// Handle malformed path segments such as a non-numeric person id
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Path error on {}: {}", req.path(), err);
    ApiError::BadRequest {
        error: "invalid_id",
        message: "Invalid person ID".to_string(),
    }
    .into()
}
