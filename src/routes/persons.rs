use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    CreatePersonRequest, ListPersonsQuery, PaginatedResponse, PersonFilter, UpdatePersonRequest,
};
use crate::routes::error::ApiError;
use crate::services::PersonService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub persons: Arc<PersonService>,
}

/// Configure all person routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/persons")
            .route(web::post().to(create_person))
            .route(web::get().to(list_persons)),
    )
    .service(
        web::resource("/persons/{id}")
            .route(web::get().to(get_person))
            .route(web::put().to(update_person))
            .route(web::delete().to(delete_person)),
    );
}

/// Create a person
///
/// POST /persons
///
/// Request body:
/// ```json
/// { "name": "Ivan", "surname": "Petrov", "patronymic": "Ivanovich" }
/// ```
async fn create_person(
    state: web::Data<AppState>,
    req: web::Json<CreatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    let person = state
        .persons
        .create(req.into_inner().into())
        .await
        .map_err(|e| ApiError::from_service(e, "Error creating person"))?;

    Ok(HttpResponse::Created().json(person))
}

/// List people with filtering and pagination
///
/// GET /persons?name=&surname=&patronymic=&gender=&nationality=&age_min=&age_max=&page=&page_size=
async fn list_persons(
    state: web::Data<AppState>,
    query: web::Query<ListPersonsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = PersonFilter::from(query.into_inner());
    let pagination = filter.pagination();

    let page = state
        .persons
        .list(&filter)
        .await
        .map_err(|e| ApiError::from_service(e, "Error listing persons"))?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::new(page.people, page.total, pagination)))
}

/// GET /persons/{id}
async fn get_person(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let person = state
        .persons
        .get_by_id(id.into_inner())
        .await
        .map_err(|e| ApiError::from_service(e, "Error fetching person"))?;

    Ok(HttpResponse::Ok().json(person))
}

/// Replace a person; the body carries the full record
///
/// PUT /persons/{id}
async fn update_person(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    req: web::Json<UpdatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(ApiError::validation)?;

    let person = state
        .persons
        .update(id.into_inner(), req.into_inner().into())
        .await
        .map_err(|e| ApiError::from_service(e, "Error updating person"))?;

    Ok(HttpResponse::Ok().json(person))
}

/// DELETE /persons/{id}
async fn delete_person(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state
        .persons
        .delete(id.into_inner())
        .await
        .map_err(|e| ApiError::from_service(e, "Error deleting person"))?;

    Ok(HttpResponse::NoContent().finish())
}
