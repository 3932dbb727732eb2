//! Generic CRUD handlers, instantiated once per resource.
//!
//! Every handler takes its [`CrudService`] from state via `FromRef`, so
//! `list_handler::<Member>` and `list_handler::<Country>` are the same code
//! over different field-rule tables and tables.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
    http::StatusCode,
};
use std::sync::Arc;

use crate::api::dto::envelope::Envelope;
use crate::api::extract::JsonFields;
use crate::application::services::CrudService;
use crate::domain::resource::Resource;
use crate::error::AppError;

/// Lists every record, ordered by id.
///
/// # Endpoint
///
/// `GET /crud/{resource}`
pub async fn list_handler<R: Resource>(
    State(service): State<Arc<CrudService<R>>>,
) -> Result<Json<Envelope<Vec<R::Record>>>, AppError> {
    let records = service.list().await?;
    Ok(Json(Envelope::data(records)))
}

/// Creates a record.
///
/// # Endpoint
///
/// `POST /crud/{resource}`
///
/// # Response Codes
///
/// - **201 Created**: record stored, returned under `data`
/// - **400 Bad Request**: field errors under `errors`
pub async fn create_handler<R: Resource>(
    State(service): State<Arc<CrudService<R>>>,
    JsonFields(raw): JsonFields,
) -> Result<(StatusCode, Json<Envelope<R::Record>>), AppError> {
    let record = service.create(&raw).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message(
            format!("{} created successfully", R::LABEL),
            record,
        )),
    ))
}

/// Fetches one record.
///
/// # Endpoint
///
/// `GET /crud/{resource}/{id}`
pub async fn show_handler<R: Resource>(
    State(service): State<Arc<CrudService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<R::Record>>, AppError> {
    let record = service.get(record_id::<R>(&id)?).await?;
    Ok(Json(Envelope::data(record)))
}

/// Overwrites every field of a record.
///
/// # Endpoint
///
/// `PUT /crud/{resource}/{id}`
///
/// # Response Codes
///
/// - **200 OK**: updated record under `data`
/// - **400 Bad Request**: field errors (required fields must be resent)
/// - **404 Not Found**: no such record, whatever the body holds
///
/// The body is only parsed once the record is known to exist.
pub async fn update_handler<R: Resource>(
    State(service): State<Arc<CrudService<R>>>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Envelope<R::Record>>, AppError> {
    let id = record_id::<R>(&id)?;
    service.get(id).await?;

    let JsonFields(raw) = JsonFields::from_body(body)?;
    let record = service.update(id, &raw).await?;

    Ok(Json(Envelope::with_message(
        format!("{} updated successfully", R::LABEL),
        record,
    )))
}

/// Removes a record.
///
/// # Endpoint
///
/// `DELETE /crud/{resource}/{id}`
pub async fn destroy_handler<R: Resource>(
    State(service): State<Arc<CrudService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    service.delete(record_id::<R>(&id)?).await?;

    Ok(Json(Envelope::message(format!(
        "{} deleted successfully",
        R::LABEL
    ))))
}

/// Parses a path identifier; anything but an integer names no record.
fn record_id<R: Resource>(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found(format!("{} not found", R::LABEL)))
}
