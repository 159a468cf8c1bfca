use super::{ApiError, DocumentPath, ResourcePath, api_error};
use crate::ApiApplication;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use hts_core::{
    models::Entity,
    ports::{DocumentRepository as _, Repository},
};
use tracing::{Level, event};

type DocumentId<T> = <<T as hts_core::ports::Application>::Repository as Repository>::DocumentId;

/// Store a new document under a freshly generated id.
///
/// # Returns
///
/// - `201 Created`: The stored document, including its `id`
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn create_document<T: ApiApplication>(
    State(app): State<T>,
    Path(ResourcePath { resource }): Path<ResourcePath>,
    Json(data): Json<T::DocumentData>,
) -> Result<(StatusCode, Json<Entity<DocumentId<T>, T::DocumentData>>), ApiError> {
    let as_of = app.now();
    let document_id = app.generate_document_id(resource, &data);

    app.database()
        .create_document(resource, document_id, data, as_of)
        .await
        .map(|entity| (StatusCode::CREATED, Json(entity)))
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to create {resource} document"),
            )
        })
}

/// Retrieve a document.
///
/// # Returns
///
/// - `200 OK`: The document
/// - `404 Not Found`: No such document in this resource
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn read_document<T: ApiApplication>(
    State(app): State<T>,
    Path(DocumentPath { resource, id }): Path<DocumentPath<DocumentId<T>>>,
) -> Result<Json<Entity<DocumentId<T>, T::DocumentData>>, ApiError> {
    app.database()
        .get_document(resource, id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get {resource} document {id}"),
            )
        })?
        .map(Json)
        .ok_or_else(|| not_found(resource, id))
}

/// Replace a document's contents.
///
/// # Returns
///
/// - `200 OK`: The stored document
/// - `404 Not Found`: No such document in this resource
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn update_document<T: ApiApplication>(
    State(app): State<T>,
    Path(DocumentPath { resource, id }): Path<DocumentPath<DocumentId<T>>>,
    Json(data): Json<T::DocumentData>,
) -> Result<Json<Entity<DocumentId<T>, T::DocumentData>>, ApiError> {
    let as_of = app.now();

    app.database()
        .update_document(resource, id, data, as_of)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to update {resource} document {id}"),
            )
        })?
        .map(Json)
        .ok_or_else(|| not_found(resource, id))
}

/// Delete a document.
///
/// # Returns
///
/// - `204 No Content`: The document was deleted
/// - `404 Not Found`: No such document in this resource
/// - `500 Internal Server Error`: Database operation failed
pub(crate) async fn delete_document<T: ApiApplication>(
    State(app): State<T>,
    Path(DocumentPath { resource, id }): Path<DocumentPath<DocumentId<T>>>,
) -> Result<StatusCode, ApiError> {
    let existed = app
        .database()
        .delete_document(resource, id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to delete {resource} document {id}"),
            )
        })?;

    if existed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(resource, id))
    }
}

fn not_found(resource: hts_core::models::Resource, id: impl std::fmt::Display) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        format!("unknown {resource} document {id}"),
    )
}
