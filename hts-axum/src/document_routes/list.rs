use super::{ApiError, ErrorResponse, ResourcePath, api_error};
use crate::ApiApplication;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use hts_core::{
    models::{Entity, PaginatedResult, QueryDescriptor},
    ports::{DocumentRepository as _, Repository},
    resolver::ResolveError,
    validation::FieldError,
};
use tracing::{Level, event};

/// Retrieve one page of a resource's documents.
///
/// # Returns
///
/// - `200 OK`: The page, with `total` and `hasMore`
/// - `400 Bad Request`: Every invalid query parameter, by field
/// - `500 Internal Server Error`: Database query failed
pub(crate) async fn list_documents<T: ApiApplication>(
    State(app): State<T>,
    Path(ResourcePath { resource }): Path<ResourcePath>,
    query: Result<Query<QueryDescriptor>, QueryRejection>,
) -> Result<
    Json<PaginatedResult<Entity<<T::Repository as Repository>::DocumentId, T::DocumentData>>>,
    ApiError,
> {
    // A query string that cannot be read at all gets the same body as one
    // that fails validation
    let Query(descriptor) = query.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message: "invalid query".to_string(),
                errors: vec![FieldError {
                    field: "query".to_string(),
                    messages: vec![rejection.body_text()],
                }],
            }),
        )
    })?;
    let collection = app.database().collection(resource);

    app.resolver()
        .resolve_page(&descriptor, &collection)
        .await
        .map(Json)
        .map_err(|err| match err {
            ResolveError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: "invalid query".to_string(),
                    errors: errors.field_errors(),
                }),
            ),
            ResolveError::Store(err) => {
                event!(
                    Level::ERROR,
                    resource = resource.as_str(),
                    err = err.to_string()
                );
                api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to list {resource}"),
                )
            }
        })
}
