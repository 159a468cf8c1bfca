//! REST API endpoints shared by every resource.
//!
//! Listing goes through the pagination resolver; the remaining routes are
//! plain CRUD against the document repository. Identifiers are generated by
//! the application, never taken from the request body.

use crate::ApiApplication;
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::{Json, http::StatusCode};
use hts_core::{models::Resource, validation::FieldError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod crud;
use crud::*;

mod list;
use list::*;

/// Path parameter for collection-wide endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct ResourcePath {
    /// The kind of document
    resource: Resource,
}

/// Path parameters for document-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct DocumentPath<T> {
    /// The kind of document
    resource: Resource,
    /// The unique identifier of the document within its resource
    id: T,
}

/// The body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// A short description of the failure
    pub message: String,
    /// The offending fields, when the request was rejected by validation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
            errors: Vec::new(),
        }),
    )
}

/// Creates a router with the document endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/{resource}",
            get_with(list_documents::<T>, list_documents_docs)
                .post_with(create_document::<T>, create_document_docs),
            |route| route.tag("documents"),
        )
        .api_route_with(
            "/{resource}/{id}",
            get_with(read_document::<T>, read_document_docs)
                .put_with(update_document::<T>, update_document_docs)
                .delete_with(delete_document::<T>, delete_document_docs),
            |route| route.tag("documents"),
        )
}

fn list_documents_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List documents")
        .description(
            r#"
            Return one page of the resource's documents.

            `sort` is a list of `field:asc` or `field:desc` pairs joined by `&`
            (URL-encoded as `%26`), applied left to right. `range` restricts the
            page to documents whose date lies within `start:end`, both ends
            included. `total` always counts the whole collection.

            Every invalid parameter is reported in one 400 response.
            "#,
        )
        .response_with::<400, Json<ErrorResponse>, _>(|res| {
            res.description("Invalid query or unknown resource")
        })
        .response_with::<500, Json<ErrorResponse>, _>(|res| res.description("Database query failed"))
}

fn create_document_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Create document")
        .description(
            r#"
            Store a new document and return it with its generated `id`. An `id`
            field in the body is ignored.
            "#,
        )
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}

fn read_document_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Read document")
        .response_with::<404, Json<ErrorResponse>, _>(|res| res.description("Document does not exist"))
        .response_with::<500, Json<ErrorResponse>, _>(|res| res.description("Database query failed"))
}

fn update_document_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Replace document")
        .description("Replace the contents of a document, keeping its `id`.")
        .response_with::<404, Json<ErrorResponse>, _>(|res| res.description("Document does not exist"))
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}

fn delete_document_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Delete document")
        .response_with::<404, Json<ErrorResponse>, _>(|res| res.description("Document does not exist"))
        .response_with::<500, Json<ErrorResponse>, _>(|res| {
            res.description("Database operation failed")
        })
}
