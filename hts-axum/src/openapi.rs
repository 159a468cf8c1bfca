//! OpenAPI documentation generation and serving.
//!
//! The generated document is served as JSON, alongside a RapiDoc page that
//! renders it.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

async fn serve_rapidoc() -> impl IntoApiResponse {
    let html = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="read"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
    ></rapi-doc>
  </body>
</html>"#;
    Html(html).into_response()
}

/// Serve the raw OpenAPI document.
async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Routes for the documentation viewer and the document it renders.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

/// Configure the OpenAPI documentation metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Health Tracker API")
        .summary("A REST API over the documents of a personal health tracker.")
        .description(
            "Issues, medications, symptoms and users share one set of CRUD routes. \
             List routes are paginated, sortable by any document field, and can be \
             restricted to a date range.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .tag(Tag {
            name: "documents".into(),
            description: Some("Paginated listing and CRUD for every resource".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "meta".into(),
            description: Some("Service status".into()),
            ..Default::default()
        })
}
