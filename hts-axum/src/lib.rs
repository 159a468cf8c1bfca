#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the hts-core crate.
//! [hts_core]: https://docs.rs/hts_core/latest/hts_core/index.html
#![doc = include_str!("../README.md")]

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{
    Extension, Json,
    http::{Method, header},
};
use hts_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, sync::Arc};
use tower_http::{cors, trace::TraceLayer};

pub mod config;
mod document_routes;
mod openapi;

use config::AxumConfig;
pub use document_routes::ErrorResponse;

#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct Health {
    /// Always `ok` while the process is serving requests
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn api_router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/health", get(health), |route| route.tag("meta"))
        .merge(document_routes::router())
}

/// Assemble the API for `state`: the document routes, `/health`, and the
/// documentation under `/docs`.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> axum::Router {
    let mut api = OpenApi::default();
    let routes = api_router::<T>()
        .nest_api_service("/docs", openapi::docs_routes())
        .finish_api_with(&mut api, openapi::api_docs)
        // Shared behind an Arc so requests to /docs/api.json do not clone the document
        .layer(Extension(Arc::new(api)))
        .layer(TraceLayer::new_for_http());

    if config.permissive_cors {
        let policy = cors::CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);
        routes.layer(policy).with_state(state)
    } else {
        routes.with_state(state)
    }
}

/// The OpenAPI document for the routes of [`router`], built without any
/// application state.
pub fn openapi<T: ApiApplication>() -> OpenApi {
    let mut api = OpenApi::default();
    let _ = api_router::<T>().finish_api_with(&mut api, openapi::api_docs);
    api
}

/// Bind to `config.bind_address` and serve `app` until the listener fails.
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "serving health tracker API");

    axum::serve(listener, router(app, config)).await
}

/// Everything that crosses the HTTP boundary: deserialized from requests,
/// serialized into responses and described in the OpenAPI document.
pub trait Wire: Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static {}

impl<T: Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static> Wire for T {}

/// An [`Application`] that can be used as Axum state.
///
/// The bounds are gathered here once, with a blanket implementation, so that
/// handlers only need `T: ApiApplication`.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        DocumentData: Wire,
        Repository: Send
                        + Sync
                        + 'static
                        + Repository<DateTime: Send + Sync, DocumentId: Wire + Copy + Display>,
    >
{
}

impl<T> ApiApplication for T where
    T: Clone
        + Send
        + Sync
        + 'static
        + Application<
            DocumentData: Wire,
            Repository: Send
                            + Sync
                            + 'static
                            + Repository<DateTime: Send + Sync, DocumentId: Wire + Copy + Display>,
        >
{
}
