//! The concrete application served by the binary.

use hts_core::{
    models::{PaginationConfig, Resource},
    ports::Application,
    resolver::PaginationQueryResolver,
};
use hts_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, DocumentId},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Documents are free-form JSON objects.
pub type DocumentData = Map<String, Value>;

/// SQLite-backed application state, shared by every request handler.
#[derive(Clone)]
pub struct ServerApp {
    db: Db,
    resolver: Arc<PaginationQueryResolver>,
}

impl ServerApp {
    /// Open the database and build the resolver from its configuration.
    pub async fn open(database: &SqliteConfig, pagination: PaginationConfig) -> anyhow::Result<Self> {
        let db = Db::open(database).await?;
        tracing::info!(
            default_limit = pagination.default_limit,
            max_limit = ?pagination.max_limit,
            range_field = pagination.range_field.as_str(),
            "pagination configured"
        );
        Ok(Self {
            db,
            resolver: Arc::new(PaginationQueryResolver::new(pagination)),
        })
    }
}

impl Application for ServerApp {
    type DocumentData = DocumentData;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn resolver(&self) -> &PaginationQueryResolver {
        &self.resolver
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_document_id(&self, _resource: Resource, _data: &DocumentData) -> DocumentId {
        uuid::Uuid::new_v4().into()
    }
}
