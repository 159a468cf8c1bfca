#![allow(dead_code)]

use hts_core::{
    models::{PaginationConfig, Resource},
    ports::{Application, DocumentRepository as _, ResourceCollection},
    resolver::PaginationQueryResolver,
};
use hts_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, DocumentId},
};
use serde_json::Value;

pub struct TestApp {
    pub db: Db,
    pub resolver: PaginationQueryResolver,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_config(PaginationConfig::default()).await
    }

    pub async fn with_config(config: PaginationConfig) -> anyhow::Result<Self> {
        Ok(Self {
            db: Db::open(&SqliteConfig::default()).await?,
            resolver: PaginationQueryResolver::new(config),
        })
    }

    pub fn collection(&self, resource: Resource) -> ResourceCollection<'_, Db, Value> {
        self.db.collection(resource)
    }

    /// Insert `documents` into `resource` in order, returning their ids.
    pub async fn seed(
        &self,
        resource: Resource,
        documents: impl IntoIterator<Item = Value>,
    ) -> anyhow::Result<Vec<DocumentId>> {
        let mut ids = Vec::new();
        for data in documents {
            let id = self.generate_document_id(resource, &data);
            self.db
                .create_document(resource, id, data, self.now())
                .await?;
            ids.push(id);
        }
        Ok(ids)
    }
}

impl Application for TestApp {
    type DocumentData = Value;
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

    fn generate_document_id(&self, _resource: Resource, _data: &Value) -> DocumentId {
        uuid::Uuid::new_v4().into()
    }
}
