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

#[derive(Clone)]
pub struct TestApp {
    db: Db,
    resolver: Arc<PaginationQueryResolver>,
}

impl TestApp {
    pub async fn new(config: PaginationConfig) -> Self {
        let db = Db::open(&SqliteConfig::default()).await.unwrap();
        Self {
            db,
            resolver: Arc::new(PaginationQueryResolver::new(config)),
        }
    }
}

impl Application for TestApp {
    type DocumentData = Map<String, Value>;
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

    fn generate_document_id(&self, _resource: Resource, _data: &Self::DocumentData) -> DocumentId {
        uuid::Uuid::new_v4().into()
    }
}
