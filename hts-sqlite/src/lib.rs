#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the hts-sqlite crate.
//! [hts_core]: https://docs.rs/hts_core/latest/hts_core/index.html
//! [hts_axum]: https://docs.rs/hts_axum/latest/hts_axum/index.html
//! [hts_sqlite]: https://docs.rs/hts_sqlite/latest/hts_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::str::FromStr;
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// The SQLite document store.
///
/// Reads go through a pool of connections so list requests can run side by
/// side; writes go through a pool of exactly one connection, which keeps them
/// serialized without relying on SQLite's busy handler.
///
/// ```no_run
/// # use hts_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Pool used for counts, lists and single-document reads
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Single-connection pool used for every write
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Connect to the database described by `config` and bring its schema up
    /// to date.
    ///
    /// Connections run in WAL mode with `synchronous = normal`, and wait up to
    /// `config.busy_timeout` on a locked database.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened (or created) or a migration
    /// fails to apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(config.busy_timeout)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("journal_size_limit", "27103364")
                .pragma("mmap_size", "134217728")
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        // TODO: open the reader pool with read_only(true) once that stops locking
        // the writer out of a shared in-memory database
        let reader = sqlite::SqlitePoolOptions::new().connect_with(options.clone());
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options);

        let (reader, writer) = try_join!(reader, writer)?;

        sqlx::migrate!("./schema").run(&writer).await?;

        tracing::debug!(
            path = db_path.as_deref().unwrap_or(":memory:"),
            "opened document store"
        );

        Ok(Self { reader, writer })
    }
}
