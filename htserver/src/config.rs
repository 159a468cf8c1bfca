//! Layered server configuration.
//!
//! Values come from the built-in defaults, then an optional TOML file, then
//! `APP_`-prefixed environment variables; later sources win.

use crate::Cli;
use hts_core::models::PaginationConfig;
use serde::{Deserialize, Serialize};

/// Settings for every component of the server, one section each.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// `[server]`: bind address and CORS
    #[serde(default)]
    pub server: hts_axum::config::AxumConfig,

    /// `[database]`: SQLite file and busy timeout
    #[serde(default)]
    pub database: hts_sqlite::config::SqliteConfig,

    /// `[pagination]`: page size defaults and limits
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Merge the defaults, the file named by `cli.config` (which must exist
    /// when given) and the environment.
    ///
    /// A variable `APP_<SECTION>__<KEY>` sets `<key>` in `[<section>]`:
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_PATH=/data/health.db
    /// export APP_SERVER__BIND_ADDRESS=0.0.0.0:3000
    /// export APP_PAGINATION__MAX_LIMIT=100
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = cli.config.as_deref() {
            if !path.exists() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            builder = builder.add_source(config::File::from(path));
        }

        let loaded: Self = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.check()?;
        Ok(loaded)
    }

    /// Reject pagination settings the resolver could never satisfy.
    fn check(&self) -> anyhow::Result<()> {
        let PaginationConfig {
            default_limit,
            max_limit,
            ..
        } = &self.pagination;

        if *default_limit == 0 {
            anyhow::bail!("pagination.default_limit must be at least 1");
        }
        if let Some(max_limit) = max_limit {
            if default_limit > max_limit {
                anyhow::bail!(
                    "pagination.default_limit ({default_limit}) exceeds pagination.max_limit ({max_limit})"
                );
            }
        }
        Ok(())
    }
}
