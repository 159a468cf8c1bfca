use std::fs::File;

use hts_axum::{openapi, start_server};
use htserver::{AppConfig, Cli, impls::ServerApp};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything in the workspace reports through `tracing`; RUST_LOG picks
    // what reaches stdout.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        let schema = openapi::<ServerApp>();
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    let AppConfig {
        server,
        database,
        pagination,
    } = AppConfig::load(&cli)?;

    let app = ServerApp::open(&database, pagination).await?;
    start_server(server, app).await?;

    Ok(())
}
