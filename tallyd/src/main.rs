use std::fs::File;

use tally_axum::{router, start_server};
use tally_sqlite::Db;
use tallyd::{AppConfig, Cli, impls::TallyApp};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    // Accordingly, we likely want to subscribe to these events so we can
    // write them to stdio and possibly some durable location.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args and build the layered config
    let cli = Cli::import()?;
    let AppConfig {
        server,
        database,
        scoring,
    } = AppConfig::load(&cli)?;

    tracing::info!(path = ?database.database_path, "opening database");
    let db = Db::open(&database).await?;
    let app = TallyApp { db, scoring };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = router(app).1;
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    start_server(server, app).await?;

    Ok(())
}
