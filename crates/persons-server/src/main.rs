//! persons server binary.
//!
//! Reads `persons.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the persons API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use persons_server::ServerConfig;
use persons_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Persons CRUD server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "persons.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let db_path = server_cfg.database_path();
  let store = if server_cfg.create_if_missing {
    SqliteStore::open(&db_path)
      .await
      .with_context(|| format!("failed to open store at {db_path:?}"))?
  } else {
    SqliteStore::attach(&db_path)
  };

  let app = persons_server::app(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
