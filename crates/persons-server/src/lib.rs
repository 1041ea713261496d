//! Wiring for the persons server binary: configuration and the top-level
//! router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use persons_core::store::PersonStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `persons.toml` and
/// `PERSONS_*` environment variables. Fixed for the life of the process.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:              String,
  #[serde(default = "default_port")]
  pub port:              u16,
  /// SQLite database file. A leading `~/` is expanded.
  #[serde(default = "default_database_path")]
  pub database_path:     PathBuf,
  /// Create the database and schema at startup if they do not exist. When
  /// `false` the server only attaches to an existing database.
  #[serde(default = "default_create_if_missing")]
  pub create_if_missing: bool,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8080 }

fn default_database_path() -> PathBuf { PathBuf::from("persons.db") }

fn default_create_if_missing() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              default_host(),
      port:              default_port(),
      database_path:     default_database_path(),
      create_if_missing: default_create_if_missing(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `PERSONS_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PERSONS"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The database path with a leading `~` expanded.
  pub fn database_path(&self) -> PathBuf { expand_tilde(&self.database_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in a per-request tracing span.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: PersonStore + 'static,
{
  persons_api::api_router(store).layer(TraceLayer::new_for_http())
}
