//! Error type for `persons-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened, e.g. the file is missing or
  /// unreadable.
  #[error("failed to connect to {target}: {source}")]
  Connect {
    target: String,
    #[source]
    source: tokio_rusqlite::Error,
  },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// An update addressed a row that does not exist.
  #[error("person not found: {0}")]
  PersonNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
