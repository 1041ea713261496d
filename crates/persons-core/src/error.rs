//! Error types for `persons-core`.

use thiserror::Error;

use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub enum Error {
  /// The path segment is not an integer. Callers treat this exactly like a
  /// missing record.
  #[error("invalid person id: {0:?}")]
  InvalidId(String),

  #[error("invalid person input: {0}")]
  Validation(FieldErrors),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
