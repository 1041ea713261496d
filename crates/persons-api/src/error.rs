//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every variant renders as an [`Envelope`]; none of them leak store
//! diagnostics to the client.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use persons_core::validate::FieldErrors;
use thiserror::Error;

use crate::envelope::{BAD_REQUEST, Envelope, INTERNAL_SERVER_ERROR, NOT_FOUND};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler or extractor.
#[derive(Debug, Error)]
pub enum ApiError {
  /// No connection to the store could be opened.
  #[error("connection error: {0}")]
  Connection(#[source] BoxError),

  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  /// Malformed identifier or missing record; callers cannot tell which.
  #[error("not found")]
  NotFound,

  /// The request body could not be decoded.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The store rejected a write.
  #[error("store rejected write: {0}")]
  Store(#[source] BoxError),

  /// A read or delete failed on an open connection.
  #[error("store error: {0}")]
  Internal(#[source] BoxError),
}

impl From<persons_core::Error> for ApiError {
  fn from(e: persons_core::Error) -> Self {
    match e {
      persons_core::Error::InvalidId(_) => ApiError::NotFound,
      persons_core::Error::Validation(errors) => ApiError::Validation(errors),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Connection(e) => {
        tracing::error!(error = %e, "connection error");
        internal_error()
      }
      ApiError::Validation(errors) => {
        Envelope::new(StatusCode::BAD_REQUEST, BAD_REQUEST, Some(errors)).into_response()
      }
      ApiError::NotFound => {
        Envelope::<()>::without_data(StatusCode::NOT_FOUND, NOT_FOUND).into_response()
      }
      ApiError::BadRequest(reason) => {
        tracing::debug!(%reason, "undecodable request body");
        Envelope::<()>::without_data(StatusCode::BAD_REQUEST, BAD_REQUEST).into_response()
      }
      ApiError::Store(e) => {
        tracing::warn!(error = %e, "store rejected write");
        Envelope::<()>::without_data(StatusCode::BAD_REQUEST, BAD_REQUEST).into_response()
      }
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "store error");
        internal_error()
      }
    }
  }
}

fn internal_error() -> Response {
  Envelope::<()>::without_data(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    .into_response()
}
