//! Per-request connection provisioning.
//!
//! [`Handle`] is an extractor: axum opens a fresh connection before the
//! handler body runs and the handle closes it when dropped, on every exit
//! path. If the store cannot be reached the request is answered with a 500
//! envelope and the handler never runs.

use std::{ops::Deref, sync::Arc};

use axum::{extract::FromRequestParts, http::request::Parts};
use persons_core::store::PersonStore;

use crate::error::ApiError;

/// A connection owned by exactly one request.
pub struct Handle<S: PersonStore> {
  conn: S::Conn,
}

impl<S: PersonStore> Handle<S> {
  /// Open a connection on `store`.
  pub async fn acquire(store: &S) -> Result<Self, ApiError> {
    let conn = store
      .connect()
      .await
      .map_err(|e| ApiError::Connection(Box::new(e)))?;
    tracing::debug!("acquired connection");
    Ok(Self { conn })
  }
}

impl<S: PersonStore> Deref for Handle<S> {
  type Target = S::Conn;

  fn deref(&self) -> &S::Conn { &self.conn }
}

impl<S> FromRequestParts<Arc<S>> for Handle<S>
where
  S: PersonStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    _parts: &mut Parts,
    store: &Arc<S>,
  ) -> Result<Self, Self::Rejection> {
    Handle::acquire(store.as_ref()).await
  }
}
