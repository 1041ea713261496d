//! JSON REST API for persons.
//!
//! Exposes an axum [`Router`] backed by any [`persons_core::store::PersonStore`].
//! Every response, success or failure, is an [`Envelope`]. Port binding and
//! logging setup are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, persons_api::api_router(Arc::new(store))).await?;
//! ```

pub mod body;
pub mod envelope;
pub mod error;
pub mod persons;
pub mod provision;

use std::sync::Arc;

use axum::{Router, routing::get};
use persons_core::store::PersonStore;

pub use envelope::Envelope;
pub use error::ApiError;
pub use provision::Handle;

/// Build a fully-materialised API router for `store`.
///
/// Unmatched paths are answered with a 404 envelope.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonStore + 'static,
{
  Router::new()
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::delete_one::<S>),
    )
    .fallback(not_found)
    .with_state(store)
}

async fn not_found() -> ApiError { ApiError::NotFound }

// ─── Integration tests ────────────────────────────────────────────────────────
