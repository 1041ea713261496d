//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/persons`      | 200 with the list, or "No record found" and `null` |
//! | `GET`    | `/persons/:id`  | 404 if malformed or missing |
//! | `POST`   | `/persons`      | Body: [`PersonBody`]; 400 on validation or store failure |
//! | `PUT`    | `/persons/:id`  | Full overwrite; 404, then 400 |
//! | `DELETE` | `/persons/:id`  | Returns the deleted record |
//!
//! Every handler takes a [`Handle`] first, so the connection is open before
//! anything else happens and closed once the envelope has been produced.

use axum::{extract::Path, http::StatusCode};
use persons_core::{
  person::{Person, parse_id},
  store::{PersonConnection, PersonStore},
};

use crate::{
  body::PersonBody,
  envelope::{Envelope, NO_RECORD_FOUND},
  error::ApiError,
  provision::Handle,
};

/// Resolve a raw path id to an existing record.
async fn find_existing<C>(conn: &C, raw_id: &str) -> Result<Person, ApiError>
where
  C: PersonConnection,
{
  let id = parse_id(raw_id)?;
  conn
    .find(id)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?
    .ok_or(ApiError::NotFound)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S>(conn: Handle<S>) -> Result<Envelope<Vec<Person>>, ApiError>
where
  S: PersonStore + 'static,
{
  let persons = conn
    .find_all()
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?;

  if persons.is_empty() {
    return Ok(Envelope::without_data(StatusCode::OK, NO_RECORD_FOUND));
  }
  Ok(Envelope::success(persons))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  conn: Handle<S>,
  Path(id): Path<String>,
) -> Result<Envelope<Person>, ApiError>
where
  S: PersonStore + 'static,
{
  let person = find_existing(&*conn, &id).await?;
  Ok(Envelope::success(person))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`
pub async fn create<S>(
  conn: Handle<S>,
  body: Result<PersonBody, ApiError>,
) -> Result<Envelope<Person>, ApiError>
where
  S: PersonStore + 'static,
{
  let new_person = body?.0.validate()?;

  let person = conn
    .insert(new_person)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = person.id, "created person");
  Ok(Envelope::success(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/:id`: replaces `name`, `bio` and `dateOfBirth`.
///
/// The id comes from the path only. Existence is checked before the body is
/// looked at, so a missing record is a 404 whatever the body contains.
pub async fn update<S>(
  conn: Handle<S>,
  Path(id): Path<String>,
  body: Result<PersonBody, ApiError>,
) -> Result<Envelope<Person>, ApiError>
where
  S: PersonStore + 'static,
{
  let mut person = find_existing(&*conn, &id).await?;
  let replacement = body?.0.validate()?;
  person.overwrite(replacement);

  let person = conn
    .update(person)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = person.id, "updated person");
  Ok(Envelope::success(person))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/:id`: returns the record as it was before deletion.
pub async fn delete_one<S>(
  conn: Handle<S>,
  Path(id): Path<String>,
) -> Result<Envelope<Person>, ApiError>
where
  S: PersonStore + 'static,
{
  let person = find_existing(&*conn, &id).await?;

  conn
    .delete(person.id)
    .await
    .map_err(|e| ApiError::Internal(Box::new(e)))?;

  tracing::info!(id = person.id, "deleted person");
  Ok(Envelope::success(person))
}
