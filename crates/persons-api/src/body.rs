//! Extractor for create/update request bodies.

use axum::{
  Form, Json,
  body::Body,
  extract::{FromRequest, Query, Request},
  http::header,
};
use persons_core::person::PersonInput;

use crate::error::ApiError;

/// Largest body accepted for a create or update.
const BODY_LIMIT: usize = 8 * 1024 * 1024;

/// A [`PersonInput`] decoded from the query string and either a JSON or a
/// urlencoded form body.
///
/// Anything that is not declared as JSON is decoded as a form. Fields present
/// in the body win over the same fields in the query string. An empty body
/// contributes nothing, so a request without one is validated like an empty
/// form.
#[derive(Debug)]
pub struct PersonBody(pub PersonInput);

impl<S> FromRequest<S> for PersonBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Query(from_query) = Query::<PersonInput>::try_from_uri(req.uri())
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let is_json = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/json"));

    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, BODY_LIMIT)
      .await
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if bytes.is_empty() {
      return Ok(PersonBody(from_query));
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    let from_body = if is_json {
      let Json(input) = Json::<PersonInput>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      input
    } else {
      let Form(input) = Form::<PersonInput>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      input
    };

    Ok(PersonBody(merge(from_body, from_query)))
  }
}

/// Field by field, keep `primary` unless it is empty.
fn merge(primary: PersonInput, fallback: PersonInput) -> PersonInput {
  let pick = |a: String, b: String| if a.is_empty() { b } else { a };
  PersonInput {
    name:          pick(primary.name, fallback.name),
    bio:           pick(primary.bio, fallback.bio),
    date_of_birth: pick(primary.date_of_birth, fallback.date_of_birth),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_prefers_non_empty_primary_fields() {
    let merged = merge(
      PersonInput::new("Alice Doe", "", ""),
      PersonInput::new("Bob Smith", "Loves hiking", "19900101"),
    );
    assert_eq!(merged, PersonInput::new("Alice Doe", "Loves hiking", "19900101"));
  }
}
