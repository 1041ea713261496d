//! The `{httpCode, message, data}` wrapper returned for every response.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

pub const SUCCESS: &str = "Success";
pub const NO_RECORD_FOUND: &str = "No record found";
pub const NOT_FOUND: &str = "Not found";
pub const BAD_REQUEST: &str = "Bad request";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// A response envelope. Converting it into a [`Response`] is the only place
/// a body gets written.
#[derive(Debug, Clone)]
pub struct Envelope<T = ()> {
  code:    StatusCode,
  message: &'static str,
  data:    Option<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a, T> {
  http_code: u16,
  message:   &'a str,
  data:      &'a Option<T>,
}

impl<T> Envelope<T> {
  pub fn new(code: StatusCode, message: &'static str, data: Option<T>) -> Self {
    Self { code, message, data }
  }

  /// 200 "Success" carrying `data`.
  pub fn success(data: T) -> Self { Self::new(StatusCode::OK, SUCCESS, Some(data)) }

  /// An envelope whose `data` is `null`.
  pub fn without_data(code: StatusCode, message: &'static str) -> Self {
    Self::new(code, message, None)
  }

  pub fn code(&self) -> StatusCode { self.code }

  pub fn message(&self) -> &'static str { self.message }

  pub fn data(&self) -> Option<&T> { self.data.as_ref() }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
  fn into_response(self) -> Response {
    let wire = Wire {
      http_code: self.code.as_u16(),
      message:   self.message,
      data:      &self.data,
    };

    match serde_json::to_vec(&wire) {
      Ok(body) => (
        self.code,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
      )
        .into_response(),
      Err(e) => {
        tracing::error!(error = %e, code = %self.code, "failed to serialise response envelope");
        Envelope::<()>::without_data(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
          .into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;

  async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[test]
  fn constructors_set_code_message_and_data() {
    let ok = Envelope::success(7);
    assert_eq!(ok.code(), StatusCode::OK);
    assert_eq!(ok.message(), SUCCESS);
    assert_eq!(ok.data(), Some(&7));

    let empty = Envelope::<Vec<u8>>::without_data(StatusCode::OK, NO_RECORD_FOUND);
    assert_eq!(empty.message(), "No record found");
    assert!(empty.data().is_none());
  }

  #[tokio::test]
  async fn success_envelope_shape() {
    let resp = Envelope::success(vec![1, 2, 3]).into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");

    let json = body_json(resp).await;
    assert_eq!(json["httpCode"], 200);
    assert_eq!(json["message"], "Success");
    assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
  }

  #[tokio::test]
  async fn missing_data_serialises_as_null() {
    let resp = Envelope::<()>::without_data(StatusCode::NOT_FOUND, NOT_FOUND).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json = body_json(resp).await;
    assert_eq!(json["httpCode"], 404);
    assert_eq!(json["message"], "Not found");
    assert!(json["data"].is_null());
  }

  #[tokio::test]
  async fn unserialisable_payload_degrades_to_500() {
    // JSON object keys must be strings.
    let mut payload = BTreeMap::new();
    payload.insert((1, 2), "pair");

    let resp = Envelope::success(payload).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(resp).await;
    assert_eq!(json["httpCode"], 500);
    assert_eq!(json["message"], "Internal server error");
    assert!(json["data"].is_null());
  }
}
