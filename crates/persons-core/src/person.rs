//! Person: the single resource served by this system.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Store-assigned identifier of a [`Person`].
pub type PersonId = i64;

/// A persisted person record.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:            PersonId,
  pub name:          String,
  pub bio:           String,
  /// Seconds since the Unix epoch.
  pub date_of_birth: i64,
}

/// A validated person that has not been persisted yet.
///
/// Only obtainable through [`PersonInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:          String,
  pub bio:           String,
  pub date_of_birth: i64,
}

impl NewPerson {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: PersonId) -> Person {
    Person {
      id,
      name: self.name,
      bio: self.bio,
      date_of_birth: self.date_of_birth,
    }
  }
}

impl Person {
  /// Overwrite every mutable field with `replacement`. The id is kept.
  pub fn overwrite(&mut self, replacement: NewPerson) {
    self.name = replacement.name;
    self.bio = replacement.bio;
    self.date_of_birth = replacement.date_of_birth;
  }
}

/// Raw, unvalidated field values taken from a create or update request.
///
/// Missing fields deserialise as empty text so that they fail validation
/// rather than being silently preserved. The capitalised aliases match the
/// form field names older clients send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonInput {
  #[serde(alias = "Name", deserialize_with = "raw_text")]
  pub name:          String,
  #[serde(alias = "Bio", deserialize_with = "raw_text")]
  pub bio:           String,
  #[serde(alias = "DateOfBirth", deserialize_with = "raw_text")]
  pub date_of_birth: String,
}

impl PersonInput {
  pub fn new(
    name: impl Into<String>,
    bio: impl Into<String>,
    date_of_birth: impl Into<String>,
  ) -> Self {
    Self {
      name:          name.into(),
      bio:           bio.into(),
      date_of_birth: date_of_birth.into(),
    }
  }
}

/// Accept either a string or a bare JSON number and keep it as text.
fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Text(String),
    Number(serde_json::Number),
  }

  Ok(match Raw::deserialize(deserializer)? {
    Raw::Text(s) => s,
    Raw::Number(n) => n.to_string(),
  })
}

/// Parse a path segment into a [`PersonId`].
pub fn parse_id(raw: &str) -> Result<PersonId> {
  raw.parse().map_err(|_| Error::InvalidId(raw.to_owned()))
}
