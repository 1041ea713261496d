//! Structural validation of [`PersonInput`].
//!
//! Every rule is evaluated, so a single response can report all violations
//! at once. Validation is pure: it never touches the store.

use std::fmt;

use serde::Serialize;

use crate::{
  Error, Result,
  person::{NewPerson, PersonInput},
};

/// Minimum trimmed length, in UTF-8 bytes, of `name` and `bio`.
pub const MIN_TEXT_LEN: usize = 5;

/// Minimum trimmed length, in UTF-8 bytes, of `dateOfBirth`.
pub const MIN_DATE_OF_BIRTH_LEN: usize = 8;

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  /// Wire name of the offending field.
  pub field:   &'static str,
  pub message: &'static str,
}

/// The violations found in one input; at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  /// `true` if `field` has a violation.
  pub fn has(&self, field: &str) -> bool {
    self.0.iter().any(|e| e.field == field)
  }

  fn add(&mut self, field: &'static str, message: &'static str) {
    self.0.push(FieldError { field, message });
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
    write!(f, "{} violation(s) on [{}]", self.0.len(), fields.join(", "))
  }
}

/// Check `input` against every rule. An empty result means valid.
pub fn validate(input: &PersonInput) -> FieldErrors {
  let mut errors = FieldErrors::default();

  if input.name.trim().len() < MIN_TEXT_LEN {
    errors.add("name", "Name is too short");
  }

  if input.bio.trim().len() < MIN_TEXT_LEN {
    errors.add("bio", "Bio is too short");
  }

  if parse_date_of_birth(&input.date_of_birth).is_none() {
    errors.add("dateOfBirth", "Invalid birth of date provided");
  }

  errors
}

fn parse_date_of_birth(raw: &str) -> Option<i64> {
  let trimmed = raw.trim();
  if trimmed.len() < MIN_DATE_OF_BIRTH_LEN {
    return None;
  }
  trimmed.parse().ok()
}

impl PersonInput {
  /// Validate and convert into a [`NewPerson`] with trimmed text and a parsed
  /// birth date.
  pub fn validate(&self) -> Result<NewPerson> {
    let errors = validate(self);
    match parse_date_of_birth(&self.date_of_birth) {
      Some(date_of_birth) if errors.is_empty() => Ok(NewPerson {
        name: self.name.trim().to_owned(),
        bio: self.bio.trim().to_owned(),
        date_of_birth,
      }),
      _ => Err(Error::Validation(errors)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn input(name: &str, bio: &str, dob: &str) -> PersonInput {
    PersonInput::new(name, bio, dob)
  }

  #[test]
  fn valid_input_has_no_errors() {
    assert!(validate(&input("Alice Doe", "Loves hiking", "19900101")).is_empty());
  }

  #[test]
  fn short_name_is_reported() {
    let errors = validate(&input("Al", "Loves hiking", "19900101"));
    assert_eq!(errors.len(), 1);
    assert!(errors.has("name"));
  }

  #[test]
  fn length_is_measured_after_trimming() {
    let errors = validate(&input("  Al    ", "   bio   ", " 19900101 "));
    assert!(errors.has("name"));
    assert!(errors.has("bio"));
    assert!(!errors.has("dateOfBirth"));
  }

  #[test]
  fn every_violation_is_reported_once() {
    let errors = validate(&input("", "", ""));
    assert_eq!(errors.len(), 3);
    assert!(errors.has("name"));
    assert!(errors.has("bio"));
    assert!(errors.has("dateOfBirth"));
  }

  #[test]
  fn date_of_birth_too_short_is_one_error() {
    let errors = validate(&input("Alice Doe", "Loves hiking", "1234"));
    assert_eq!(errors.len(), 1);
    assert!(errors.has("dateOfBirth"));
  }

  #[test]
  fn date_of_birth_non_numeric_is_one_error() {
    let errors = validate(&input("Alice Doe", "Loves hiking", "1990-01-01"));
    assert_eq!(errors.len(), 1);
    assert!(errors.has("dateOfBirth"));
  }

  #[test]
  fn length_is_measured_in_bytes() {
    // Four characters, eight bytes.
    assert!(validate(&input("ééëë", "Loves hiking", "19900101")).is_empty());
    // Two characters, four bytes.
    assert!(validate(&input("éé", "Loves hiking", "19900101")).has("name"));
  }

  #[test]
  fn validated_input_is_trimmed_and_parsed() {
    let new = input("  Alice Doe ", " Loves hiking\n", " 19900101")
      .validate()
      .unwrap();
    assert_eq!(new.name, "Alice Doe");
    assert_eq!(new.bio, "Loves hiking");
    assert_eq!(new.date_of_birth, 19_900_101);
  }

  #[test]
  fn invalid_input_yields_validation_error() {
    match input("Al", "Loves hiking", "19900101").validate() {
      Err(Error::Validation(errors)) => assert!(errors.has("name")),
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn errors_serialise_as_field_message_pairs() {
    let errors = validate(&input("Al", "Loves hiking", "19900101"));
    let v = serde_json::to_value(&errors).unwrap();
    assert_eq!(v[0]["field"], "name");
    assert_eq!(v[0]["message"], "Name is too short");
  }
}
