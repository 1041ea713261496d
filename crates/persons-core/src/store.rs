//! The persistence collaborator traits.
//!
//! A [`PersonStore`] hands out one [`PersonConnection`] per request. The
//! connection is owned by that request alone and released when dropped, so
//! there is nothing shared between requests to lock.

use std::future::Future;

use crate::person::{NewPerson, Person, PersonId};

/// Source of fresh connections, e.g. a database location plus credentials.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;
  type Conn: PersonConnection<Error = Self::Error>;

  /// Open a new connection. Fails if the store is unreachable or refuses the
  /// configured credentials.
  fn connect(&self) -> impl Future<Output = Result<Self::Conn, Self::Error>> + Send + '_;
}

/// An open connection, scoped to a single request.
///
/// Dropping the connection releases it.
pub trait PersonConnection: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up one person. Returns `None` if no record has this id.
  fn find(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All persons, ordered by id.
  fn find_all(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Persist a new person and return it with its assigned id.
  fn insert(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of an existing record.
  fn update(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Physically remove a record.
  fn delete(&self, id: PersonId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
