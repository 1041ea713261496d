//! [`SqliteStore`] and [`SqliteConnection`], the SQLite implementation of
//! [`PersonStore`] and [`PersonConnection`].

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use rusqlite::{OpenFlags, OptionalExtension as _};
use uuid::Uuid;

use persons_core::{
  person::{NewPerson, Person, PersonId},
  store::{PersonConnection, PersonStore},
};

use crate::{Error, Result, schema::SCHEMA};

/// How long a connection waits on a locked database before giving up.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// The location of a SQLite database plus the flags used to reach it.
///
/// Holds no open connection for file databases; each call to
/// [`connect`](PersonStore::connect) opens its own.
#[derive(Clone)]
pub struct SqliteStore {
  target:       PathBuf,
  flags:        OpenFlags,
  busy_timeout: Duration,
  /// Keeps a shared in-memory database alive between requests.
  _keeper:      Option<tokio_rusqlite::Connection>,
}

impl SqliteStore {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let target = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&target)
      .await
      .map_err(|source| Error::Connect { target: target.display().to_string(), source })?;
    init_schema(&conn).await?;
    tracing::debug!(path = %target.display(), "initialised person store");

    Ok(Self::attach(target))
  }

  /// Point at an existing database without creating or initialising it.
  ///
  /// Connections fail if the file does not exist.
  pub fn attach(path: impl AsRef<Path>) -> Self {
    Self {
      target:       path.as_ref().to_path_buf(),
      flags:        OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX,
      busy_timeout: DEFAULT_BUSY_TIMEOUT,
      _keeper:      None,
    }
  }

  /// Open a private in-memory database, for tests.
  ///
  /// Every connection from this store (and its clones) sees the same data,
  /// which lives as long as the store does.
  pub async fn open_in_memory() -> Result<Self> {
    let uri = format!("file:persons-{}?mode=memory&cache=shared", Uuid::new_v4());
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
      | OpenFlags::SQLITE_OPEN_CREATE
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let keeper = tokio_rusqlite::Connection::open_with_flags(&uri, flags)
      .await
      .map_err(|source| Error::Connect { target: uri.clone(), source })?;
    init_schema(&keeper).await?;

    Ok(Self {
      target: PathBuf::from(uri),
      flags,
      busy_timeout: DEFAULT_BUSY_TIMEOUT,
      _keeper: Some(keeper),
    })
  }
}

async fn init_schema(conn: &tokio_rusqlite::Connection) -> Result<()> {
  conn
    .call(|conn| {
      conn.execute_batch(SCHEMA)?;
      Ok(())
    })
    .await?;
  Ok(())
}

impl PersonStore for SqliteStore {
  type Error = Error;
  type Conn = SqliteConnection;

  async fn connect(&self) -> Result<SqliteConnection> {
    let target = self.target.display().to_string();
    let connect_err = |source| Error::Connect { target: target.clone(), source };

    let conn = tokio_rusqlite::Connection::open_with_flags(&self.target, self.flags)
      .await
      .map_err(connect_err)?;

    // SQLite opens lazily; touching the schema here surfaces a missing or
    // unreadable file as a connection failure rather than a query failure.
    let busy_timeout = self.busy_timeout;
    conn
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))?;
        Ok(())
      })
      .await
      .map_err(connect_err)?;

    tracing::debug!(%target, "opened database connection");
    Ok(SqliteConnection { conn })
  }
}

// ─── Connection ──────────────────────────────────────────────────────────────

/// One open database connection. Closed when dropped.
pub struct SqliteConnection {
  conn: tokio_rusqlite::Connection,
}

impl Drop for SqliteConnection {
  fn drop(&mut self) {
    tracing::debug!("closing database connection");
  }
}

fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:            row.get(0)?,
    name:          row.get(1)?,
    bio:           row.get(2)?,
    date_of_birth: row.get(3)?,
  })
}

impl PersonConnection for SqliteConnection {
  type Error = Error;

  async fn find(&self, id: PersonId) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, name, bio, date_of_birth FROM persons WHERE id = ?1",
            rusqlite::params![id],
            row_to_person,
          )
          .optional()?)
      })
      .await?;
    Ok(person)
  }

  async fn find_all(&self) -> Result<Vec<Person>> {
    let persons = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, bio, date_of_birth FROM persons ORDER BY id")?;
        let rows = stmt
          .query_map([], row_to_person)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(persons)
  }

  async fn insert(&self, person: NewPerson) -> Result<Person> {
    let name = person.name.clone();
    let bio = person.bio.clone();
    let date_of_birth = person.date_of_birth;

    let id: PersonId = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO persons (name, bio, date_of_birth) VALUES (?1, ?2, ?3)
           RETURNING id",
          rusqlite::params![name, bio, date_of_birth],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(person.with_id(id))
  }

  async fn update(&self, person: Person) -> Result<Person> {
    let Person { id, name, bio, date_of_birth } = person.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET name = ?1, bio = ?2, date_of_birth = ?3 WHERE id = ?4",
          rusqlite::params![name, bio, date_of_birth, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::PersonNotFound(id));
    }
    Ok(person)
  }

  async fn delete(&self, id: PersonId) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM persons WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
