//! SQLite backend for the persons store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every [`SqliteStore::connect`] opens a
//! brand-new connection; nothing is pooled.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{SqliteConnection, SqliteStore};
