//! SQL schema for the persons SQLite store.
//!
//! Executed once when the store is opened, never per connection.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS persons (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    bio           TEXT    NOT NULL,
    date_of_birth INTEGER NOT NULL CHECK (date_of_birth >= 0)  -- unix seconds
);
";

