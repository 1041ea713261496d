//! Core types and trait definitions for the persons service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates depend on it; it depends on nothing of theirs.

pub mod error;
pub mod person;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
