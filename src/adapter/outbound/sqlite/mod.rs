//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`store::SqliteAlertStore`] using Diesel ORM.

pub mod database;
pub mod store;
