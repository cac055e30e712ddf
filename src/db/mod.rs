//! Database module: models, schema and SQLite storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for the finance tables, in foreign-key order
//! - `sqlite.rs`: pool setup, schema initialization and user queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbUser, NewUser, UserId};
pub use schema::SCHEMA;
pub use sqlite::{SchemaReport, SqlitePool, UsersStorage, connect};
