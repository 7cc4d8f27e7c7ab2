//! Database layer for the amelia application.
//!
//! A thin, typed wrapper around an embedded SQLite file. The layer has two
//! parts: verb-tagged queries that declare their intent before they can run,
//! and single-use sessions that execute those queries inside one transaction.
//!
//! ## Features
//!
//! - **Tagged Queries**: `INSERT`/`UPDATE`/`DELETE`/`SELECT` text is checked
//!   against its kind at construction and again at execution
//! - **Scoped Sessions**: one connection and one transaction per unit of work,
//!   committed on success and rolled back on failure
//! - **Parameterised Values**: values always travel as `?` placeholders
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::db::{db::Db, query::SqlQuery};
//! use rusqlite::types::Value;
//!
//! let db = Db::open("amelia.db");
//! db.ensure_schema()?;
//! let query = SqlQuery::delete("DELETE FROM events WHERE id = ?1")?;
//! let removed = db.session(|session| session.execute(&query, &[Value::Integer(7)]))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Store handle, sessions and result rows.
///
/// Provides the `Db` handle that opens a fresh connection per session, the
/// `Session` type exposing `insert`/`execute`/`fetch_one`/`fetch_many`, and
/// the schema bootstrap for the `events` and `registrations` tables.
pub mod db;

/// Verb-tagged SQL query text.
pub mod query;
