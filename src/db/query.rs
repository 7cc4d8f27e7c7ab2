//! Verb-tagged SQL queries.
//!
//! Every statement the record layer sends to the store is wrapped in a
//! [`SqlQuery`] that carries the kind of work it performs. The tag is checked
//! twice: once when the query is built (the text must start with the verb of
//! its kind) and once when a [`Session`](super::db::Session) executes it (the
//! session method must accept that kind). A query typed as `Select` can never
//! be run through `execute`, and an `UPDATE` cannot be smuggled in through
//! `insert`.
//!
//! ## Usage
//!
//! ```rust
//! use amelia::db::query::{QueryKind, SqlQuery};
//!
//! let query = SqlQuery::delete("DELETE FROM events WHERE id = ?1")?;
//! assert_eq!(query.kind(), QueryKind::Delete);
//!
//! assert!(SqlQuery::update("DELETE FROM events").is_err());
//! # Ok::<(), amelia::db::query::QueryError>(())
//! ```

use std::fmt;
use thiserror::Error;

/// The kind of statement a query performs.
///
/// `MultiSelect` is a sub-kind of `Select`: it shares the verb but is consumed
/// row by row as a full result set instead of as a single optional row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Insert,
    Update,
    Delete,
    Select,
    MultiSelect,
}

impl QueryKind {
    /// SQL verb the query text must begin with.
    pub const fn verb(self) -> &'static str {
        match self {
            QueryKind::Insert => "INSERT",
            QueryKind::Update => "UPDATE",
            QueryKind::Delete => "DELETE",
            QueryKind::Select | QueryKind::MultiSelect => "SELECT",
        }
    }

    /// Whether a query of this kind may be used where `expected` is required.
    pub fn satisfies(self, expected: QueryKind) -> bool {
        self == expected || (expected == QueryKind::Select && self == QueryKind::MultiSelect)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The text does not begin with the verb its tag requires.
    #[error("Invalid SQL query: expected a {kind} statement, got '{text}'")]
    InvalidQuery { kind: QueryKind, text: String },

    /// A session operation was handed a query of the wrong kind.
    #[error("Wrong query kind: expected {expected}, got {found}")]
    WrongKind { expected: String, found: QueryKind },
}

/// Immutable SQL text paired with the kind of statement it performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlQuery {
    kind: QueryKind,
    text: String,
}

impl SqlQuery {
    /// Tags `text` with `kind`, failing immediately when the verb does not match.
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Result<Self, QueryError> {
        let text = text.into();
        if !text.starts_with(kind.verb()) {
            return Err(QueryError::InvalidQuery { kind, text });
        }
        Ok(Self { kind, text })
    }

    pub fn insert(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(QueryKind::Insert, text)
    }

    pub fn update(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(QueryKind::Update, text)
    }

    pub fn delete(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(QueryKind::Delete, text)
    }

    pub fn select(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(QueryKind::Select, text)
    }

    pub fn multi_select(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(QueryKind::MultiSelect, text)
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Checks that this query's kind satisfies one of the `accepted` kinds.
    pub fn expect(&self, accepted: &[QueryKind]) -> Result<&Self, QueryError> {
        if accepted.iter().any(|kind| self.kind.satisfies(*kind)) {
            return Ok(self);
        }
        let expected = accepted.iter().map(ToString::to_string).collect::<Vec<_>>().join(" or ");
        Err(QueryError::WrongKind { expected, found: self.kind })
    }
}

impl fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}
