use super::query::{QueryError, QueryKind, SqlQuery};
use crate::libs::config::Config;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const DB_FILE_NAME: &str = "amelia.db";

const SCHEMA_EVENTS: &str = "CREATE TABLE IF NOT EXISTS events (
    id INTEGER NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    location TEXT NOT NULL,
    slots INTEGER NOT NULL DEFAULT 0,
    description TEXT NOT NULL
);";
const SCHEMA_REGISTRATIONS: &str = "CREATE TABLE IF NOT EXISTS registrations (
    id INTEGER NOT NULL PRIMARY KEY,
    event_id INTEGER NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    registration_date DATE NOT NULL
);";

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),
}

/// One result row as `(column name, value)` pairs in select-list order.
#[derive(Debug, Clone, PartialEq)]
pub struct DbRow {
    columns: Vec<(String, Value)>,
}

impl DbRow {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }

    /// Renders a column for display; missing columns and NULL render empty.
    pub fn text(&self, column: &str) -> String {
        match self.get(column) {
            Some(Value::Text(text)) => text.clone(),
            Some(Value::Integer(number)) => number.to_string(),
            Some(Value::Real(number)) => number.to_string(),
            Some(Value::Blob(bytes)) => String::from_utf8_lossy(bytes).into_owned(),
            Some(Value::Null) | None => String::new(),
        }
    }
}

impl IntoIterator for DbRow {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// Handle to the store file. Opens a fresh connection for every session.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    pub fn new(config: &Config) -> Db {
        Db::open(&config.db_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Db {
        Db { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the `events` and `registrations` tables when they are missing.
    pub fn ensure_schema(&self) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.path)?;
        conn.execute(SCHEMA_EVENTS, [])?;
        conn.execute(SCHEMA_REGISTRATIONS, [])?;
        debug!(path = %self.path.display(), "schema ensured");
        Ok(())
    }

    /// Runs `work` inside a single-use session.
    ///
    /// The session owns one connection and one transaction. The transaction
    /// is committed when `work` returns `Ok` and rolled back when it returns
    /// `Err` (or unwinds). The connection is closed on every path.
    pub fn session<T, E>(&self, work: impl FnOnce(&Session<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let mut conn = Connection::open(&self.path).map_err(DbError::from)?;
        let tx = conn.transaction().map_err(DbError::from)?;
        let session = Session { tx };

        match work(&session) {
            Ok(value) => {
                session.tx.commit().map_err(DbError::from)?;
                debug!("transaction committed");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = session.tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                debug!("transaction rolled back");
                Err(err)
            }
        }
    }
}

/// Executes tagged queries inside one transaction. Obtained from [`Db::session`].
pub struct Session<'conn> {
    tx: Transaction<'conn>,
}

impl Session<'_> {
    /// Runs an `Insert` query and returns the identity assigned to the new row.
    pub fn insert(&self, query: &SqlQuery, values: &[Value]) -> Result<i64, DbError> {
        query.expect(&[QueryKind::Insert])?;
        debug!(kind = %query.kind(), sql = query.as_str(), "execute");
        self.tx.execute(query.as_str(), params_from_iter(values.iter()))?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Runs an `Update` or `Delete` query and returns the number of affected rows.
    pub fn execute(&self, query: &SqlQuery, values: &[Value]) -> Result<usize, DbError> {
        query.expect(&[QueryKind::Update, QueryKind::Delete])?;
        debug!(kind = %query.kind(), sql = query.as_str(), "execute");
        Ok(self.tx.execute(query.as_str(), params_from_iter(values.iter()))?)
    }

    /// Runs a `Select` query and returns its first row, if any.
    pub fn fetch_one(&self, query: &SqlQuery, values: &[Value]) -> Result<Option<DbRow>, DbError> {
        query.expect(&[QueryKind::Select])?;
        debug!(kind = %query.kind(), sql = query.as_str(), "query");
        let mut stmt = self.tx.prepare(query.as_str())?;
        let columns = column_names(&stmt);
        let mut rows = stmt.query(params_from_iter(values.iter()))?;

        let first = match rows.next()? {
            Some(row) => Some(read_row(&columns, row)?),
            None => None,
        };
        Ok(first)
    }

    /// Runs a `MultiSelect` query, handing each row to `each` as it is read
    /// from the cursor. The result set is walked once, front to back.
    pub fn fetch_many<T, E>(&self, query: &SqlQuery, mut each: impl FnMut(DbRow) -> Result<T, E>) -> Result<Vec<T>, E>
    where
        E: From<DbError>,
    {
        query.expect(&[QueryKind::MultiSelect]).map_err(DbError::from)?;
        debug!(kind = %query.kind(), sql = query.as_str(), "query");
        let mut stmt = self.tx.prepare(query.as_str()).map_err(DbError::from)?;
        let columns = column_names(&stmt);
        let mut rows = stmt.query([]).map_err(DbError::from)?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::from)? {
            items.push(each(read_row(&columns, row)?)?);
        }
        Ok(items)
    }
}

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

fn read_row(columns: &[String], row: &rusqlite::Row<'_>) -> Result<DbRow, DbError> {
    let mut pairs = Vec::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        pairs.push((name.clone(), row.get::<_, Value>(index)?));
    }
    Ok(DbRow::new(pairs))
}
