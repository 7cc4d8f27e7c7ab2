//! Generic record model.
//!
//! A [`Record`] is an optional database identity plus the fields built from a
//! record type's descriptors. The [`Model`] trait turns any type that wraps a
//! record into a persisted entity: a concrete type only names its table and
//! field list and chooses how it is summarised; creating, updating, deleting
//! and loading come from the trait's provided methods, all built on tagged
//! queries and single-use sessions.
//!
//! ## Identity rules
//!
//! - A record without an id is new: it may be created, never updated or deleted.
//! - A record with an id is persisted: creating it again is rejected.
//! - Deleting a record forgets its id, so the in-memory value can no longer
//!   address the removed row.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::db::db::Db;
//! use amelia::libs::event::Event;
//! use amelia::libs::record::Model;
//!
//! let db = Db::open("amelia.db");
//! for (id, summary) in Event::items(&db)? {
//!     println!("{id}: {summary}");
//! }
//! # Ok::<(), amelia::libs::record::RecordError>(())
//! ```

use super::console::{Console, InputError};
use super::fields::{Field, FieldDescriptor, FieldError};
use crate::db::db::{Db, DbError, DbRow};
use crate::db::query::{QueryError, SqlQuery};
use rusqlite::types::Value;
use thiserror::Error;
use tracing::debug;

/// Column that carries a row's identity rather than a field value.
pub const ID_COLUMN: &str = "id";

/// `(identity, human summary)` pair used by selection lists.
pub type Choice = (String, String);

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record already exists with id {0}")]
    AlreadyPersisted(i64),

    #[error("An id is required to update or delete a record")]
    MissingId,

    #[error("Field '{0}' not found")]
    FieldNotFound(String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("{0}")]
    Input(#[from] InputError),
}

impl From<QueryError> for RecordError {
    fn from(err: QueryError) -> Self {
        RecordError::Db(DbError::Query(err))
    }
}

impl RecordError {
    /// Whether the error is a rejected value the caller can ask for again.
    pub fn is_validation(&self) -> bool {
        matches!(self, RecordError::Field(err) if err.validation().is_some())
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, RecordError::Input(InputError::Interrupted))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: Option<i64>,
    fields: Vec<Field>,
}

impl Record {
    /// Builds a new, unsaved record with a fresh field set.
    pub fn new(descriptors: &'static [FieldDescriptor]) -> Self {
        Self {
            id: None,
            fields: descriptors.iter().map(FieldDescriptor::build).collect(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Result<&Field, RecordError> {
        self.fields
            .iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))
    }

    pub fn get_field_mut(&mut self, name: &str) -> Result<&mut Field, RecordError> {
        self.fields
            .iter_mut()
            .find(|field| field.name() == name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))
    }

    /// Populates the record from a stored row, pairing columns with fields by name.
    pub fn init(&mut self, row: DbRow) -> Result<(), RecordError> {
        for (column, value) in row {
            if column == ID_COLUMN {
                self.id = match value {
                    Value::Integer(id) => Some(id),
                    _ => None,
                };
            } else {
                self.get_field_mut(&column)?.load(value);
            }
        }
        Ok(())
    }

    /// Column names and store values of every field, in declaration order.
    fn db_values(&self) -> Result<(Vec<&'static str>, Vec<Value>), RecordError> {
        let mut columns = Vec::with_capacity(self.fields.len());
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            columns.push(field.name());
            values.push(field.get_db_value()?);
        }
        Ok((columns, values))
    }

    fn require_id(&self) -> Result<i64, RecordError> {
        self.id.ok_or(RecordError::MissingId)
    }
}

fn insert_query(table: &str, columns: &[&str]) -> Result<SqlQuery, QueryError> {
    let names = columns.iter().map(|name| format!("\"{}\"", name)).collect::<Vec<_>>().join(", ");
    let placeholders = (1..=columns.len()).map(|index| format!("?{}", index)).collect::<Vec<_>>().join(", ");
    SqlQuery::insert(format!("INSERT INTO {} ({}) VALUES ({})", table, names, placeholders))
}

fn update_query(table: &str, columns: &[&str]) -> Result<SqlQuery, QueryError> {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(index, name)| format!("\"{}\" = ?{}", name, index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    SqlQuery::update(format!("UPDATE {} SET {} WHERE id = ?{}", table, assignments, columns.len() + 1))
}

fn delete_query(table: &str) -> Result<SqlQuery, QueryError> {
    SqlQuery::delete(format!("DELETE FROM {} WHERE id = ?1", table))
}

fn fetch_one_query(table: &str) -> Result<SqlQuery, QueryError> {
    SqlQuery::select(format!("SELECT * FROM {} WHERE id = ?1", table))
}

fn fetch_many_query(table: &str) -> Result<SqlQuery, QueryError> {
    SqlQuery::multi_select(format!("SELECT * FROM {} ORDER BY id", table))
}

/// A persisted record type.
pub trait Model: Sized {
    /// Table the rows live in.
    const TABLE: &'static str;

    /// Human name of the record type.
    const VERBOSE_NAME: &'static str;

    /// Field list, in column order.
    fn descriptors() -> &'static [FieldDescriptor];

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn record_mut(&mut self) -> &mut Record;

    /// Projects one stored row into a selection-list entry.
    fn project(row: &DbRow) -> Choice;

    /// One-line description used as a menu label.
    fn summary(&self) -> String;

    fn new() -> Self {
        Self::from_record(Record::new(Self::descriptors()))
    }

    fn id(&self) -> Option<i64> {
        self.record().id()
    }

    fn get_field(&self, name: &str) -> Result<&Field, RecordError> {
        self.record().get_field(name)
    }

    /// Field value rendered for display; unset fields render empty.
    fn value_text(&self, name: &str) -> String {
        self.get_field(name)
            .and_then(|field| field.get_value().map_err(RecordError::from))
            .map(|value| value.to_string())
            .unwrap_or_default()
    }

    /// `<label>: <value>` for every field, one per line.
    fn verbose_details(&self) -> String {
        let mut text = String::new();
        for field in self.record().fields() {
            let value = field.get_value().map(|value| value.to_string()).unwrap_or_default();
            text.push_str(&format!("{}: {}\n", field.verbose_name(), value));
        }
        text
    }

    /// Asks for every editable field, re-prompting until each value passes
    /// its rules. Only an interrupt ends the loop early.
    fn read_data(&mut self, console: &mut dyn Console) -> Result<(), RecordError> {
        for field in &mut self.record_mut().fields {
            if !field.descriptor().editable {
                continue;
            }
            loop {
                let raw = console.read_field(field)?;
                match field.set_raw(&raw) {
                    Ok(()) => break,
                    Err(err) => console.reject(&err),
                }
            }
        }
        Ok(())
    }

    /// Prompts for all values and stores a new row. Returns the new id.
    fn create(&mut self, db: &Db, console: &mut dyn Console) -> Result<i64, RecordError> {
        if let Some(id) = self.id() {
            return Err(RecordError::AlreadyPersisted(id));
        }
        self.read_data(console)?;
        self.save(db)
    }

    /// Prompts for all values and rewrites the stored row.
    fn update(&mut self, db: &Db, console: &mut dyn Console) -> Result<(), RecordError> {
        self.record().require_id()?;
        self.read_data(console)?;
        self.update_data(db)
    }

    /// Inserts the current field values as a new row and takes its id.
    fn save(&mut self, db: &Db) -> Result<i64, RecordError> {
        if let Some(id) = self.id() {
            return Err(RecordError::AlreadyPersisted(id));
        }
        let (columns, values) = self.record().db_values()?;
        let query = insert_query(Self::TABLE, &columns)?;
        let id = db.session(|session| session.insert(&query, &values))?;
        debug!(table = Self::TABLE, id, "record inserted");
        self.record_mut().id = Some(id);
        Ok(id)
    }

    /// Overwrites every column of the stored row with the current values.
    fn update_data(&self, db: &Db) -> Result<(), RecordError> {
        let id = self.record().require_id()?;
        let (columns, mut values) = self.record().db_values()?;
        let query = update_query(Self::TABLE, &columns)?;
        values.push(Value::Integer(id));
        db.session(|session| session.execute(&query, &values))?;
        debug!(table = Self::TABLE, id, "record updated");
        Ok(())
    }

    /// Removes the stored row and forgets the id. Returns the number of rows
    /// removed, which is zero when the row was already gone.
    fn delete(&mut self, db: &Db) -> Result<usize, RecordError> {
        let id = self.record().require_id()?;
        let query = delete_query(Self::TABLE)?;
        let removed = db.session(|session| session.execute(&query, &[Value::Integer(id)]))?;
        debug!(table = Self::TABLE, id, removed, "record deleted");
        self.record_mut().id = None;
        Ok(removed)
    }

    /// Loads the row with the given id.
    fn load_one(db: &Db, id: i64) -> Result<Option<Self>, RecordError> {
        let query = fetch_one_query(Self::TABLE)?;
        let row = db.session(|session| session.fetch_one(&query, &[Value::Integer(id)]))?;
        row.map(Self::from_row).transpose()
    }

    /// Every stored row, unformatted.
    fn all(db: &Db) -> Result<Vec<DbRow>, RecordError> {
        let query = fetch_many_query(Self::TABLE)?;
        db.session(|session| session.fetch_many(&query, Ok::<_, RecordError>))
    }

    /// Every stored row as a record instance.
    fn load_many(db: &Db) -> Result<Vec<Self>, RecordError> {
        let query = fetch_many_query(Self::TABLE)?;
        db.session(|session| session.fetch_many(&query, Self::from_row))
    }

    /// Every stored row projected for a selection list.
    fn items(db: &Db) -> Result<Vec<Choice>, RecordError> {
        let query = fetch_many_query(Self::TABLE)?;
        db.session(|session| session.fetch_many(&query, |row| Ok::<_, RecordError>(Self::project(&row))))
    }

    /// Validates the named values that belong to this type, skipping unknown
    /// names, and stores the result as a new row. Nothing is written when any
    /// value is rejected.
    fn set_data<I, K, V>(&mut self, db: &Db, data: I) -> Result<i64, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in data {
            match self.record_mut().get_field_mut(name.as_ref()) {
                Ok(field) => field.set_raw(value.as_ref())?,
                Err(RecordError::FieldNotFound(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        self.save(db)
    }

    fn from_row(row: DbRow) -> Result<Self, RecordError> {
        let mut record = Record::new(Self::descriptors());
        record.init(row)?;
        Ok(Self::from_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_queries() {
        let insert = insert_query("events", &["name", "slots"]).unwrap();
        assert_eq!(insert.as_str(), "INSERT INTO events (\"name\", \"slots\") VALUES (?1, ?2)");

        let update = update_query("events", &["name", "slots"]).unwrap();
        assert_eq!(update.as_str(), "UPDATE events SET \"name\" = ?1, \"slots\" = ?2 WHERE id = ?3");

        assert_eq!(delete_query("events").unwrap().as_str(), "DELETE FROM events WHERE id = ?1");
        assert_eq!(fetch_many_query("events").unwrap().as_str(), "SELECT * FROM events ORDER BY id");
    }

    static FIELDS: [FieldDescriptor; 2] = [
        FieldDescriptor::text("name", "Name"),
        FieldDescriptor::integer("slots", "Slots").optional(),
    ];

    #[test]
    fn test_init_binds_columns_by_name() {
        let mut record = Record::new(&FIELDS);
        record
            .init(DbRow::new(vec![
                ("id".to_string(), Value::Integer(4)),
                ("slots".to_string(), Value::Integer(10)),
            ]))
            .unwrap();

        assert_eq!(record.id(), Some(4));
        assert!(!record.get_field("name").unwrap().is_set());
        assert_eq!(record.get_field("slots").unwrap().get_value().unwrap().to_string(), "10");
    }

    #[test]
    fn test_init_rejects_unknown_column() {
        let mut record = Record::new(&FIELDS);
        let err = record.init(DbRow::new(vec![("colour".to_string(), Value::Null)])).unwrap_err();
        assert!(matches!(err, RecordError::FieldNotFound(name) if name == "colour"));
    }
}
