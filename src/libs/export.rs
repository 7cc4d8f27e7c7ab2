//! Registration report export.
//!
//! Writes every stored registration, joined with the name of its event, to a
//! CSV file. Without an explicit output path the file lands in the configured
//! report directory as `registrations_<YYYYmmdd_HHMMSS>.csv`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use amelia::db::db::Db;
//! use amelia::libs::config::Config;
//! use amelia::libs::export::Exporter;
//!
//! let config = Config::read()?;
//! let path = Exporter::new(&config, None).export(&Db::new(&config))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::config::Config;
use super::event::Event;
use super::record::{Model, ID_COLUMN};
use super::registration::Registration;
use crate::db::db::{Db, DbRow};
use anyhow::Result;
use chrono::Local;
use rusqlite::types::Value;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const REPORT_PREFIX: &str = "registrations";

/// One line of the registration report.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReportRow {
    pub id: String,
    pub event_id: String,
    /// Name of the referenced event, empty when the event no longer exists.
    pub event: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub registration_date: String,
}

pub struct Exporter {
    output_path: PathBuf,
}

impl Exporter {
    /// Exporter writing to `output_path`, or to a timestamped file in the
    /// configured report directory.
    pub fn new(config: &Config, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let name = format!("{}_{}.csv", REPORT_PREFIX, Local::now().format("%Y%m%d_%H%M%S"));
            config.report_dir.join(name)
        });
        Self { output_path }
    }

    /// Writes the report and returns the path of the written file.
    pub fn export(&self, db: &Db) -> Result<PathBuf> {
        let rows = gather_rows(db)?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        if rows.is_empty() {
            wtr.write_record(["id", "event_id", "event", "first_name", "last_name", "email", "registration_date"])?;
        }
        for row in &rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        debug!(path = %self.output_path.display(), rows = rows.len(), "registration report written");
        Ok(self.output_path.clone())
    }
}

/// Registrations in id order, each joined with its event name.
pub fn gather_rows(db: &Db) -> Result<Vec<ReportRow>> {
    let event_names: HashMap<i64, String> = Event::all(db)?
        .iter()
        .filter_map(|row| integer(row, ID_COLUMN).map(|id| (id, row.text("name"))))
        .collect();

    let rows = Registration::all(db)?
        .iter()
        .map(|row| ReportRow {
            id: row.text(ID_COLUMN),
            event_id: row.text("event_id"),
            event: integer(row, "event_id")
                .and_then(|id| event_names.get(&id).cloned())
                .unwrap_or_default(),
            first_name: row.text("first_name"),
            last_name: row.text("last_name"),
            email: row.text("email"),
            registration_date: row.text("registration_date"),
        })
        .collect();

    Ok(rows)
}

fn integer(row: &DbRow, column: &str) -> Option<i64> {
    match row.get(column) {
        Some(Value::Integer(value)) => Some(*value),
        _ => None,
    }
}
