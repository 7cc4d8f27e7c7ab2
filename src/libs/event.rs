use super::fields::FieldDescriptor;
use super::record::{Choice, Model, Record, ID_COLUMN};
use crate::db::db::DbRow;
use std::fmt;

static EVENT_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::text("name", "Event name").help("Name, at most 35 characters"),
    FieldDescriptor::date("start_date", "Start date"),
    FieldDescriptor::date("end_date", "End date"),
    FieldDescriptor::text("location", "Location").help("Name, at most 35 characters"),
    FieldDescriptor::integer("slots", "Slots")
        .optional()
        .help("Number of available places, zero means no limit"),
    FieldDescriptor::text("description", "Description")
        .length(3, 512)
        .help("Description, at most 512 characters"),
];

/// An event registrations are collected for.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    record: Record,
}

impl Model for Event {
    const TABLE: &'static str = "events";
    const VERBOSE_NAME: &'static str = "Event";

    fn descriptors() -> &'static [FieldDescriptor] {
        &EVENT_FIELDS
    }

    fn from_record(record: Record) -> Self {
        Self { record }
    }

    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    /// `(id, "name / start_date / location")`
    fn project(row: &DbRow) -> Choice {
        (
            row.text(ID_COLUMN),
            format!("{} / {} / {}", row.text("name"), row.text("start_date"), row.text("location")),
        )
    }

    fn summary(&self) -> String {
        format!("{} - {}", self.value_text("name"), self.value_text("start_date"))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "[{}] {}", id, self.summary()),
            None => f.write_str(Self::VERBOSE_NAME),
        }
    }
}
