use super::fields::FieldDescriptor;
use super::record::{Choice, Model, Record, ID_COLUMN};
use crate::db::db::DbRow;
use std::fmt;

static REGISTRATION_FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor::integer("event_id", "Event"),
    FieldDescriptor::text("first_name", "First name").help("First name, at most 35 characters"),
    FieldDescriptor::text("last_name", "Last name").help("Last name, at most 35 characters"),
    FieldDescriptor::email("email", "E-mail address").help("A valid e-mail address"),
    FieldDescriptor::auto_date("registration_date", "Registration date"),
];

/// A person's registration for an event.
///
/// `event_id` is only checked to be an integer; whether the event exists is
/// not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    record: Record,
}

impl Model for Registration {
    const TABLE: &'static str = "registrations";
    const VERBOSE_NAME: &'static str = "Registration";

    fn descriptors() -> &'static [FieldDescriptor] {
        &REGISTRATION_FIELDS
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

    /// `(id, "first_name last_name / email")`
    fn project(row: &DbRow) -> Choice {
        (
            row.text(ID_COLUMN),
            format!("{} {} / {}", row.text("first_name"), row.text("last_name"), row.text("email")),
        )
    }

    fn summary(&self) -> String {
        format!(
            "{} - {}: {}",
            self.value_text("first_name"),
            self.value_text("last_name"),
            self.value_text("registration_date")
        )
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.id() {
            Some(id) => write!(f, "[{}] {}", id, self.summary()),
            None => f.write_str(Self::VERBOSE_NAME),
        }
    }
}
