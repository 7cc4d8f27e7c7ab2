use super::event::Event;
use super::record::{Model, ID_COLUMN};
use super::registration::Registration;
use crate::db::db::{Db, DbRow};
use anyhow::Result;
use prettytable::{row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    /// Events with the number of registrations each one has, or `None`
    /// when no event is stored.
    pub fn events(db: &Db) -> Result<Option<Table>> {
        let events = Event::all(db)?;
        if events.is_empty() {
            return Ok(None);
        }
        let mut counts: HashMap<String, usize> = HashMap::new();
        for registration in Registration::all(db)? {
            *counts.entry(registration.text("event_id")).or_default() += 1;
        }
        Ok(Some(Self::events_table(&events, &counts)))
    }

    pub fn events_table(events: &[DbRow], counts: &HashMap<String, usize>) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "START", "END", "LOCATION", "SLOTS", "REGISTRATIONS"]);
        for event in events {
            let id = event.text(ID_COLUMN);
            table.add_row(row![
                id,
                event.text("name"),
                event.text("start_date"),
                event.text("end_date"),
                event.text("location"),
                event.text("slots"),
                counts.get(&id).copied().unwrap_or(0)
            ]);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::Value;

    #[test]
    fn test_events_table_counts_registrations() {
        let event = DbRow::new(vec![
            ("id".to_string(), Value::Integer(4)),
            ("name".to_string(), Value::Text("Spring Fair".to_string())),
            ("start_date".to_string(), Value::Text("2024-05-01".to_string())),
            ("end_date".to_string(), Value::Text("2024-05-02".to_string())),
            ("location".to_string(), Value::Text("Hall A".to_string())),
            ("slots".to_string(), Value::Integer(0)),
        ]);
        let counts = HashMap::from([("4".to_string(), 3)]);

        let rendered = View::events_table(&[event], &counts).to_string();
        assert!(rendered.contains("Spring Fair"));
        assert!(rendered.contains("REGISTRATIONS"));
        assert!(rendered.contains(" 3 "));
    }
}
