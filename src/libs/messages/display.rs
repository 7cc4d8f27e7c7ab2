//! Display implementation for amelia application messages.
//!
//! Every user-facing string lives here, keyed by a [`Message`] variant, so the
//! menu engine, the record prompts and the subcommands never embed literal
//! text. Parameterised variants interpolate their values with plain
//! `format!`-style formatting.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === MENU MESSAGES ===
            Message::MainMenuHeader { title, version } => format!("{} {} - main menu:", title, version),
            Message::MenuAddEvent => "Add event".to_string(),
            Message::MenuShowEvents => "Show events".to_string(),
            Message::MenuShowRegistrations => "Show registrations".to_string(),
            Message::MenuGenerateReport => "Generate report".to_string(),
            Message::MenuExit => "Exit program".to_string(),
            Message::MenuReturn => "Return".to_string(),
            Message::MenuEditEvent => "Edit event".to_string(),
            Message::MenuDeleteEvent => "Delete event".to_string(),
            Message::SelectEvent => "Select an event:".to_string(),
            Message::SelectRegistration => "Select a registration:".to_string(),

            // === RECORD MESSAGES ===
            Message::ObjectAdded(id) => format!("Added new object: {}", id),
            Message::ObjectUpdated => "Object modified".to_string(),
            Message::ObjectDeleted => "Object deleted".to_string(),
            Message::InvalidValue(error) => format!("Invalid value. {}", error),

            // === REPORT MESSAGES ===
            Message::ReportCreated(path) => format!("Report written to {}", path),
            Message::EventsHeader => "Events and registrations".to_string(),
            Message::NoEventsFound => "No events found".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigAlreadyExists(path) => format!("Configuration already exists at {}", path),
            Message::SchemaReady(path) => format!("Database ready at {}", path),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
