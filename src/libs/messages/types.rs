#[derive(Debug, Clone)]
pub enum Message {
    // === MENU MESSAGES ===
    MainMenuHeader { title: String, version: String },
    MenuAddEvent,
    MenuShowEvents,
    MenuShowRegistrations,
    MenuGenerateReport,
    MenuExit,
    MenuReturn,
    MenuEditEvent,
    MenuDeleteEvent,
    SelectEvent,
    SelectRegistration,

    // === RECORD MESSAGES ===
    ObjectAdded(i64), // id
    ObjectUpdated,
    ObjectDeleted,
    InvalidValue(String), // validation error

    // === REPORT MESSAGES ===
    ReportCreated(String), // path
    EventsHeader,
    NoEventsFound,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String),         // path
    ConfigAlreadyExists(String), // path
    SchemaReady(String),         // database path

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
