//! Console admin menu.
//!
//! ```text
//! main menu
//! ├── [1] Add event
//! ├── [2] Show events ──────── [<id>] event ── [1] Edit event
//! │                                            [2] Delete event
//! │                                            [0] Return
//! ├── [3] Show registrations ─ [<id>] registration ── [0] Return
//! ├── [4] Generate report
//! └── [0] Exit program
//! ```
//!
//! Editing an event returns to the event list. Deleting one closes both the
//! detail menu and the list, because the list no longer matches the store.

use super::init::bootstrap;
use super::APP_METADATA_VERSION;
use crate::libs::{
    config::Config,
    console::Terminal,
    event::Event,
    export::Exporter,
    menu::{is_interrupted, run_nested, Flow, Menu, MenuContext, MenuItem, ReturnItem, Status},
    messages::Message,
    record::Model,
    registration::Registration,
};
use crate::db::db::Db;
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let db = bootstrap(&config)?;
    let mut console = Terminal::new();
    let mut ctx = MenuContext {
        db: &db,
        config: &config,
        console: &mut console,
    };

    match main_menu(&config).run(&mut ctx) {
        Ok(_) => Ok(()),
        // Ctrl-C at a menu prompt leaves the program.
        Err(err) if is_interrupted(&err) => Ok(()),
        Err(err) => Err(err),
    }
}

pub fn main_menu(config: &Config) -> Menu {
    let header = Message::MainMenuHeader {
        title: config.title.clone(),
        version: APP_METADATA_VERSION.to_string(),
    };
    Menu::new(
        header.to_string(),
        vec![
            Box::new(AddEvent),
            Box::new(ShowEvents),
            Box::new(ShowRegistrations),
            Box::new(GenerateReport),
            Box::new(ExitApp),
        ],
    )
}

/// One menu item per stored record, keyed by id, followed by `[0] Return`.
pub fn object_list<M>(db: &Db, header: Message, view_only: bool) -> Result<Menu>
where
    M: Model + Clone + 'static,
{
    let mut items: Vec<Box<dyn MenuItem>> = Vec::new();
    for model in M::load_many(db)? {
        if let Some(id) = model.id() {
            items.push(Box::new(ObjectItem {
                key: id.to_string(),
                model: Rc::new(RefCell::new(model)),
                view_only,
            }));
        }
    }
    items.push(Box::new(ReturnItem::new("0")));
    Ok(Menu::new(header.to_string(), items))
}

struct AddEvent;

impl MenuItem for AddEvent {
    fn key(&self) -> &str {
        "1"
    }

    fn label(&self) -> String {
        Message::MenuAddEvent.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        let mut event = Event::new();
        let id = event.create(ctx.db, ctx.console)?;
        parent.set_message(Message::ObjectAdded(id));
        Ok(Flow::Continue)
    }
}

struct ShowEvents;

impl MenuItem for ShowEvents {
    fn key(&self) -> &str {
        "2"
    }

    fn label(&self) -> String {
        Message::MenuShowEvents.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        let menu = object_list::<Event>(ctx.db, Message::SelectEvent, false)?;
        run_nested(parent, menu, ctx)
    }
}

struct ShowRegistrations;

impl MenuItem for ShowRegistrations {
    fn key(&self) -> &str {
        "3"
    }

    fn label(&self) -> String {
        Message::MenuShowRegistrations.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        let menu = object_list::<Registration>(ctx.db, Message::SelectRegistration, true)?;
        run_nested(parent, menu, ctx)
    }
}

struct GenerateReport;

impl MenuItem for GenerateReport {
    fn key(&self) -> &str {
        "4"
    }

    fn label(&self) -> String {
        Message::MenuGenerateReport.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        let path = Exporter::new(ctx.config, None).export(ctx.db)?;
        parent.set_message(Message::ReportCreated(path.display().to_string()));
        Ok(Flow::Continue)
    }
}

struct ExitApp;

impl MenuItem for ExitApp {
    fn key(&self) -> &str {
        "0"
    }

    fn label(&self) -> String {
        Message::MenuExit.to_string()
    }

    fn call(&mut self, _parent: &mut Status, _ctx: &mut MenuContext<'_>) -> Result<Flow> {
        Ok(Flow::Terminate)
    }
}

/// Opens the detail menu of one record.
struct ObjectItem<M> {
    key: String,
    model: Rc<RefCell<M>>,
    view_only: bool,
}

impl<M> MenuItem for ObjectItem<M>
where
    M: Model + Clone + 'static,
{
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        self.model.borrow().summary()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        let header = self.model.borrow().verbose_details();
        let mut items: Vec<Box<dyn MenuItem>> = Vec::new();
        if !self.view_only {
            items.push(Box::new(EditRecord { model: Rc::clone(&self.model) }));
            items.push(Box::new(DeleteRecord { model: Rc::clone(&self.model) }));
        }
        items.push(Box::new(ReturnItem::new("0")));
        run_nested(parent, Menu::new(header, items), ctx)
    }
}

struct EditRecord<M> {
    model: Rc<RefCell<M>>,
}

impl<M> MenuItem for EditRecord<M>
where
    M: Model + Clone + 'static,
{
    fn key(&self) -> &str {
        "1"
    }

    fn label(&self) -> String {
        Message::MenuEditEvent.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        // Edit a copy so an interrupted prompt leaves the listed values intact.
        let mut edited = self.model.borrow().clone();
        edited.update(ctx.db, ctx.console)?;
        *self.model.borrow_mut() = edited;
        parent.set_message(Message::ObjectUpdated);
        Ok(Flow::Pop(1))
    }
}

struct DeleteRecord<M> {
    model: Rc<RefCell<M>>,
}

impl<M> MenuItem for DeleteRecord<M>
where
    M: Model + Clone + 'static,
{
    fn key(&self) -> &str {
        "2"
    }

    fn label(&self) -> String {
        Message::MenuDeleteEvent.to_string()
    }

    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        self.model.borrow_mut().delete(ctx.db)?;
        parent.set_message(Message::ObjectDeleted);
        Ok(Flow::Pop(2))
    }
}
