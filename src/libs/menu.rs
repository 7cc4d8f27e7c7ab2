//! Recursive console menu engine.
//!
//! A [`Menu`] shows a header, a one-shot status message and its items as
//! `[key] label` lines, reads a key and runs the matching [`MenuItem`]. Items
//! report what should happen next through a [`Flow`] value instead of
//! unwinding the stack:
//!
//! - `Flow::Continue` keeps the current menu on screen.
//! - `Flow::Pop(n)` closes `n` nested menus, counting the current one.
//! - `Flow::Terminate` closes every menu up to the caller of the outermost one.
//!
//! Items may open nested menus with [`run_nested`], which runs the inner menu
//! to completion, forwards any status message it did not get to show, and
//! hands its remaining flow back to the outer menu.
//!
//! ```text
//! main menu ── "2" ──▶ event list ── "7" ──▶ event detail ── delete ──▶ Pop(2)
//!     ▲                                                                    │
//!     └──────────────── event list closed, detail closed ◀─────────────────┘
//! ```
//!
//! A key that matches no item is ignored. An item interrupted by the user is
//! reported on the current menu as "Operation cancelled"; every other error
//! propagates out of [`Menu::run`].

use super::config::Config;
use super::console::{Console, InputError, MENU_PROMPT};
use super::messages::Message;
use crate::db::db::Db;
use anyhow::Result;
use tracing::debug;

/// What the menu loop does after an item has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Pop(usize),
    Terminate,
}

impl Flow {
    /// Flow seen by the enclosing menu once the current menu has closed.
    fn unwind(self) -> Option<Flow> {
        match self {
            Flow::Continue | Flow::Pop(0) => None,
            Flow::Pop(1) => Some(Flow::Continue),
            Flow::Pop(levels) => Some(Flow::Pop(levels - 1)),
            Flow::Terminate => Some(Flow::Terminate),
        }
    }
}

/// Shared state handed to every item.
pub struct MenuContext<'a> {
    pub db: &'a Db,
    pub config: &'a Config,
    pub console: &'a mut dyn Console,
}

/// One-shot message shown above a menu the next time it is drawn.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Status {
    message: Option<String>,
}

impl Status {
    pub fn set_message(&mut self, message: impl ToString) {
        self.message = Some(message.to_string());
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

pub trait MenuItem {
    /// Key the user types to select the item.
    fn key(&self) -> &str;

    fn label(&self) -> String;

    /// Runs the item. `parent` is the status of the menu the item belongs to.
    fn call(&mut self, parent: &mut Status, ctx: &mut MenuContext<'_>) -> Result<Flow>;
}

pub struct Menu {
    header: String,
    items: Vec<Box<dyn MenuItem>>,
    status: Status,
}

impl Menu {
    pub fn new(header: impl Into<String>, items: Vec<Box<dyn MenuItem>>) -> Self {
        Self {
            header: header.into(),
            items,
            status: Status::default(),
        }
    }

    pub fn set_message(&mut self, message: impl ToString) {
        self.status.set_message(message);
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.status.take_message()
    }

    /// Item selected by `key`, if any.
    pub fn get(&mut self, key: &str) -> Option<&mut (dyn MenuItem + 'static)> {
        self.items.iter_mut().find(|item| item.key() == key).map(|item| item.as_mut())
    }

    /// `[key] label` for every item.
    pub fn lines(&self) -> Vec<String> {
        self.items.iter().map(|item| format!("[{}] {}", item.key(), item.label())).collect()
    }

    fn show(&mut self, console: &mut dyn Console) {
        console.clear();
        if let Some(message) = self.status.take_message() {
            console.print(&message);
            console.print("");
        }
        console.print(&self.header);
        for line in self.lines() {
            console.print(&line);
        }
    }

    /// Draws the menu once, reads a key and runs the selected item.
    pub fn read(&mut self, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        self.show(ctx.console);
        let choice = ctx.console.read_line(MENU_PROMPT)?;
        let choice = choice.trim();

        // The status is detached while the item runs; `get` borrows the whole menu.
        let mut status = std::mem::take(&mut self.status);
        let result = match self.get(choice) {
            Some(item) => {
                debug!(key = choice, label = %item.label(), "menu item selected");
                item.call(&mut status, ctx)
            }
            None => Ok(Flow::Continue),
        };
        self.status = status;

        match result {
            Ok(flow) => Ok(flow),
            Err(err) if is_interrupted(&err) => {
                self.status.set_message(Message::OperationCancelled);
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    /// Runs until an item closes this menu. Returns the flow the enclosing
    /// menu has to apply: `Continue` for a plain return, `Pop(n)` when more
    /// levels remain to be closed, or `Terminate`.
    pub fn run(&mut self, ctx: &mut MenuContext<'_>) -> Result<Flow> {
        loop {
            if let Some(flow) = self.read(ctx)?.unwind() {
                return Ok(flow);
            }
        }
    }
}

/// Runs `menu` as a child of the menu owning `parent` and returns the flow
/// the parent has to apply. A status message left on the child is moved to
/// the parent so it is shown where control lands.
pub fn run_nested(parent: &mut Status, mut menu: Menu, ctx: &mut MenuContext<'_>) -> Result<Flow> {
    let flow = menu.run(ctx)?;
    if let Some(message) = menu.take_message() {
        parent.set_message(message);
    }
    Ok(flow)
}

/// Whether `err` was caused by the user aborting input.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| matches!(cause.downcast_ref::<InputError>(), Some(InputError::Interrupted)))
}

/// Closes the current menu.
pub struct ReturnItem {
    key: String,
}

impl ReturnItem {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl MenuItem for ReturnItem {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        Message::MenuReturn.to_string()
    }

    fn call(&mut self, _parent: &mut Status, _ctx: &mut MenuContext<'_>) -> Result<Flow> {
        Ok(Flow::Pop(1))
    }
}
