//! Console input/output boundary.
//!
//! The record prompts and the menu engine talk to the user only through the
//! [`Console`] trait. [`Terminal`] is the interactive implementation built on
//! `dialoguer`; tests drive the same code with a scripted console.

use super::fields::{Field, FieldError};
use super::messages::Message;
use dialoguer::Input;
use std::io::{self, Write};
use thiserror::Error;
use tracing::warn;

/// Prompt shown when the menu waits for a selection.
pub const MENU_PROMPT: &str = "->";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Error)]
pub enum InputError {
    /// The user aborted the current operation (Ctrl-C or end of input).
    #[error("Input interrupted")]
    Interrupted,

    #[error("Console I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => InputError::Interrupted,
            _ => InputError::Io(err),
        }
    }
}

impl From<dialoguer::Error> for InputError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(err) => err.into(),
        }
    }
}

pub trait Console {
    /// Clears the screen before a menu is drawn.
    fn clear(&mut self);

    fn print(&mut self, line: &str);

    /// Reads one line of input after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError>;

    /// Reads the raw value for `field`, prompting with its label.
    fn read_field(&mut self, field: &Field) -> Result<String, InputError> {
        if let Some(help) = field.descriptor().help {
            self.print(help);
        }
        self.read_line(field.verbose_name())
    }

    /// Tells the user why the value just entered was rejected.
    fn reject(&mut self, error: &FieldError) {
        self.print(&Message::InvalidValue(error.to_string()).to_string());
    }
}

/// Interactive console on stdin/stdout.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }
}

impl Console for Terminal {
    fn clear(&mut self) {
        print!("{}", CLEAR_SCREEN);
        if let Err(err) = io::stdout().flush() {
            warn!(error = %err, "failed to flush stdout");
        }
    }

    fn print(&mut self, line: &str) {
        println!("{}", line);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        let value = Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()?;
        Ok(value)
    }
}
