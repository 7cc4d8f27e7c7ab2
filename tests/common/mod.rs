#![allow(dead_code)]

use amelia::db::db::Db;
use amelia::libs::config::Config;
use amelia::libs::console::{Console, InputError};
use amelia::libs::menu::MenuContext;
use std::collections::VecDeque;
use tempfile::TempDir;
use test_context::TestContext;

/// Fresh database and configuration inside a temporary directory.
pub struct StoreContext {
    pub temp_dir: TempDir,
    pub config: Config,
    pub db: Db,
}

impl TestContext for StoreContext {
    fn setup() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::in_dir(temp_dir.path());
        let db = Db::new(&config);
        db.ensure_schema().unwrap();
        StoreContext { temp_dir, config, db }
    }
}

/// Answer that makes the scripted console report an interrupt.
pub const CTRL_C: &str = "^C";

/// Console that answers prompts from a queue and records what was shown.
/// [`CTRL_C`] and reading past the last answer both behave like the user
/// pressing Ctrl-C.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn printed(&self, text: &str) -> bool {
        self.output.iter().any(|line| line.contains(text))
    }

    pub fn count(&self, text: &str) -> usize {
        self.output.iter().filter(|line| line.contains(text)).count()
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn print(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(answer) if answer != CTRL_C => Ok(answer),
            _ => Err(InputError::Interrupted),
        }
    }
}

pub fn menu_context<'a>(ctx: &'a StoreContext, console: &'a mut ScriptedConsole) -> MenuContext<'a> {
    MenuContext {
        db: &ctx.db,
        config: &ctx.config,
        console,
    }
}

pub const SPRING_FAIR: [(&str, &str); 6] = [
    ("name", "Spring Fair"),
    ("start_date", "2024-05-01"),
    ("end_date", "2024-05-02"),
    ("location", "Main Hall"),
    ("slots", "50"),
    ("description", "Stalls, music and food"),
];
