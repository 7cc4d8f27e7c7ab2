//! Configuration and database bootstrap command.
//!
//! Writes `config.json` into the data directory unless one is already there
//! (or `--force` is given) and creates the `events` and `registrations`
//! tables when they are missing.

use crate::{
    db::db::Db,
    libs::{
        config::{Config, CONFIG_FILE_NAME},
        data_storage::DataStorage,
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file with the current settings
    #[arg(short, long)]
    force: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    let config = Config::read()?;

    if Config::exists()? && !init_args.force {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        msg_info!(Message::ConfigAlreadyExists(path.display().to_string()));
    } else {
        let path = config.save()?;
        msg_success!(Message::ConfigSaved(path.display().to_string()));
    }

    bootstrap(&config)?;
    msg_success!(Message::SchemaReady(config.db_path.display().to_string()));
    Ok(())
}

/// Creates the database tables and the report directory for `config`.
pub fn bootstrap(config: &Config) -> Result<Db> {
    let db = Db::new(config);
    db.ensure_schema()?;
    std::fs::create_dir_all(&config.report_dir)?;
    Ok(db)
}
