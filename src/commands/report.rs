use super::init::bootstrap;
use crate::{
    libs::{config::Config, export::Exporter, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// CSV file to write instead of a timestamped file in the report directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(report_args: ReportArgs) -> Result<()> {
    let config = Config::read()?;
    let db = bootstrap(&config)?;

    let path = Exporter::new(&config, report_args.output).export(&db)?;
    msg_success!(Message::ReportCreated(path.display().to_string()));

    match View::events(&db)? {
        Some(table) => {
            msg_print!(Message::EventsHeader, true);
            table.printstd();
        }
        None => msg_info!(Message::NoEventsFound),
    }

    Ok(())
}
