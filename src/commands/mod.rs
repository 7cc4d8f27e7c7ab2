pub mod init;
pub mod manage;
pub mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Write the configuration file and create the database tables")]
    Init(init::InitArgs),
    #[command(about = "Open the console admin menu")]
    Manage,
    #[command(about = "Write the registration report and list events")]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Manage => manage::cmd(),
            Commands::Report(args) => report::cmd(args),
        }
    }
}
