mod config;
mod dashboard;
mod login;
mod logout;
mod offering;
mod profession;
mod signup;
mod watch;
mod whoami;

use std::process;

use anyhow::Result;
use async_trait::async_trait;
use clap::error::ErrorKind as ArgsErrorKind;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::display::{self, DisplayStyle, TerminalDisplay};
use crate::logs;

#[async_trait]
pub trait RunCommand {
    async fn run(&self) -> Result<()>;
}

/// Query and display flags shared by the list subcommands.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Include resources that have been disabled.
    #[arg(long)]
    pub include_inactive: bool,

    /// When displaying in CSV format, do not show the header row.
    #[arg(long)]
    pub headless: bool,

    /// When displaying in CSV format, manually specify the columns to display.
    #[arg(long)]
    pub csv_titles: Option<String>,

    /// The display style.
    #[arg(short, long, default_value = "table")]
    pub output: DisplayStyle,
}

impl QueryArgs {
    pub fn display_list<T>(&self, list: Vec<T>) -> Result<()>
    where
        T: Serialize + DeserializeOwned + TerminalDisplay,
    {
        display::display_list(list, self.output, self.headless, self.csv_titles.clone())
    }
}

#[derive(Parser)]
#[command(author, about, version = env!("TASKFIXER_VERSION"))]
pub struct App {
    /// Log level, one of "error", "warn", "info", "debug".
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Config(config::ShowConfigArgs),
    Dashboard(dashboard::DashboardArgs),
    Login(login::LoginArgs),
    Logout(logout::LogoutArgs),
    Offering(offering::OfferingCommand),
    Profession(profession::ProfessionCommand),
    Signup(signup::SignupArgs),
    Watch(watch::WatchArgs),
    Whoami(whoami::WhoamiArgs),
}

#[async_trait]
impl RunCommand for App {
    async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Config(args) => args.run().await,
            Commands::Dashboard(args) => args.run().await,
            Commands::Login(args) => args.run().await,
            Commands::Logout(args) => args.run().await,
            Commands::Offering(args) => args.run().await,
            Commands::Profession(args) => args.run().await,
            Commands::Signup(args) => args.run().await,
            Commands::Watch(args) => args.run().await,
            Commands::Whoami(args) => args.run().await,
        }
    }
}

pub async fn run_cmd() -> Result<()> {
    let app = match App::try_parse() {
        Ok(app) => app,
        Err(err) => {
            err.use_stderr();
            err.print().expect("write help message to stderr");
            if matches!(
                err.kind(),
                ArgsErrorKind::DisplayHelp
                    | ArgsErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    | ArgsErrorKind::DisplayVersion
            ) {
                return Ok(());
            }
            process::exit(3);
        }
    };

    logs::init(&app.log_level)?;
    app.run().await
}
