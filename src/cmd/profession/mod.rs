mod create;
mod delete;
mod list;
mod update;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use super::RunCommand;

/// Manage professions
#[derive(Args)]
pub struct ProfessionCommand {
    #[command(subcommand)]
    pub command: ProfessionCommands,
}

#[derive(Subcommand)]
pub enum ProfessionCommands {
    Create(create::CreateArgs),
    Delete(delete::DeleteArgs),
    List(list::ListArgs),
    Update(update::UpdateArgs),
}

#[async_trait]
impl RunCommand for ProfessionCommand {
    async fn run(&self) -> Result<()> {
        match &self.command {
            ProfessionCommands::Create(args) => args.run().await,
            ProfessionCommands::Delete(args) => args.run().await,
            ProfessionCommands::List(args) => args.run().await,
            ProfessionCommands::Update(args) => args.run().await,
        }
    }
}
