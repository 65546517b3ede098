mod create;
mod delete;
mod list;
mod update;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Args, Subcommand};

use super::RunCommand;

/// Manage service offerings
#[derive(Args)]
pub struct OfferingCommand {
    #[command(subcommand)]
    pub command: OfferingCommands,
}

#[derive(Subcommand)]
pub enum OfferingCommands {
    Create(create::CreateArgs),
    Delete(delete::DeleteArgs),
    List(list::ListArgs),
    Update(update::UpdateArgs),
}

#[async_trait]
impl RunCommand for OfferingCommand {
    async fn run(&self) -> Result<()> {
        match &self.command {
            OfferingCommands::Create(args) => args.run().await,
            OfferingCommands::Delete(args) => args.run().await,
            OfferingCommands::List(args) => args.run().await,
            OfferingCommands::Update(args) => args.run().await,
        }
    }
}
