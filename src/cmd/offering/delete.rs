use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::RunCommand;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::offering::ServiceOffering;
use crate::utils;

/// Delete a service offering.
#[derive(Args)]
pub struct DeleteArgs {
    /// The offering id
    pub id: String,

    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for DeleteArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;
        require_session(&mut session, &mut client)?;

        if !self.yes {
            let message = format!("Do you want to delete offering {:?}", self.id);
            if !utils::confirm(&message)? {
                return Ok(());
            }
        }

        let outcome = client.remove_resource::<ServiceOffering>(&self.id).await?;
        if let Some(message) = outcome.message {
            println!("{message}");
        } else if outcome.soft_disabled {
            println!("Offering is still referenced, it was disabled instead");
        } else {
            println!("Offering deleted");
        }

        Ok(())
    }
}
