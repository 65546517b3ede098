use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::RunCommand;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::profession::{Profession, ProfessionPayload};

/// Create a new profession
#[derive(Args)]
pub struct CreateArgs {
    /// The profession name
    pub name: String,

    /// Create the profession in disabled state.
    #[arg(long)]
    pub inactive: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for CreateArgs {
    async fn run(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("profession name cannot be empty");
        }

        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;
        require_session(&mut session, &mut client)?;

        let payload = ProfessionPayload {
            name: self.name.trim().to_string(),
            active: !self.inactive,
        };
        let profession = client.create_resource::<Profession>(&payload).await?;

        println!("Created profession {:?}", profession.name);
        Ok(())
    }
}
