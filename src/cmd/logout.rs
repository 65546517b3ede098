use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::config::ConfigArgs;
use crate::session::Session;

use super::RunCommand;

/// Drop the persisted session. Safe to run when not logged in.
#[derive(Args)]
pub struct LogoutArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LogoutArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;

        session.logout()?;
        println!("Logged out");
        Ok(())
    }
}
