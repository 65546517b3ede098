use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::{QueryArgs, RunCommand};
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::profession::Profession;

/// List professions
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[async_trait]
impl RunCommand for ListArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;
        require_session(&mut session, &mut client)?;

        // The backend expects this filter on every professions query
        let query = [("include_inactive", self.query.include_inactive.to_string())];
        let professions: Vec<Profession> = client.list_resources(&query).await?;

        self.query.display_list(professions)
    }
}
