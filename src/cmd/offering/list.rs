use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::{QueryArgs, RunCommand};
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::offering::ServiceOffering;

/// List service offerings
#[derive(Args)]
pub struct ListArgs {
    /// Only show offerings of this profession id.
    #[arg(long)]
    pub profession: Option<String>,

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

        // Unlike professions, the filters are only sent when requested
        let mut query = Vec::new();
        if self.query.include_inactive {
            query.push(("include_inactive", String::from("true")));
        }
        if let Some(ref id) = self.profession {
            query.push(("id_profession", id.clone()));
        }
        let offerings: Vec<ServiceOffering> = client.list_resources(&query).await?;

        self.query.display_list(offerings)
    }
}
