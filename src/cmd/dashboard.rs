use anyhow::Result;
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::client::Client;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::offering::ServiceOffering;
use crate::types::profession::Profession;

use super::RunCommand;

/// Display a summary of professions and service offerings.
#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for DashboardArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;

        let user = require_session(&mut session, &mut client)?;
        if let Some(user) = user {
            println!("Signed in as {}", user.display_name());
        }

        let professions: Vec<Profession> = client
            .list_resources(&[("include_inactive", String::from("true"))])
            .await?;
        let offerings: Vec<ServiceOffering> = client
            .list_resources(&[("include_inactive", String::from("true"))])
            .await?;

        let active_professions = professions.iter().filter(|p| p.active).count();
        let active_offerings = offerings.iter().filter(|o| o.active).count();

        println!(
            "Professions: {} active, {} total",
            active_professions,
            professions.len()
        );
        println!(
            "Offerings:   {} active, {} total",
            active_offerings,
            offerings.len()
        );

        Ok(())
    }
}
