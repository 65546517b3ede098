use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::RunCommand;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::profession::{Profession, ProfessionPayload};

/// Update an existing profession. Fields not provided keep their current
/// values.
#[derive(Args)]
pub struct UpdateArgs {
    /// The profession id
    pub id: String,

    /// The new profession name.
    #[arg(long)]
    pub name: Option<String>,

    /// Enable the profession.
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Disable the profession.
    #[arg(long)]
    pub inactive: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for UpdateArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;
        require_session(&mut session, &mut client)?;

        let query = [("include_inactive", String::from("true"))];
        let professions: Vec<Profession> = client.list_resources(&query).await?;
        let current = match professions.into_iter().find(|p| p.id == self.id) {
            Some(profession) => profession,
            None => bail!("profession {:?} not found", self.id),
        };

        let name = match self.name {
            Some(ref name) => name.clone(),
            None => current.name,
        };
        if name.trim().is_empty() {
            bail!("profession name cannot be empty");
        }

        let active = if self.active {
            true
        } else if self.inactive {
            false
        } else {
            current.active
        };

        let payload = ProfessionPayload {
            name: name.trim().to_string(),
            active,
        };
        let updated = client
            .update_resource::<Profession>(&self.id, &payload)
            .await?;

        println!("Updated profession {:?}", updated.name);
        Ok(())
    }
}
