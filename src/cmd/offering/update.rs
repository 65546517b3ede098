use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::RunCommand;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::offering::{OfferingPayload, ServiceOffering};

/// Update an existing service offering. Fields not provided keep their
/// current values.
#[derive(Args)]
pub struct UpdateArgs {
    /// The offering id
    pub id: String,

    /// The new offering description.
    #[arg(long)]
    pub description: Option<String>,

    /// The new estimated price.
    #[arg(long)]
    pub price: Option<f64>,

    /// The new estimated duration.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Id of the profession providing this offering.
    #[arg(long)]
    pub profession: Option<String>,

    /// Enable the offering.
    #[arg(long, conflicts_with = "inactive")]
    pub active: bool,

    /// Disable the offering.
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
        let offerings: Vec<ServiceOffering> = client.list_resources(&query).await?;
        let current = match offerings.into_iter().find(|o| o.id == self.id) {
            Some(offering) => offering,
            None => bail!("offering {:?} not found", self.id),
        };

        let description = match self.description {
            Some(ref description) => description.clone(),
            None => current.description,
        };
        if description.trim().is_empty() {
            bail!("offering description cannot be empty");
        }

        let price = self.price.unwrap_or(current.estimated_price);
        if price < 0.0 {
            bail!("price cannot be negative");
        }

        let duration = self.duration.unwrap_or(current.estimated_duration);
        if duration < 0.0 {
            bail!("duration cannot be negative");
        }

        let id_profession = match self.profession {
            Some(ref id) => id.clone(),
            None => current.profession_id,
        };
        if id_profession.is_empty() {
            bail!("offering has no profession, pass --profession");
        }

        let active = if self.active {
            true
        } else if self.inactive {
            false
        } else {
            current.active
        };

        let payload = OfferingPayload {
            description: description.trim().to_string(),
            estimated_price: price,
            estimated_duration: duration,
            active,
            id_profession,
        };
        let updated = client
            .update_resource::<ServiceOffering>(&self.id, &payload)
            .await?;

        println!("Updated offering {:?}", updated.description);
        Ok(())
    }
}
