use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::cmd::RunCommand;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::types::offering::{OfferingPayload, ServiceOffering};

/// Create a new service offering
#[derive(Args)]
pub struct CreateArgs {
    /// The offering description
    pub description: String,

    /// Estimated price of the offering.
    #[arg(long)]
    pub price: f64,

    /// Estimated duration of the offering.
    #[arg(long)]
    pub duration: f64,

    /// Id of the profession providing this offering.
    #[arg(long)]
    pub profession: String,

    /// Create the offering in disabled state.
    #[arg(long)]
    pub inactive: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for CreateArgs {
    async fn run(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            bail!("offering description cannot be empty");
        }
        if self.price < 0.0 {
            bail!("price cannot be negative");
        }
        if self.duration < 0.0 {
            bail!("duration cannot be negative");
        }
        if self.profession.is_empty() {
            bail!("profession id cannot be empty");
        }

        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;
        require_session(&mut session, &mut client)?;

        let payload = OfferingPayload {
            description: self.description.trim().to_string(),
            estimated_price: self.price,
            estimated_duration: self.duration,
            active: !self.inactive,
            id_profession: self.profession.clone(),
        };
        let offering = client.create_resource::<ServiceOffering>(&payload).await?;

        println!("Created offering {:?}", offering.description);
        Ok(())
    }
}
