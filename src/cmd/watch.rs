use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Local;
use clap::Args;
use log::error;
use tokio::select;

use crate::client::config::ClientConfig;
use crate::client::Client;
use crate::config::ConfigArgs;
use crate::session::guard::require_session;
use crate::session::monitor::SessionMonitor;
use crate::session::Session;
use crate::time::format_until;
use crate::types::offering::ServiceOffering;
use crate::types::profession::Profession;
use crate::utils::BuildInfo;

use super::RunCommand;

/// Keep the session under observation, refreshing a resource summary
/// until the session expires or Ctrl-C.
#[derive(Args)]
pub struct WatchArgs {
    /// Override the session check interval from the configuration, in
    /// seconds.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Refresh the resource summary on this interval, in seconds.
    #[arg(long, default_value = "60")]
    pub refresh: u64,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for WatchArgs {
    async fn run(&self) -> Result<()> {
        BuildInfo::new().log();

        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;

        let user = require_session(&mut session, &mut client)?;
        if let Some(user) = user {
            println!("Watching session for {}", user.display_name());
        }
        if let Some(expiry) = session.token_expiry()? {
            println!("Token expires {}", format_until(expiry));
        }

        let check_secs = self.interval.unwrap_or(cfg.session_check_secs);
        if check_secs == 0 || self.refresh == 0 {
            bail!("check and refresh intervals cannot be zero");
        }

        let mut handle = SessionMonitor::start(session, Duration::from_secs(check_secs));
        let mut refresh_intv = tokio::time::interval(Duration::from_secs(self.refresh));

        loop {
            select! {
                Some(_) = handle.expired.recv() => {
                    bail!("session expired, run `taskfixer login` to sign in again");
                }

                _ = refresh_intv.tick() => {
                    if let Err(e) = show_summary(&client).await {
                        error!("Refresh summary error: {e:#}");
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    handle.shutdown();
                    println!();
                    println!("Bye!");
                    return Ok(());
                }
            }
        }
    }
}

async fn show_summary(client: &Client) -> Result<()> {
    let query = [("include_inactive", String::from("true"))];
    let professions: Vec<Profession> = client.list_resources(&query).await?;
    let offerings: Vec<ServiceOffering> = client.list_resources(&query).await?;

    let now = Local::now().format("%H:%M:%S");
    println!(
        "[{now}] professions: {}/{} active, offerings: {}/{} active",
        professions.iter().filter(|p| p.active).count(),
        professions.len(),
        offerings.iter().filter(|o| o.active).count(),
        offerings.len(),
    );
    Ok(())
}
