use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::config::ConfigArgs;
use crate::session::guard::require_anonymous;
use crate::session::Session;
use crate::utils;

use super::RunCommand;

/// Log in and persist the session token.
#[derive(Args)]
pub struct LoginArgs {
    /// The account email, prompted when omitted.
    pub email: Option<String>,

    /// The account password, prompted when omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for LoginArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        require_anonymous(&mut session)?;

        let email = match self.email {
            Some(ref email) => email.clone(),
            None => utils::input("email")?,
        };
        utils::validate_email(&email)?;

        let password = match self.password {
            Some(ref password) => password.clone(),
            None => utils::input_password("password")?,
        };
        if password.is_empty() {
            bail!("password cannot be empty");
        }

        let mut client = cfg.connect()?;
        let profile = session.login(&mut client, &email, &password).await?;

        println!("Logged in as {}", profile.display_name());
        Ok(())
    }
}
