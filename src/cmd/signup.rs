use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;

use crate::client::config::ClientConfig;
use crate::config::ConfigArgs;
use crate::session::guard::require_anonymous;
use crate::session::Session;
use crate::types::user::RegisterRequest;
use crate::utils;

use super::RunCommand;

/// Create a new account. The account still needs to log in afterwards.
#[derive(Args)]
pub struct SignupArgs {
    /// The account email, prompted when omitted.
    pub email: Option<String>,

    /// First name, prompted when omitted.
    #[arg(long)]
    pub firstname: Option<String>,

    /// Last name, prompted when omitted.
    #[arg(long)]
    pub lastname: Option<String>,

    /// The account password, prompted when omitted.
    #[arg(short, long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[async_trait]
impl RunCommand for SignupArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        require_anonymous(&mut session)?;

        let email = match self.email {
            Some(ref email) => email.clone(),
            None => utils::input("email")?,
        };
        utils::validate_email(&email)?;

        let firstname = match self.firstname {
            Some(ref name) => name.clone(),
            None => utils::input("first name")?,
        };
        if firstname.is_empty() {
            bail!("first name cannot be empty");
        }

        let lastname = match self.lastname {
            Some(ref name) => name.clone(),
            None => utils::input("last name")?,
        };
        if lastname.is_empty() {
            bail!("last name cannot be empty");
        }

        let password = match self.password {
            Some(ref password) => password.clone(),
            None => {
                let password = utils::input_password("password")?;
                let repeat = utils::input_password("repeat password")?;
                if password != repeat {
                    bail!("passwords do not match");
                }
                password
            }
        };
        utils::validate_password(&password)?;

        let client = cfg.connect()?;
        let req = RegisterRequest {
            firstname,
            lastname,
            email,
            password,
        };
        let profile = session.register(&client, &req).await?;

        println!(
            "Account created for {}, run `taskfixer login` to sign in",
            profile.display_name()
        );
        Ok(())
    }
}
