use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::Args;
use serde::Serialize;

use crate::client::config::ClientConfig;
use crate::config::ConfigArgs;
use crate::display::display_json;
use crate::session::guard::require_session;
use crate::session::Session;
use crate::time::format_until;
use crate::types::user::UserProfile;

use super::RunCommand;

/// Display the logged-in user and the session expiry.
#[derive(Args)]
pub struct WhoamiArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Serialize)]
struct WhoamiReport {
    #[serde(flatten)]
    user: UserProfile,

    session_expires: String,
}

#[async_trait]
impl RunCommand for WhoamiArgs {
    async fn run(&self) -> Result<()> {
        let cfg: ClientConfig = self.config.load("client")?;
        let mut session = Session::load(cfg.build_store())?;
        let mut client = cfg.connect()?;

        let user = match require_session(&mut session, &mut client)? {
            Some(user) => user,
            None => bail!("no profile available for the current session"),
        };

        let session_expires = match session.token_expiry()? {
            Some(expiry) => format_until(expiry),
            None => String::from("unknown"),
        };

        display_json(WhoamiReport {
            user,
            session_expires,
        })
    }
}
