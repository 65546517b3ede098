use anyhow::{bail, Result};

use crate::client::Client;
use crate::session::Session;
use crate::types::user::UserProfile;

/// Gate for commands that need a logged-in user. Revalidates the stored
/// token, installs it on the client, and hands back the profile.
pub fn require_session(session: &mut Session, client: &mut Client) -> Result<Option<UserProfile>> {
    if !session.validate()? {
        bail!("you are not logged in, run `taskfixer login` first");
    }
    session.authorize(client)?;
    Ok(session.user().cloned())
}

/// Gate for login and signup, which only make sense without a live
/// session.
pub fn require_anonymous(session: &mut Session) -> Result<()> {
    if session.validate()? {
        let who = match session.user() {
            Some(user) => user.display_name(),
            None => String::from("an unknown user"),
        };
        bail!("already logged in as {who}, run `taskfixer logout` first");
    }
    Ok(())
}
