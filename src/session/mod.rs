pub mod claims;
pub mod guard;
pub mod monitor;
pub mod store;

use anyhow::{bail, Context, Result};
use log::warn;
use thiserror::Error;

use crate::client::Client;
use crate::session::store::TokenStore;
use crate::time::current_timestamp;
use crate::types::user::{RegisterRequest, UserProfile};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("server did not return a token")]
    MissingToken,
}

/// In-memory auth state, mirroring the persisted store. `authenticated`
/// is true only while the stored token was live at the last validation.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub authenticated: bool,
    pub loading: bool,
}

/// The session manager. Owns the persisted token/profile pair and the
/// in-memory state, every auth transition goes through here.
pub struct Session {
    store: TokenStore,
    state: SessionState,
}

impl Session {
    /// Restore the session from the persisted files: a live token brings
    /// back the stored profile, anything else clears the leftovers.
    pub fn load(store: TokenStore) -> Result<Self> {
        let mut session = Self {
            store,
            state: SessionState {
                loading: true,
                ..Default::default()
            },
        };
        session.validate()?;
        session.state.loading = false;
        Ok(session)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    /// Log in and persist the session. The profile comes from the login
    /// response when the server includes one, else from the token claims.
    /// Any failure clears whatever was stored, a half-written session
    /// never survives.
    pub async fn login(
        &mut self,
        client: &mut Client,
        email: &str,
        password: &str,
    ) -> Result<UserProfile> {
        self.state.loading = true;
        let result = self.do_login(client, email, password).await;
        self.state.loading = false;

        match result {
            Ok(profile) => Ok(profile),
            Err(err) => {
                if let Err(e) = self.logout() {
                    warn!("Clear session after failed login: {e:#}");
                }
                Err(err)
            }
        }
    }

    async fn do_login(
        &mut self,
        client: &mut Client,
        email: &str,
        password: &str,
    ) -> Result<UserProfile> {
        let resp = client.login(email, password).await.context("login request")?;

        let token = match resp.session_token() {
            Some(token) => token.to_string(),
            None => return Err(AuthError::MissingToken.into()),
        };

        let profile: UserProfile = match resp.user {
            Some(profile) => profile,
            None => {
                let payload = claims::decode_payload(&token)
                    .context("derive profile from token claims")?;
                serde_json::from_value(payload).context("parse profile claims")?
            }
        };

        self.store.save(&token, &profile).context("persist session")?;
        client.set_token(token);

        self.state.user = Some(profile.clone());
        self.state.authenticated = true;
        Ok(profile)
    }

    /// Create an account. Leaves the session state alone, the new user
    /// still has to log in.
    pub async fn register(
        &mut self,
        client: &Client,
        req: &RegisterRequest,
    ) -> Result<UserProfile> {
        self.state.loading = true;
        let result = client.register(req).await;
        self.state.loading = false;

        let profile = result.context("register request")?;
        Ok(profile)
    }

    /// Drop the persisted pair and reset the state. Safe to call when
    /// nothing is stored.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear().context("clear session store")?;
        self.state.user = None;
        self.state.authenticated = false;
        Ok(())
    }

    /// Single source of truth for liveness: the stored token must expire
    /// strictly in the future. A dead or missing token logs the session
    /// out as a side effect.
    pub fn validate(&mut self) -> Result<bool> {
        let token = match self.store.read_token()? {
            Some(token) => token,
            None => {
                self.logout()?;
                return Ok(false);
            }
        };
        if !claims::is_live(&token, current_timestamp()) {
            self.logout()?;
            return Ok(false);
        }

        if self.state.user.is_none() {
            self.state.user = self.store.read_profile()?;
        }
        if self.state.user.is_none() {
            // The profile file is gone, the claims still identify the user
            if let Ok(payload) = claims::decode_payload(&token) {
                self.state.user = serde_json::from_value(payload).ok();
            }
        }
        self.state.authenticated = true;
        Ok(true)
    }

    /// Install the persisted bearer token on a client.
    pub fn authorize(&self, client: &mut Client) -> Result<()> {
        match self.store.read_token()? {
            Some(token) => {
                client.set_token(token);
                Ok(())
            }
            None => bail!("no session token available"),
        }
    }

    /// Expiry of the stored token in epoch seconds, when one is stored
    /// and decodes.
    pub fn token_expiry(&self) -> Result<Option<u64>> {
        let token = match self.store.read_token()? {
            Some(token) => token,
            None => return Ok(None),
        };
        let payload = match claims::decode_payload(&token) {
            Ok(payload) => payload,
            Err(_) => return Ok(None),
        };
        Ok(claims::expiry_seconds(&payload))
    }
}
