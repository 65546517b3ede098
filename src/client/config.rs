use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::config::{expandenv, CommonConfig, PathSet};
use crate::session::store::TokenStore;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_server")]
    pub server: String,

    #[serde(default = "ClientConfig::default_token_path")]
    pub token_path: String,

    #[serde(default = "ClientConfig::default_profile_path")]
    pub profile_path: String,

    #[serde(default = "ClientConfig::default_session_check_secs")]
    pub session_check_secs: u64,

    #[serde(default = "ClientConfig::default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            server: Self::default_server(),
            token_path: Self::default_token_path(),
            profile_path: Self::default_profile_path(),
            session_check_secs: Self::default_session_check_secs(),
            read_timeout_secs: Self::default_read_timeout_secs(),
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        // We won't check server url is valid, the Client::connect will check it.
        self.server = expandenv("server", &self.server)?;
        if self.server.is_empty() {
            bail!("server cannot be empty");
        }

        self.token_path = expandenv("token_path", &self.token_path)?;
        if self.token_path.is_empty() {
            let path = ps.data_path.join("token");
            self.token_path = format!("{}", path.display());
        }

        self.profile_path = expandenv("profile_path", &self.profile_path)?;
        if self.profile_path.is_empty() {
            let path = ps.data_path.join("profile.json");
            self.profile_path = format!("{}", path.display());
        }

        if self.session_check_secs < 5 || self.session_check_secs > 3600 {
            bail!(
                "session_check_secs should be in range [5,3600], found {}",
                self.session_check_secs
            );
        }

        if self.read_timeout_secs < 1 || self.read_timeout_secs > 300 {
            bail!(
                "read_timeout_secs should be in range [1,300], found {}",
                self.read_timeout_secs
            );
        }

        Ok(())
    }
}

impl ClientConfig {
    pub fn connect(&self) -> Result<Client> {
        Client::connect(&self.server, self.read_timeout_secs)
    }

    pub fn build_store(&self) -> TokenStore {
        TokenStore::new(self.token_path.clone(), self.profile_path.clone())
    }

    pub fn default_server() -> String {
        String::from("http://127.0.0.1:8080")
    }

    pub fn default_token_path() -> String {
        String::new()
    }

    pub fn default_profile_path() -> String {
        String::new()
    }

    pub fn default_session_check_secs() -> u64 {
        60
    }

    pub fn default_read_timeout_secs() -> u64 {
        30
    }
}
