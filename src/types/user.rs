use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::display::TerminalDisplay;
use crate::types::raw::RawId;

/// Canonical account profile. Built from the login response `user` object
/// when the server includes one, otherwise from the token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUserProfile")]
pub struct UserProfile {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.firstname, self.lastname);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Profile fields as different backend revisions and token issuers name
/// them. Precedence is fixed in the From impl, not by field order in the
/// payload.
#[derive(Debug, Deserialize)]
struct RawUserProfile {
    #[serde(default)]
    id: Option<RawId>,

    #[serde(default, rename = "_id")]
    mongo_id: Option<RawId>,

    #[serde(default)]
    sub: Option<RawId>,

    #[serde(default)]
    user_id: Option<RawId>,

    #[serde(default)]
    firstname: Option<String>,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    given_name: Option<String>,

    #[serde(default)]
    lastname: Option<String>,

    #[serde(default)]
    family_name: Option<String>,

    #[serde(default)]
    email: Option<String>,
}

impl From<RawUserProfile> for UserProfile {
    fn from(raw: RawUserProfile) -> Self {
        Self {
            id: raw
                .id
                .or(raw.mongo_id)
                .or(raw.sub)
                .or(raw.user_id)
                .map(RawId::into_string)
                .unwrap_or_default(),
            firstname: raw
                .firstname
                .or(raw.name)
                .or(raw.given_name)
                .unwrap_or_default(),
            lastname: raw.lastname.or(raw.family_name).unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register payload. The backend names the first name field `name`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "name")]
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default, rename = "idToken")]
    pub id_token: Option<String>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl LoginResponse {
    /// Token field precedence: `idToken` then `token`, empty strings count
    /// as missing.
    pub fn session_token(&self) -> Option<&str> {
        for token in [self.id_token.as_deref(), self.token.as_deref()] {
            match token {
                Some(token) if !token.is_empty() => return Some(token),
                _ => {}
            }
        }
        None
    }
}

impl TerminalDisplay for UserProfile {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Name", "Email"]
    }

    fn table_row(self) -> Vec<String> {
        let name = self.display_name();
        vec![self.id, name, self.email]
    }

    fn csv_titles() -> Vec<&'static str> {
        vec!["id", "firstname", "lastname", "email"]
    }

    fn csv_row(self) -> HashMap<&'static str, String> {
        vec![
            ("id", self.id),
            ("firstname", self.firstname),
            ("lastname", self.lastname),
            ("email", self.email),
        ]
        .into_iter()
        .collect()
    }
}
