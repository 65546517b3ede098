use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::display::TerminalDisplay;
use crate::types::raw::{RawBool, RawId};

pub const PROFESSION_PATH: &str = "profession";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProfession")]
pub struct Profession {
    pub id: String,
    pub name: String,
    pub active: bool,
}

impl Profession {
    /// Embedded fallback used when an offering only carries a profession
    /// name. No id, treated as active.
    pub fn named(name: String) -> Self {
        Self {
            id: String::new(),
            name,
            active: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProfession {
    #[serde(default)]
    id: Option<RawId>,

    #[serde(default, rename = "_id")]
    mongo_id: Option<RawId>,

    #[serde(default)]
    name: String,

    #[serde(default)]
    active: RawBool,
}

impl From<RawProfession> for Profession {
    fn from(raw: RawProfession) -> Self {
        Self {
            id: raw
                .id
                .or(raw.mongo_id)
                .map(RawId::into_string)
                .unwrap_or_default(),
            name: raw.name,
            active: raw.active.into_bool(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessionPayload {
    pub name: String,
    pub active: bool,
}

impl TerminalDisplay for Profession {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Name", "Active"]
    }

    fn table_row(self) -> Vec<String> {
        let active = if self.active { "yes" } else { "no" };
        vec![self.id, self.name, active.to_string()]
    }

    fn csv_titles() -> Vec<&'static str> {
        vec!["id", "name", "active"]
    }

    fn csv_row(self) -> HashMap<&'static str, String> {
        vec![
            ("id", self.id),
            ("name", self.name),
            ("active", self.active.to_string()),
        ]
        .into_iter()
        .collect()
    }
}
