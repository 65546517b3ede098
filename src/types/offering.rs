use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::display::TerminalDisplay;
use crate::types::profession::Profession;
use crate::types::raw::{RawBool, RawId, RawNumber};

pub const OFFERING_PATH: &str = "service_offering";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawOffering")]
pub struct ServiceOffering {
    pub id: String,
    pub description: String,
    pub estimated_price: f64,
    pub estimated_duration: f64,
    pub active: bool,

    /// Embedded profession when the server expands it, a name-only stub
    /// when it only sends `profession_name`, none otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<Profession>,

    pub profession_id: String,
}

#[derive(Debug, Deserialize)]
struct RawOffering {
    #[serde(default)]
    id: Option<RawId>,

    #[serde(default, rename = "_id")]
    mongo_id: Option<RawId>,

    #[serde(default)]
    description: String,

    #[serde(default)]
    estimated_price: RawNumber,

    #[serde(default)]
    estimated_duration: RawNumber,

    #[serde(default)]
    active: RawBool,

    #[serde(default)]
    profession: Option<RawEmbeddedProfession>,

    #[serde(default)]
    profession_name: Option<String>,

    #[serde(default)]
    id_profession: Option<RawId>,
}

/// Embedded professions differ from listed ones in one way: a missing
/// `active` flag means active.
#[derive(Debug, Deserialize)]
struct RawEmbeddedProfession {
    #[serde(default)]
    id: Option<RawId>,

    #[serde(default, rename = "_id")]
    mongo_id: Option<RawId>,

    #[serde(default)]
    name: String,

    #[serde(default)]
    active: Option<RawBool>,
}

impl From<RawEmbeddedProfession> for Profession {
    fn from(raw: RawEmbeddedProfession) -> Self {
        Self {
            id: raw
                .id
                .or(raw.mongo_id)
                .map(RawId::into_string)
                .unwrap_or_default(),
            name: raw.name,
            active: raw.active.map(RawBool::into_bool).unwrap_or(true),
        }
    }
}

impl From<RawOffering> for ServiceOffering {
    fn from(raw: RawOffering) -> Self {
        let profession = match raw.profession {
            Some(p) => Some(Profession::from(p)),
            None => raw
                .profession_name
                .filter(|name| !name.is_empty())
                .map(Profession::named),
        };

        // id_profession wins, then whatever id the embedded profession
        // carries. Empty values fall through.
        let profession_id = raw
            .id_profession
            .map(RawId::into_string)
            .filter(|id| !id.is_empty())
            .or_else(|| {
                profession
                    .as_ref()
                    .map(|p| p.id.clone())
                    .filter(|id| !id.is_empty())
            })
            .unwrap_or_default();

        Self {
            id: raw
                .id
                .or(raw.mongo_id)
                .map(RawId::into_string)
                .unwrap_or_default(),
            description: raw.description,
            estimated_price: raw.estimated_price.into_f64(),
            estimated_duration: raw.estimated_duration.into_f64(),
            active: raw.active.into_bool(),
            profession,
            profession_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OfferingPayload {
    pub description: String,
    pub estimated_price: f64,
    pub estimated_duration: f64,
    pub active: bool,
    pub id_profession: String,
}

fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n:.2}")
    }
}

impl TerminalDisplay for ServiceOffering {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Description", "Price", "Duration", "Profession", "Active"]
    }

    fn table_row(self) -> Vec<String> {
        let profession = match self.profession {
            Some(p) if !p.name.is_empty() => p.name,
            _ if !self.profession_id.is_empty() => self.profession_id.clone(),
            _ => String::from("<none>"),
        };
        let active = if self.active { "yes" } else { "no" };
        vec![
            self.id,
            self.description,
            fmt_number(self.estimated_price),
            fmt_number(self.estimated_duration),
            profession,
            active.to_string(),
        ]
    }

    fn csv_titles() -> Vec<&'static str> {
        vec![
            "id",
            "description",
            "estimated_price",
            "estimated_duration",
            "profession_id",
            "active",
        ]
    }

    fn csv_row(self) -> HashMap<&'static str, String> {
        vec![
            ("id", self.id),
            ("description", self.description),
            ("estimated_price", fmt_number(self.estimated_price)),
            ("estimated_duration", fmt_number(self.estimated_duration)),
            ("profession_id", self.profession_id),
            ("active", self.active.to_string()),
        ]
        .into_iter()
        .collect()
    }
}
