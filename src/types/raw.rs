//! Wire-level coercion for the TaskFixer API. Records come back from
//! different backend revisions with different shapes: ids as strings,
//! numbers or Mongo `{"$oid": ...}` documents, booleans as 0/1 or strings,
//! numeric fields as quoted strings. Everything is folded into canonical
//! Rust types on deserialize.

use serde::{Deserialize, Serialize};

/// Record id in any of the wire shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
            RawId::Oid { oid } => oid,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum RawBool {
    Flag(bool),
    Number(i64),
    Text(String),
    #[default]
    Missing,
}

impl RawBool {
    pub fn into_bool(self) -> bool {
        match self {
            RawBool::Flag(flag) => flag,
            RawBool::Number(n) => n != 0,
            RawBool::Text(s) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1")
            }
            RawBool::Missing => false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawNumber {
    pub fn into_f64(self) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => s.trim().parse().unwrap_or(0.0),
            RawNumber::Missing => 0.0,
        }
    }
}

/// List endpoints return either a bare array or `{"items": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Plain(Vec<T>),
    Items {
        #[serde(default = "Vec::new")]
        items: Vec<T>,
    },
    Empty,
}

impl<T> ListBody<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Plain(items) => items,
            ListBody::Items { items } => items,
            ListBody::Empty => Vec::new(),
        }
    }
}

/// DELETE outcome. Professions referenced by offerings are disabled
/// instead of removed, the server reports which happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawRemoveOutcome")]
pub struct RemoveOutcome {
    pub soft_disabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRemoveOutcome {
    #[serde(default, alias = "softDisabled")]
    soft_disabled: RawBool,

    #[serde(default)]
    message: Option<String>,
}

impl From<RawRemoveOutcome> for RemoveOutcome {
    fn from(raw: RawRemoveOutcome) -> Self {
        Self {
            soft_disabled: raw.soft_disabled.into_bool(),
            message: raw.message.filter(|m| !m.is_empty()),
        }
    }
}
