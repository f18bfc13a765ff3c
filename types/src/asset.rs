//! Asset references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies an asset either by its ledger id or by its alias.
///
/// Flattened into an action as exactly one of `asset_id` / `asset_alias`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRef {
    #[serde(rename = "asset_id")]
    Id(String),
    #[serde(rename = "asset_alias")]
    Alias(String),
}

impl AssetRef {
    /// Pick the reference to use from optional host inputs.
    ///
    /// A non-empty alias always wins over the id. Returns `None` when neither
    /// is supplied.
    pub fn select(alias: Option<&str>, id: Option<&str>) -> Option<Self> {
        match (non_empty(alias), non_empty(id)) {
            (Some(alias), _) => Some(Self::Alias(alias.to_string())),
            (None, Some(id)) => Some(Self::Id(id.to_string())),
            (None, None) => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "asset id {id}"),
            Self::Alias(alias) => write!(f, "asset alias {alias}"),
        }
    }
}
