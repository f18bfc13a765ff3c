//! Paged list queries.

use serde::{Deserialize, Serialize};

/// One page of query results.
///
/// `next` is the query that fetches the following page; it is only
/// meaningful while `last_page` is false.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T, Q> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<Q>,
    #[serde(default)]
    pub last_page: bool,
}

impl<T, Q> Page<T, Q> {
    /// A single, final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next: None,
            last_page: true,
        }
    }
}

/// Mock-HSM key lookup by alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl KeyQuery {
    pub fn aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            after: None,
        }
    }
}

/// Filtered balance query with positional parameters (`$1`, `$2`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceQuery {
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub filter_params: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sum_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl BalanceQuery {
    pub const ACCOUNT_ASSET_FILTER: &'static str = "account_alias=$1 AND asset_alias=$2";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.filter_params.push(serde_json::Value::String(value.into()));
        self
    }

    /// The balance of one asset held by one account.
    pub fn account_asset(account_alias: &str, asset_alias: &str) -> Self {
        Self::new()
            .filter(Self::ACCOUNT_ASSET_FILTER)
            .param(account_alias)
            .param(asset_alias)
    }
}
