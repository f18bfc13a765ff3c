//! Records returned by ledger queries and submissions.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// A mock-HSM key, resolved by alias.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    #[serde(default)]
    pub alias: Option<String>,
    pub xpub: String,
}

/// One row of a balance query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: Amount,
    #[serde(default)]
    pub sum_by: serde_json::Map<String, serde_json::Value>,
}

/// Acknowledgement of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_row_decodes() {
        let b: Balance = serde_json::from_str(
            r#"{"amount":1500,"sum_by":{"account_alias":"alice","asset_alias":"USD"}}"#,
        )
        .unwrap();
        assert_eq!(b.amount, Amount::new(1500));
        assert_eq!(b.sum_by["asset_alias"], "USD");
    }

    #[test]
    fn key_without_alias_decodes() {
        let k: Key = serde_json::from_str(r#"{"xpub":"xpub123"}"#).unwrap();
        assert_eq!(k.alias, None);
        assert_eq!(k.xpub, "xpub123");
    }
}
