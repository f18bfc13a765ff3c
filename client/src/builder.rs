//! Transaction builder requests.

use serde::Serialize;

use chain_types::{Action, Template};

use crate::api::LedgerApi;
use crate::error::ChainError;

/// Actions to assemble into one transaction, sent to `build-transaction`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionBuilder {
    actions: Vec<Action>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Build an unsigned template against the ledger.
    pub async fn build<L: LedgerApi + ?Sized>(&self, ledger: &L) -> Result<Template, ChainError> {
        ledger.build_transaction(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_types::{Amount, AssetRef};

    #[test]
    fn actions_keep_insertion_order() {
        let builder = TransactionBuilder::new()
            .add_action(Action::spend_from_account(
                "alice",
                AssetRef::Alias("USD".into()),
                Amount::new(5),
            ))
            .add_action(Action::control_with_account(
                "bob",
                AssetRef::Alias("USD".into()),
                Amount::new(5),
            ));
        let body = serde_json::to_value(&builder).unwrap();
        assert_eq!(body["actions"][0]["type"], "spend_account");
        assert_eq!(body["actions"][1]["type"], "control_account");
        assert_eq!(body.as_object().map(|o| o.len()), Some(1));
    }
}
