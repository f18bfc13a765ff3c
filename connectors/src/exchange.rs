//! Base exchange transaction.
//!
//! Builds the maker's half of an asset exchange: spend one asset from an
//! account and receive another into the same account. The template is
//! signed with additional actions allowed and returned unsubmitted, so a
//! counterparty can add the other half and submit.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chain_client::{
    ChainError, ClientFactory, HsmSigner, HttpClientFactory, LedgerApi, TransactionBuilder,
};
use chain_types::{Action, BaseTransaction, BaseTransactionResponse, ReferenceRow};

use crate::error::ConnectorError;
use crate::factory::build_client;
use crate::lifecycle::Connector;
use crate::outcome::settle;
use crate::params::{parse_amount, reference_data, require_asset};
use crate::spend::register_keys;

const FAILURE_CONTEXT: &str = "error while creating base exchange transaction";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeInput {
    pub url: Option<String>,
    pub account_token: Option<String>,
    /// Alias of the mock-HSM key controlling the account. Required: the
    /// base transaction is only useful signed.
    pub key_account_alias: String,
    pub account_alias: String,
    pub spend_asset_id: Option<String>,
    pub spend_asset_alias: Option<String>,
    pub spend_amount: String,
    pub receive_asset_id: Option<String>,
    pub receive_asset_alias: Option<String>,
    pub receive_amount: String,
    /// Rows of `[name, value]` attached to the receiving action.
    pub reference_data: Vec<ReferenceRow>,
}

impl ExchangeInput {
    /// The spend and control actions, spend first.
    fn actions(&self) -> Result<[Action; 2], ConnectorError> {
        if self.key_account_alias.is_empty() {
            return Err(ConnectorError::InvalidInput {
                parameter: "key_account_alias",
                reason: "a signing key alias is required".to_string(),
            });
        }
        let spend_asset = require_asset(
            "spend_asset",
            self.spend_asset_alias.as_deref(),
            self.spend_asset_id.as_deref(),
        )?;
        let receive_asset = require_asset(
            "receive_asset",
            self.receive_asset_alias.as_deref(),
            self.receive_asset_id.as_deref(),
        )?;
        let spend_amount = parse_amount("spend_amount", &self.spend_amount)?;
        let receive_amount = parse_amount("receive_amount", &self.receive_amount)?;

        let control = Action::control_with_account(&self.account_alias, receive_asset, receive_amount)
            .with_reference_data(reference_data(&self.reference_data));
        let spend = Action::spend_from_account(&self.account_alias, spend_asset, spend_amount);
        Ok([spend, control])
    }
}

/// Signs, but does not submit, one side of an exchange.
pub struct CreateBaseExchangeAssetConnector<F = HttpClientFactory> {
    factory: F,
}

impl<F: ClientFactory> CreateBaseExchangeAssetConnector<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    async fn base_transaction<L: LedgerApi + ?Sized>(
        ledger: &L,
        key_alias: &str,
        actions: [Action; 2],
    ) -> Result<BaseTransaction, ChainError> {
        let signer: HsmSigner = register_keys(ledger, &[key_alias]).await?;

        let [spend, control] = actions;
        let template = TransactionBuilder::new()
            .add_action(spend)
            .add_action(control)
            .build(ledger)
            .await?;
        tracing::debug!("base exchange transaction built");

        let signed = signer.sign(ledger, template.allow_additional_actions()).await?;
        Ok(BaseTransaction {
            raw_transaction: signed.raw_transaction,
        })
    }
}

impl Default for CreateBaseExchangeAssetConnector<HttpClientFactory> {
    fn default() -> Self {
        Self::new(HttpClientFactory::default())
    }
}

#[async_trait]
impl<F: ClientFactory> Connector for CreateBaseExchangeAssetConnector<F> {
    type Input = ExchangeInput;
    type Output = BaseTransactionResponse;

    fn name(&self) -> &'static str {
        "chain-create-base-exchange-asset"
    }

    fn validate_input(&self, input: &ExchangeInput) -> Result<(), ConnectorError> {
        input.actions().map(|_| ())
    }

    async fn execute(&self, input: &ExchangeInput) -> Result<BaseTransactionResponse, ConnectorError> {
        let actions = input.actions()?;
        let client = build_client(
            &self.factory,
            input.url.as_deref(),
            input.account_token.as_deref(),
        )?;

        let result = Self::base_transaction(&client, &input.key_account_alias, actions).await;
        let outcome = settle(result, FAILURE_CONTEXT)?;
        if outcome.is_completed() {
            tracing::info!(account = %input.account_alias, "base exchange transaction signed");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_types::{AssetRef, ReferenceData};

    fn input() -> ExchangeInput {
        ExchangeInput {
            key_account_alias: "alice_key".into(),
            account_alias: "alice".into(),
            spend_asset_id: Some("usd-id".into()),
            spend_amount: "100".into(),
            receive_asset_alias: Some("EUR".into()),
            receive_asset_id: Some("eur-id".into()),
            receive_amount: "90".into(),
            reference_data: vec![vec!["desk".into(), "fx".into()], vec!["odd".into()]],
            ..Default::default()
        }
    }

    #[test]
    fn actions_are_spend_then_control() {
        let [spend, control] = input().actions().unwrap();
        assert_eq!(spend.asset, AssetRef::Id("usd-id".into()));
        assert_eq!(spend.amount.units(), 100);
        assert!(spend.reference_data.is_empty());
        assert_eq!(control.asset, AssetRef::Alias("EUR".into()));
        assert_eq!(control.amount.units(), 90);
        let mut expected = ReferenceData::new();
        expected.insert("desk", "fx");
        assert_eq!(control.reference_data, expected);
    }

    #[test]
    fn validation_catches_missing_receive_asset() {
        let connector = CreateBaseExchangeAssetConnector::default();
        let bad = ExchangeInput {
            receive_asset_alias: None,
            receive_asset_id: None,
            ..input()
        };
        let err = connector.validate_input(&bad).unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::InvalidInput {
                parameter: "receive_asset",
                ..
            }
        ));
    }

    #[test]
    fn validation_requires_signing_key() {
        let connector = CreateBaseExchangeAssetConnector::default();
        let unsigned = ExchangeInput {
            key_account_alias: String::new(),
            ..input()
        };
        assert!(matches!(
            connector.validate_input(&unsigned),
            Err(ConnectorError::InvalidInput {
                parameter: "key_account_alias",
                ..
            })
        ));
    }

    #[test]
    fn validation_catches_bad_amount() {
        let connector = CreateBaseExchangeAssetConnector::default();
        let bad = ExchangeInput {
            spend_amount: "1e3".into(),
            ..input()
        };
        assert!(connector.validate_input(&bad).is_err());
    }

    #[test]
    fn input_decodes_from_host_json() {
        let parsed: ExchangeInput = serde_json::from_value(serde_json::json!({
            "url": "http://127.0.0.1:1999",
            "key_account_alias": "alice_key",
            "account_alias": "alice",
            "spend_asset_id": "usd-id",
            "spend_amount": "100",
            "receive_asset_id": "eur-id",
            "receive_amount": "90",
            "reference_data": [["desk", "fx"]]
        }))
        .unwrap();
        assert_eq!(parsed.account_token, None);
        assert_eq!(parsed.reference_data.len(), 1);
    }
}
