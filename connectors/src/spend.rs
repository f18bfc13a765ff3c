//! Asset spend: move an amount of one asset between two accounts and
//! submit the signed transaction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chain_client::{
    resolve_key, ChainError, ClientFactory, HsmSigner, HttpClientFactory, LedgerApi,
    TransactionBuilder,
};
use chain_types::{Action, ReferenceRow, TransactionReceipt, TransactionResponse};

use crate::error::ConnectorError;
use crate::factory::build_client;
use crate::lifecycle::Connector;
use crate::outcome::settle;
use crate::params::{parse_amount, reference_data, require_asset};

const FAILURE_CONTEXT: &str = "error while spending asset";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendInput {
    pub url: Option<String>,
    pub account_token: Option<String>,
    /// Key of the asset issuer, for assets that require it.
    pub key_asset_alias: Option<String>,
    pub key_account_from_alias: Option<String>,
    pub key_account_to_alias: Option<String>,
    pub account_from_alias: String,
    pub account_to_alias: String,
    pub asset_id: Option<String>,
    pub asset_alias: Option<String>,
    pub amount: String,
    /// Rows of `[name, value]` attached to the receiving action.
    pub reference_data: Vec<ReferenceRow>,
}

impl SpendInput {
    fn key_aliases(&self) -> [&str; 3] {
        [
            self.key_asset_alias.as_deref().unwrap_or_default(),
            self.key_account_from_alias.as_deref().unwrap_or_default(),
            self.key_account_to_alias.as_deref().unwrap_or_default(),
        ]
    }

    /// The spend and control actions, spend first.
    fn actions(&self) -> Result<[Action; 2], ConnectorError> {
        let asset = require_asset("asset", self.asset_alias.as_deref(), self.asset_id.as_deref())?;
        let amount = parse_amount("amount", &self.amount)?;

        let control = Action::control_with_account(&self.account_to_alias, asset.clone(), amount)
            .with_reference_data(reference_data(&self.reference_data));
        let spend = Action::spend_from_account(&self.account_from_alias, asset, amount);
        Ok([spend, control])
    }
}

/// Resolve each non-empty alias to its first key and register it with a
/// fresh signer. Empty aliases are skipped.
pub(crate) async fn register_keys<L: LedgerApi + ?Sized>(
    ledger: &L,
    aliases: &[&str],
) -> Result<HsmSigner, ChainError> {
    let mut signer = HsmSigner::new();
    for alias in aliases.iter().copied().filter(|a| !a.is_empty()) {
        let key = resolve_key(ledger, alias).await?;
        signer.add_key(&key);
    }
    Ok(signer)
}

/// Builds, signs and submits a transfer.
pub struct SpendAssetConnector<F = HttpClientFactory> {
    factory: F,
}

impl<F: ClientFactory> SpendAssetConnector<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    async fn spend<L: LedgerApi + ?Sized>(
        ledger: &L,
        key_aliases: &[&str],
        actions: [Action; 2],
    ) -> Result<TransactionReceipt, ChainError> {
        let signer = register_keys(ledger, key_aliases).await?;

        let [spend, control] = actions;
        let template = TransactionBuilder::new()
            .add_action(spend)
            .add_action(control)
            .build(ledger)
            .await?;
        let signed = signer.sign(ledger, template).await?;
        let submitted = ledger.submit_transaction(&signed).await?;
        Ok(TransactionReceipt {
            transaction_id: submitted.id,
        })
    }
}

impl Default for SpendAssetConnector<HttpClientFactory> {
    fn default() -> Self {
        Self::new(HttpClientFactory::default())
    }
}

#[async_trait]
impl<F: ClientFactory> Connector for SpendAssetConnector<F> {
    type Input = SpendInput;
    type Output = TransactionResponse;

    fn name(&self) -> &'static str {
        "chain-spend-asset"
    }

    fn validate_input(&self, input: &SpendInput) -> Result<(), ConnectorError> {
        input.actions().map(|_| ())
    }

    async fn execute(&self, input: &SpendInput) -> Result<TransactionResponse, ConnectorError> {
        let actions = input.actions()?;
        let client = build_client(
            &self.factory,
            input.url.as_deref(),
            input.account_token.as_deref(),
        )?;

        let result = Self::spend(&client, &input.key_aliases(), actions).await;
        let outcome = settle(result, FAILURE_CONTEXT)?;
        if let Some(receipt) = outcome.completed() {
            tracing::info!(
                transaction_id = %receipt.transaction_id,
                from = %input.account_from_alias,
                to = %input.account_to_alias,
                "transaction submitted"
            );
        }
        Ok(outcome)
    }
}
