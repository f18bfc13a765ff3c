//! Balance lookup for one account/asset pair.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chain_client::{first_balance, BalanceQuery, ClientFactory, HttpClientFactory};
use chain_types::BalanceAmount;

use crate::error::ConnectorError;
use crate::factory::build_client;
use crate::lifecycle::Connector;

const FAILURE_CONTEXT: &str = "error while getting the balance";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceInput {
    pub url: Option<String>,
    pub account_token: Option<String>,
    pub account_alias: String,
    pub asset_alias: String,
}

/// Reads the balance of `asset_alias` held by `account_alias`.
///
/// The output is `None` when the ledger has no matching balance row.
pub struct GetBalanceConnector<F = HttpClientFactory> {
    factory: F,
}

impl<F: ClientFactory> GetBalanceConnector<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl Default for GetBalanceConnector<HttpClientFactory> {
    fn default() -> Self {
        Self::new(HttpClientFactory::default())
    }
}

#[async_trait]
impl<F: ClientFactory> Connector for GetBalanceConnector<F> {
    type Input = BalanceInput;
    type Output = Option<BalanceAmount>;

    fn name(&self) -> &'static str {
        "chain-get-balance"
    }

    fn validate_input(&self, _input: &BalanceInput) -> Result<(), ConnectorError> {
        Ok(())
    }

    async fn execute(&self, input: &BalanceInput) -> Result<Option<BalanceAmount>, ConnectorError> {
        let client = build_client(
            &self.factory,
            input.url.as_deref(),
            input.account_token.as_deref(),
        )?;

        let query = BalanceQuery::account_asset(&input.account_alias, &input.asset_alias);
        let row = first_balance(&client, &query)
            .await
            .map_err(|source| ConnectorError::Ledger {
                context: FAILURE_CONTEXT,
                source,
            })?;

        match &row {
            Some(balance) => tracing::info!(
                account = %input.account_alias,
                asset = %input.asset_alias,
                amount = %balance.amount,
                "balance found"
            ),
            None => tracing::info!(
                account = %input.account_alias,
                asset = %input.asset_alias,
                "no balance row"
            ),
        }
        Ok(row.map(|balance| BalanceAmount {
            amount: balance.amount,
        }))
    }
}
