//! Nullable ledger: serves keys and balances from memory and scripts the
//! outcome of build, sign and submit.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use chain_client::{
    BalanceQuery, BuildError, ChainError, KeyQuery, LedgerApi, Page, TransactionBuilder,
};
use chain_types::{Action, Amount, Balance, Key, SubmitResponse, Template};

/// Ledger operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListKeys,
    ListBalances,
    Build,
    Sign,
    Submit,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCall {
    ListKeys(KeyQuery),
    ListBalances(BalanceQuery),
    Build(TransactionBuilder),
    Sign { template: Template, xpubs: Vec<String> },
    Submit(Template),
}

#[derive(Default)]
struct State {
    keys: HashMap<String, Key>,
    balances: Vec<Balance>,
    transaction_id: Option<String>,
    build_rejection: Option<BuildError>,
    failures: HashMap<Operation, ChainError>,
    calls: Vec<LedgerCall>,
}

/// An in-memory ledger.
///
/// Built templates carry `unsigned:<actions>` as raw transaction; signing
/// appends `:signed`; submission returns the configured transaction id
/// (`null-tx` by default).
pub struct NullLedger {
    state: Mutex<State>,
}

impl NullLedger {
    pub const DEFAULT_TRANSACTION_ID: &'static str = "null-tx";

    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make a mock-HSM key resolvable by alias. Its xpub is `xpub-<alias>`.
    pub fn with_key(self, alias: &str) -> Self {
        self.state().keys.insert(
            alias.to_string(),
            Key {
                alias: Some(alias.to_string()),
                xpub: format!("xpub-{alias}"),
            },
        );
        self
    }

    /// Add a balance row for an account/asset pair.
    pub fn with_balance(self, account_alias: &str, asset_alias: &str, amount: u64) -> Self {
        let mut sum_by = serde_json::Map::new();
        sum_by.insert("account_alias".into(), account_alias.into());
        sum_by.insert("asset_alias".into(), asset_alias.into());
        self.state().balances.push(Balance {
            amount: Amount::new(amount),
            sum_by,
        });
        self
    }

    pub fn with_transaction_id(self, id: &str) -> Self {
        self.state().transaction_id = Some(id.to_string());
        self
    }

    /// Reject every build with `rejection`.
    pub fn rejecting_builds(self, rejection: BuildError) -> Self {
        self.state().build_rejection = Some(rejection);
        self
    }

    /// Fail the next call of `operation` with `error`.
    pub fn fail_next(&self, operation: Operation, error: ChainError) {
        self.state().failures.insert(operation, error);
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.state().calls.clone()
    }

    /// Actions of every build request, in order.
    pub fn built_actions(&self) -> Vec<Vec<Action>> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                LedgerCall::Build(builder) => Some(builder.actions().to_vec()),
                _ => None,
            })
            .collect()
    }

    pub fn submitted(&self) -> Vec<Template> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                LedgerCall::Submit(template) => Some(template.clone()),
                _ => None,
            })
            .collect()
    }

    /// Record `call`, then return the scripted failure for `operation`, if any.
    fn enter(&self, operation: Operation, call: LedgerCall) -> Result<(), ChainError> {
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for NullLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NullLedger")
            .field("calls", &self.state().calls.len())
            .finish_non_exhaustive()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_row(row: &Balance, account: &serde_json::Value, asset: &serde_json::Value) -> bool {
    row.sum_by.get("account_alias") == Some(account) && row.sum_by.get("asset_alias") == Some(asset)
}

#[async_trait]
impl LedgerApi for NullLedger {
    async fn list_keys(&self, query: &KeyQuery) -> Result<Page<Key, KeyQuery>, ChainError> {
        self.enter(Operation::ListKeys, LedgerCall::ListKeys(query.clone()))?;
        let state = self.state();
        let items = query
            .aliases
            .iter()
            .filter_map(|alias| state.keys.get(alias).cloned())
            .collect();
        Ok(Page::last(items))
    }

    async fn list_balances(
        &self,
        query: &BalanceQuery,
    ) -> Result<Page<Balance, BalanceQuery>, ChainError> {
        self.enter(Operation::ListBalances, LedgerCall::ListBalances(query.clone()))?;
        let state = self.state();
        let items = match (query.filter.as_str(), query.filter_params.as_slice()) {
            (BalanceQuery::ACCOUNT_ASSET_FILTER, [account, asset]) => state
                .balances
                .iter()
                .filter(|row| matches_row(row, account, asset))
                .cloned()
                .collect(),
            _ => state.balances.clone(),
        };
        Ok(Page::last(items))
    }

    async fn build_transaction(
        &self,
        builder: &TransactionBuilder,
    ) -> Result<Template, ChainError> {
        self.enter(Operation::Build, LedgerCall::Build(builder.clone()))?;
        if let Some(rejection) = self.state().build_rejection.clone() {
            return Err(ChainError::Build(rejection));
        }
        Ok(Template {
            raw_transaction: format!("unsigned:{}", builder.actions().len()),
            local: true,
            ..Default::default()
        })
    }

    async fn sign_transaction(
        &self,
        template: &Template,
        xpubs: &[String],
    ) -> Result<Template, ChainError> {
        self.enter(
            Operation::Sign,
            LedgerCall::Sign {
                template: template.clone(),
                xpubs: xpubs.to_vec(),
            },
        )?;
        Ok(Template {
            raw_transaction: format!("{}:signed", template.raw_transaction),
            ..template.clone()
        })
    }

    async fn submit_transaction(&self, template: &Template) -> Result<SubmitResponse, ChainError> {
        self.enter(Operation::Submit, LedgerCall::Submit(template.clone()))?;
        let id = self
            .state()
            .transaction_id
            .clone()
            .unwrap_or_else(|| Self::DEFAULT_TRANSACTION_ID.to_string());
        Ok(SubmitResponse { id })
    }
}
