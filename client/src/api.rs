//! The ledger operations connectors depend on.

use async_trait::async_trait;

use chain_types::{Balance, Key, SubmitResponse, Template};

use crate::builder::TransactionBuilder;
use crate::error::ChainError;
use crate::query::{BalanceQuery, KeyQuery, Page};

/// Upper bound on pages fetched while looking for a first result.
const MAX_PAGES: usize = 64;

/// Remote operations of a Chain core.
///
/// [`crate::ChainClient`] implements this over HTTP; tests substitute an
/// in-memory ledger.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// `mockhsm/list-keys`
    async fn list_keys(&self, query: &KeyQuery) -> Result<Page<Key, KeyQuery>, ChainError>;

    /// `list-balances`
    async fn list_balances(
        &self,
        query: &BalanceQuery,
    ) -> Result<Page<Balance, BalanceQuery>, ChainError>;

    /// `build-transaction`. A ledger rejection is [`ChainError::Build`].
    async fn build_transaction(&self, builder: &TransactionBuilder)
        -> Result<Template, ChainError>;

    /// `mockhsm/sign-transaction` on the ledger's signer endpoint.
    async fn sign_transaction(
        &self,
        template: &Template,
        xpubs: &[String],
    ) -> Result<Template, ChainError>;

    /// `submit-transaction`
    async fn submit_transaction(&self, template: &Template) -> Result<SubmitResponse, ChainError>;
}

/// Resolve a key alias to the first matching mock-HSM key.
pub async fn resolve_key<L: LedgerApi + ?Sized>(ledger: &L, alias: &str) -> Result<Key, ChainError> {
    let mut query = KeyQuery::aliases([alias]);
    for _ in 0..MAX_PAGES {
        let page = ledger.list_keys(&query).await?;
        if let Some(key) = page.items.into_iter().next() {
            tracing::debug!(alias, xpub = %key.xpub, "resolved signing key");
            return Ok(key);
        }
        match page.next {
            Some(next) if !page.last_page => query = next,
            _ => break,
        }
    }
    Err(ChainError::KeyNotFound(alias.to_string()))
}

/// First row of a balance query, or `None` when nothing matches.
pub async fn first_balance<L: LedgerApi + ?Sized>(
    ledger: &L,
    query: &BalanceQuery,
) -> Result<Option<Balance>, ChainError> {
    let mut query = query.clone();
    for _ in 0..MAX_PAGES {
        let page = ledger.list_balances(&query).await?;
        if let Some(balance) = page.items.into_iter().next() {
            return Ok(Some(balance));
        }
        match page.next {
            Some(next) if !page.last_page => query = next,
            _ => break,
        }
    }
    Ok(None)
}
