//! Nullable client factory. Hands out clients backed by one shared
//! [`NullLedger`] and records which constructor was used.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use chain_client::{
    BalanceQuery, ChainError, ClientFactory, KeyQuery, LedgerApi, Page, TransactionBuilder,
};
use chain_types::{Balance, Key, SubmitResponse, Template};

use crate::ledger::NullLedger;

/// Which constructor produced a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientPath {
    Default,
    Url(String),
    UrlAndToken { url: String, token: String },
}

/// A client produced by [`NullClientFactory`].
#[derive(Debug, Clone)]
pub struct NullClient {
    ledger: Arc<NullLedger>,
    path: ClientPath,
}

impl NullClient {
    pub fn path(&self) -> &ClientPath {
        &self.path
    }
}

#[async_trait]
impl LedgerApi for NullClient {
    async fn list_keys(&self, query: &KeyQuery) -> Result<Page<Key, KeyQuery>, ChainError> {
        self.ledger.list_keys(query).await
    }

    async fn list_balances(
        &self,
        query: &BalanceQuery,
    ) -> Result<Page<Balance, BalanceQuery>, ChainError> {
        self.ledger.list_balances(query).await
    }

    async fn build_transaction(
        &self,
        builder: &TransactionBuilder,
    ) -> Result<Template, ChainError> {
        self.ledger.build_transaction(builder).await
    }

    async fn sign_transaction(
        &self,
        template: &Template,
        xpubs: &[String],
    ) -> Result<Template, ChainError> {
        self.ledger.sign_transaction(template, xpubs).await
    }

    async fn submit_transaction(&self, template: &Template) -> Result<SubmitResponse, ChainError> {
        self.ledger.submit_transaction(template).await
    }
}

pub struct NullClientFactory {
    ledger: Arc<NullLedger>,
    reject_urls: bool,
    paths: Mutex<Vec<ClientPath>>,
}

impl NullClientFactory {
    pub fn new(ledger: NullLedger) -> Self {
        Self {
            ledger: Arc::new(ledger),
            reject_urls: false,
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Fail every constructor that takes a URL with `BadUrl`.
    pub fn rejecting_urls(mut self) -> Self {
        self.reject_urls = true;
        self
    }

    pub fn ledger(&self) -> &NullLedger {
        &self.ledger
    }

    /// Constructors used so far, in order. Rejected URLs are recorded too.
    pub fn paths(&self) -> Vec<ClientPath> {
        self.lock_paths().clone()
    }

    fn lock_paths(&self) -> MutexGuard<'_, Vec<ClientPath>> {
        self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn client(&self, path: ClientPath) -> Result<NullClient, ChainError> {
        self.lock_paths().push(path.clone());
        let url = match &path {
            ClientPath::Default => None,
            ClientPath::Url(url) | ClientPath::UrlAndToken { url, .. } => Some(url),
        };
        if let (true, Some(url)) = (self.reject_urls, url) {
            return Err(ChainError::BadUrl {
                url: url.clone(),
                reason: "rejected by null factory".into(),
            });
        }
        Ok(NullClient {
            ledger: Arc::clone(&self.ledger),
            path,
        })
    }
}

impl Default for NullClientFactory {
    fn default() -> Self {
        Self::new(NullLedger::new())
    }
}

impl ClientFactory for NullClientFactory {
    type Client = NullClient;

    fn default_client(&self) -> Result<NullClient, ChainError> {
        self.client(ClientPath::Default)
    }

    fn with_url(&self, url: &str) -> Result<NullClient, ChainError> {
        self.client(ClientPath::Url(url.to_string()))
    }

    fn with_url_and_token(&self, url: &str, access_token: &str) -> Result<NullClient, ChainError> {
        self.client(ClientPath::UrlAndToken {
            url: url.to_string(),
            token: access_token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_constructor_paths() {
        let factory = NullClientFactory::default();
        factory.default_client().unwrap();
        factory.with_url("http://ledger:1999").unwrap();
        let client = factory.with_url_and_token("http://ledger:1999", "ops:pw").unwrap();
        assert_eq!(
            client.path(),
            &ClientPath::UrlAndToken {
                url: "http://ledger:1999".into(),
                token: "ops:pw".into()
            }
        );
        assert_eq!(factory.paths().len(), 3);
        assert_eq!(factory.paths()[0], ClientPath::Default);
    }

    #[test]
    fn rejecting_factory_still_builds_default() {
        let factory = NullClientFactory::default().rejecting_urls();
        assert!(matches!(
            factory.with_url("http://ledger:1999"),
            Err(ChainError::BadUrl { .. })
        ));
        assert!(factory.default_client().is_ok());
    }

    #[tokio::test]
    async fn clients_share_one_ledger() {
        let factory = NullClientFactory::new(NullLedger::new().with_key("k"));
        let a = factory.default_client().unwrap();
        let b = factory.with_url("http://ledger:1999").unwrap();
        a.list_keys(&KeyQuery::aliases(["k"])).await.unwrap();
        b.list_keys(&KeyQuery::aliases(["k"])).await.unwrap();
        assert_eq!(factory.ledger().calls().len(), 2);
    }
}
