//! Client construction seam.

use crate::api::LedgerApi;
use crate::config::ClientConfig;
use crate::error::ChainError;
use crate::http::{ChainClient, DEFAULT_URL};

/// Builds ledger clients.
///
/// The three constructors mirror the three ways a host can configure a
/// connector: nothing, a URL, or a URL plus access token.
pub trait ClientFactory: Send + Sync {
    type Client: LedgerApi;

    fn default_client(&self) -> Result<Self::Client, ChainError>;

    fn with_url(&self, url: &str) -> Result<Self::Client, ChainError>;

    fn with_url_and_token(&self, url: &str, access_token: &str) -> Result<Self::Client, ChainError>;
}

/// Builds [`ChainClient`]s sharing one set of HTTP settings.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
    config: ClientConfig,
}

impl HttpClientFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl ClientFactory for HttpClientFactory {
    type Client = ChainClient;

    fn default_client(&self) -> Result<ChainClient, ChainError> {
        ChainClient::with_options(DEFAULT_URL, None, &self.config)
    }

    fn with_url(&self, url: &str) -> Result<ChainClient, ChainError> {
        ChainClient::with_options(url, None, &self.config)
    }

    fn with_url_and_token(&self, url: &str, access_token: &str) -> Result<ChainClient, ChainError> {
        ChainClient::with_options(url, Some(access_token), &self.config)
    }
}
