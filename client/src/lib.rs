//! Client for the Chain ledger API.
//!
//! Provides:
//! - [`ChainClient`], a `reqwest`-backed client for a Chain core
//! - [`LedgerApi`], the seam connectors program against (the HTTP client and
//!   the test nullables both implement it)
//! - key and balance queries with page following
//! - [`TransactionBuilder`] and the per-invocation [`HsmSigner`]
//! - [`ClientFactory`], how connectors obtain clients
//! - the [`ChainError`] taxonomy, including structured build rejections

pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod factory;
pub mod http;
pub mod query;
pub mod signer;

pub use api::{first_balance, resolve_key, LedgerApi};
pub use builder::TransactionBuilder;
pub use config::{ClientConfig, ConfigError};
pub use error::{ActionError, ApiError, BuildError, BuildErrorData, ChainError};
pub use factory::{ClientFactory, HttpClientFactory};
pub use http::{ChainClient, DEFAULT_URL};
pub use query::{BalanceQuery, KeyQuery, Page};
pub use signer::HsmSigner;
