//! Workflow connectors for the Chain ledger.
//!
//! Each connector takes a typed parameter set from the workflow host,
//! builds a client, talks to the ledger and hands back one output value:
//! - [`CreateBaseExchangeAssetConnector`]: builds and signs (without
//!   submitting) a transaction that can be extended by a counterparty
//! - [`SpendAssetConnector`]: builds, signs and submits a transfer
//! - [`GetBalanceConnector`]: looks up an account's balance of one asset
//!
//! Ledger build rejections come back as [`chain_types::Outcome::Rejected`];
//! every other failure is a [`ConnectorError`].

pub mod balance;
pub mod error;
pub mod exchange;
pub mod factory;
pub mod lifecycle;
pub mod outcome;
mod params;
pub mod spend;

pub use balance::{BalanceInput, GetBalanceConnector};
pub use error::ConnectorError;
pub use exchange::{CreateBaseExchangeAssetConnector, ExchangeInput};
pub use factory::build_client;
pub use lifecycle::{run, Connector};
pub use outcome::rejection_from;
pub use spend::{SpendAssetConnector, SpendInput};
