//! Nullable infrastructure for deterministic testing.
//!
//! The connectors only reach the ledger through `LedgerApi` and
//! `ClientFactory`. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be scripted to fail at any step
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: hand a [`NullClientFactory`] to a connector in place of the HTTP
//! factory.

pub mod factory;
pub mod ledger;

pub use factory::{ClientPath, NullClient, NullClientFactory};
pub use ledger::{LedgerCall, NullLedger, Operation};
