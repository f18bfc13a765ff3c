//! Fundamental types for the Chain connectors.
//!
//! Every value that crosses the connector boundary lives here: amounts,
//! asset references, reference data, transaction actions and templates,
//! ledger records (keys, balances, submit receipts) and the outcome values
//! handed back to the workflow host.

pub mod action;
pub mod amount;
pub mod asset;
pub mod error;
pub mod outcome;
pub mod records;
pub mod reference;
pub mod template;

pub use action::{Action, ActionKind};
pub use amount::Amount;
pub use asset::AssetRef;
pub use error::TypesError;
pub use outcome::{
    BalanceAmount, BaseTransaction, BaseTransactionResponse, Outcome, Rejection,
    TransactionReceipt, TransactionResponse,
};
pub use records::{Balance, Key, SubmitResponse};
pub use reference::{ReferenceData, ReferenceRow};
pub use template::Template;
