//! Values handed back to the workflow host.
//!
//! A ledger rejection at build time is not a fault: it is returned as
//! [`Outcome::Rejected`] so the workflow can branch on it.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// Machine-readable code plus human-readable explanation of a rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

/// Either the connector's normal result or a soft rejection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Completed(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Completed(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

/// A signed transaction that has not been submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTransaction {
    pub raw_transaction: String,
}

/// A submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_id: String,
}

/// The amount held for an account/asset pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceAmount {
    pub amount: Amount,
}

pub type BaseTransactionResponse = Outcome<BaseTransaction>;
pub type TransactionResponse = Outcome<TransactionReceipt>;
