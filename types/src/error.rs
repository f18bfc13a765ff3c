//! Errors raised while constructing value objects from host input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("amount is empty")]
    EmptyAmount,

    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },
}
