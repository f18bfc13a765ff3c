//! Connector-level failures escalated to the workflow host.

use chain_client::ChainError;
use thiserror::Error;

/// A failure that aborts the workflow step.
///
/// Ledger build rejections are not errors; see [`crate::outcome`].
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("error while creating Chain client: {source}")]
    Client {
        #[source]
        source: ChainError,
    },

    #[error("{context}: {source}")]
    Ledger {
        context: &'static str,
        #[source]
        source: ChainError,
    },

    #[error("invalid input parameter `{parameter}`: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: String,
    },
}

impl ConnectorError {
    /// The underlying ledger error, if any.
    pub fn chain_error(&self) -> Option<&ChainError> {
        match self {
            Self::Client { source } | Self::Ledger { source, .. } => Some(source),
            Self::InvalidInput { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn ledger_error_keeps_message_and_source() {
        let err = ConnectorError::Ledger {
            context: "error while getting the balance",
            source: ChainError::KeyNotFound("treasury".into()),
        };
        assert_eq!(
            err.to_string(),
            "error while getting the balance: no key found for alias \"treasury\""
        );
        assert!(err.source().is_some());
        assert!(matches!(err.chain_error(), Some(ChainError::KeyNotFound(_))));
    }

    #[test]
    fn invalid_input_has_no_chain_error() {
        let err = ConnectorError::InvalidInput {
            parameter: "amount",
            reason: "amount is empty".into(),
        };
        assert!(err.chain_error().is_none());
        assert_eq!(err.to_string(), "invalid input parameter `amount`: amount is empty");
    }
}
