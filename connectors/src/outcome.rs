//! Mapping ledger results onto connector outputs.
//!
//! A build rejection is a normal output the workflow branches on; any other
//! ledger failure aborts the step with full context.

use chain_client::{BuildError, ChainError};
use chain_types::{Outcome, Rejection};

use crate::error::ConnectorError;

/// Turn a build rejection into the host-visible `(code, message)` pair.
///
/// The message concatenates the per-action messages in order; when the
/// ledger reported no action errors it is the rejection's detail text.
pub fn rejection_from(build: &BuildError) -> Rejection {
    let message = if build.action_errors().is_empty() {
        build.detail.clone().unwrap_or_default()
    } else {
        build.action_messages().collect()
    };
    Rejection {
        code: build.code.clone(),
        message,
    }
}

pub(crate) fn settle<T>(
    result: Result<T, ChainError>,
    context: &'static str,
) -> Result<Outcome<T>, ConnectorError> {
    match result {
        Ok(value) => Ok(Outcome::Completed(value)),
        Err(ChainError::Build(build)) => {
            let rejection = rejection_from(&build);
            tracing::warn!(code = %rejection.code, message = %rejection.message, "ledger rejected transaction");
            Ok(Outcome::Rejected(rejection))
        }
        Err(source) => Err(ConnectorError::Ledger { context, source }),
    }
}
