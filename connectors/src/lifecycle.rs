//! Connector lifecycle.
//!
//! A host drives every connector through the same sequence: validate the
//! parameters, connect, execute, read the output, disconnect.

use async_trait::async_trait;
use tracing::Instrument;

use crate::error::ConnectorError;

#[async_trait]
pub trait Connector: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    /// Stable name used in logs and by the runner.
    fn name(&self) -> &'static str;

    /// Reject parameters that can never produce a valid request.
    fn validate_input(&self, input: &Self::Input) -> Result<(), ConnectorError>;

    /// Open long-lived resources. Clients are built per execution, so there
    /// is nothing to do by default.
    async fn connect(&mut self) -> Result<(), ConnectorError> {
        Ok(())
    }

    async fn execute(&self, input: &Self::Input) -> Result<Self::Output, ConnectorError>;

    async fn disconnect(&mut self) -> Result<(), ConnectorError> {
        Ok(())
    }
}

/// Run one full lifecycle. `disconnect` runs even when `execute` fails; the
/// first error is returned.
pub async fn run<C: Connector>(
    connector: &mut C,
    input: &C::Input,
) -> Result<C::Output, ConnectorError> {
    let span = tracing::info_span!("connector", name = connector.name());
    async move {
        connector.validate_input(input)?;
        connector.connect().await?;
        let executed = connector.execute(input).await;
        let disconnected = connector.disconnect().await;
        let output = executed?;
        disconnected?;
        Ok(output)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        calls: Vec<&'static str>,
        fail_execute: bool,
    }

    #[async_trait]
    impl Connector for Probe {
        type Input = u32;
        type Output = u32;

        fn name(&self) -> &'static str {
            "probe"
        }

        fn validate_input(&self, input: &u32) -> Result<(), ConnectorError> {
            if *input == 0 {
                return Err(ConnectorError::InvalidInput {
                    parameter: "input",
                    reason: "must be positive".into(),
                });
            }
            Ok(())
        }

        async fn connect(&mut self) -> Result<(), ConnectorError> {
            self.calls.push("connect");
            Ok(())
        }

        async fn execute(&self, input: &u32) -> Result<u32, ConnectorError> {
            if self.fail_execute {
                return Err(ConnectorError::InvalidInput {
                    parameter: "input",
                    reason: "boom".into(),
                });
            }
            Ok(input * 2)
        }

        async fn disconnect(&mut self) -> Result<(), ConnectorError> {
            self.calls.push("disconnect");
            Ok(())
        }
    }

    #[tokio::test]
    async fn runs_full_lifecycle() {
        let mut probe = Probe::default();
        assert_eq!(run(&mut probe, &21).await.unwrap(), 42);
        assert_eq!(probe.calls, vec!["connect", "disconnect"]);
    }

    #[tokio::test]
    async fn invalid_input_stops_before_connect() {
        let mut probe = Probe::default();
        assert!(run(&mut probe, &0).await.is_err());
        assert!(probe.calls.is_empty());
    }

    #[tokio::test]
    async fn disconnects_after_failed_execute() {
        let mut probe = Probe {
            fail_execute: true,
            ..Default::default()
        };
        assert!(run(&mut probe, &1).await.is_err());
        assert_eq!(probe.calls, vec!["connect", "disconnect"]);
    }
}
