//! Mock-HSM transaction signing.

use chain_types::{Key, Template};

use crate::api::LedgerApi;
use crate::error::ChainError;

/// Collects the keys that must sign a template and asks the ledger's
/// mock HSM for the signatures.
///
/// A signer lives for one connector invocation; keys are never shared
/// between invocations.
#[derive(Debug, Clone, Default)]
pub struct HsmSigner {
    xpubs: Vec<String>,
}

impl HsmSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key. Registering the same xpub twice is a no-op.
    pub fn add_key(&mut self, key: &Key) {
        if !self.xpubs.contains(&key.xpub) {
            self.xpubs.push(key.xpub.clone());
        }
    }

    pub fn key_count(&self) -> usize {
        self.xpubs.len()
    }

    pub fn xpubs(&self) -> &[String] {
        &self.xpubs
    }

    /// Sign `template` with every registered key.
    ///
    /// With no keys registered the template is returned as is.
    pub async fn sign<L: LedgerApi + ?Sized>(
        &self,
        ledger: &L,
        template: Template,
    ) -> Result<Template, ChainError> {
        if self.xpubs.is_empty() {
            tracing::debug!("no signing keys registered, template left unsigned");
            return Ok(template);
        }
        tracing::debug!(keys = self.xpubs.len(), "signing template with mock HSM");
        ledger.sign_transaction(&template, &self.xpubs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_key_deduplicates() {
        let mut signer = HsmSigner::new();
        let key = Key {
            alias: Some("treasury".into()),
            xpub: "xpub1".into(),
        };
        signer.add_key(&key);
        signer.add_key(&key);
        signer.add_key(&Key {
            alias: None,
            xpub: "xpub2".into(),
        });
        assert_eq!(signer.key_count(), 2);
        assert_eq!(signer.xpubs(), ["xpub1".to_string(), "xpub2".to_string()]);
    }
}
