//! Transaction templates as returned by the build and sign endpoints.

use serde::{Deserialize, Serialize};

/// An unsigned or partially/fully signed transaction.
///
/// Each stage (build, sign) yields a new template; the previous one is
/// simply dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub raw_transaction: String,
    #[serde(default)]
    pub signing_instructions: Vec<serde_json::Value>,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub allow_additional_actions: bool,
}

impl Template {
    /// Mark the template so that signatures leave room for further actions.
    pub fn allow_additional_actions(mut self) -> Self {
        self.allow_additional_actions = true;
        self
    }
}
