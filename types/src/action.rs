//! Transaction actions.
//!
//! A transfer is two actions: a spend that takes units out of one account
//! and a control that puts them into another.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::asset::AssetRef;
use crate::reference::ReferenceData;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Funds leave an account.
    SpendAccount,
    /// Funds arrive at an account.
    ControlAccount,
}

/// One action of a transaction builder request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub account_alias: String,
    #[serde(flatten)]
    pub asset: AssetRef,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "ReferenceData::is_empty")]
    pub reference_data: ReferenceData,
}

impl Action {
    pub fn spend_from_account(
        account_alias: impl Into<String>,
        asset: AssetRef,
        amount: Amount,
    ) -> Self {
        Self {
            kind: ActionKind::SpendAccount,
            account_alias: account_alias.into(),
            asset,
            amount,
            reference_data: ReferenceData::new(),
        }
    }

    pub fn control_with_account(
        account_alias: impl Into<String>,
        asset: AssetRef,
        amount: Amount,
    ) -> Self {
        Self {
            kind: ActionKind::ControlAccount,
            account_alias: account_alias.into(),
            asset,
            amount,
            reference_data: ReferenceData::new(),
        }
    }

    pub fn with_reference_data(mut self, reference_data: ReferenceData) -> Self {
        self.reference_data = reference_data;
        self
    }
}
