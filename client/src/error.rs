//! Errors returned by the Chain API and by the client itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structured error body returned by a Chain core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(detail) = self.detail.as_deref().filter(|d| !d.is_empty()) {
            write!(f, " ({detail})")?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request {request_id}]")?;
        }
        Ok(())
    }
}

/// Error attached to a single action of a rejected build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ActionError {
    /// Position of the offending action in the builder, when reported.
    pub fn index(&self) -> Option<u64> {
        self.data.as_ref()?.get("index")?.as_u64()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildErrorData {
    #[serde(default)]
    pub actions: Vec<ActionError>,
}

/// A transaction that the ledger refused to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildError {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Option<BuildErrorData>,
}

impl BuildError {
    pub fn action_errors(&self) -> &[ActionError] {
        self.data
            .as_ref()
            .map(|d| d.actions.as_slice())
            .unwrap_or_default()
    }

    /// Messages of the per-action errors, in builder order.
    pub fn action_messages(&self) -> impl Iterator<Item = &str> {
        self.action_errors().iter().map(|e| e.message.as_str())
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        let count = self.action_errors().len();
        if count > 0 {
            write!(f, " ({count} action error(s))")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("bad Chain URL {url:?}: {reason}")]
    BadUrl { url: String, reason: String },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("request to {path} failed: {source}")]
    Connectivity {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}: {body}")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Chain API error: {0}")]
    Api(ApiError),

    #[error("transaction build rejected: {0}")]
    Build(BuildError),

    #[error("invalid response from {path}: {reason}")]
    Json { path: String, reason: String },

    #[error("no key found for alias {0:?}")]
    KeyNotFound(String),
}
