//! Runner configuration: a TOML file for defaults, JSON files for
//! connector parameters.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use chain_client::ClientConfig;

/// Contents of the `--config` TOML file.
///
/// ```toml
/// log_level = "debug"
/// log_format = "json"
///
/// [client]
/// url = "http://127.0.0.1:1999"
/// access_token = "ops:s3cret"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl ConnectConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("failed to parse config")
    }

    /// Load the file at `path`, or the defaults when no file was given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}

/// Read a connector parameter set from a JSON file.
pub fn read_input<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid connector input in {}", path.display()))
}

/// First non-empty value: command line or environment, then the input
/// file, then the config file.
pub fn pick(cli: Option<&str>, input: Option<&str>, file: Option<&str>) -> Option<String> {
    [cli, input, file]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pick_prefers_command_line() {
        assert_eq!(
            pick(Some("http://cli"), Some("http://input"), Some("http://file")).as_deref(),
            Some("http://cli")
        );
        assert_eq!(
            pick(None, Some("http://input"), Some("http://file")).as_deref(),
            Some("http://input")
        );
        assert_eq!(pick(Some(""), Some(""), Some("http://file")).as_deref(), Some("http://file"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn config_defaults() {
        let config = ConnectConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "human");
        assert!(config.client.url.is_none());
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "log_format = \"json\"\n\n[client]\nurl = \"http://10.0.0.5:1999\"\naccess_token = \"ops:pw\""
        )
        .unwrap();

        let config = ConnectConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_format, "json");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.client.url.as_deref(), Some("http://10.0.0.5:1999"));
        assert_eq!(config.client.access_token.as_deref(), Some("ops:pw"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConnectConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file"));
    }

    #[test]
    fn reads_connector_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"account_alias": "alice", "asset_alias": "USD"}}"#
        )
        .unwrap();
        let input: chain_connectors::BalanceInput = read_input(file.path()).unwrap();
        assert_eq!(input.account_alias, "alice");
        assert!(input.url.is_none());
    }
}
