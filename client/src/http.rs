//! `reqwest`-backed Chain client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt;

use chain_types::{Balance, Key, SubmitResponse, Template};

use crate::api::LedgerApi;
use crate::builder::TransactionBuilder;
use crate::config::ClientConfig;
use crate::error::{ApiError, BuildError, ChainError};
use crate::query::{BalanceQuery, KeyQuery, Page};

/// URL of a Chain core running locally with default settings.
pub const DEFAULT_URL: &str = "http://localhost:1999";

/// Path prefix of the mock HSM, relative to the core URL.
const MOCK_HSM_PATH: &str = "mockhsm";

#[derive(Clone)]
struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    /// Split a `name:secret` access token. A token without `:` is the user
    /// name with an empty password.
    fn from_token(token: &str) -> Self {
        let (user, password) = token.split_once(':').unwrap_or((token, ""));
        Self {
            user: user.to_string(),
            password: password.to_string(),
        }
    }
}

/// Per-item error handling for batch endpoints.
#[derive(Clone, Copy)]
enum BatchErrors {
    Build,
    Api,
}

/// HTTP client for one Chain core.
///
/// Every operation is a JSON `POST` to `{url}/{path}`.
#[derive(Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl ChainClient {
    /// Client for [`DEFAULT_URL`] without credentials.
    pub fn new() -> Result<Self, ChainError> {
        Self::with_options(DEFAULT_URL, None, &ClientConfig::default())
    }

    pub fn with_url(url: &str) -> Result<Self, ChainError> {
        Self::with_options(url, None, &ClientConfig::default())
    }

    pub fn with_url_and_token(url: &str, access_token: &str) -> Result<Self, ChainError> {
        Self::with_options(url, Some(access_token), &ClientConfig::default())
    }

    /// Client for `url` with explicit HTTP settings from `config`.
    pub fn with_options(
        url: &str,
        access_token: Option<&str>,
        config: &ClientConfig,
    ) -> Result<Self, ChainError> {
        let base_url = validate_url(url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ChainError::HttpClient)?;
        Ok(Self {
            http,
            base_url,
            credentials: access_token.map(Credentials::from_token),
        })
    }

    /// The configured base URL, without a trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Client bound to this core's mock HSM, sharing connection pool and
    /// credentials.
    pub fn signer_client(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: format!("{}/{MOCK_HSM_PATH}", self.base_url),
            credentials: self.credentials.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `body` to `path` and decode the JSON response.
    async fn request<B, R>(&self, path: &str, body: &B) -> Result<R, ChainError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "chain request");

        let mut request = self.http.post(&url).json(body);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, Some(&credentials.password));
        }

        let response = request.send().await.map_err(|source| ChainError::Connectivity {
            path: path.to_string(),
            source,
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ChainError::Connectivity {
            path: path.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(match serde_json::from_slice::<ApiError>(&bytes) {
                Ok(api) => ChainError::Api(api),
                Err(_) => ChainError::Http {
                    path: path.to_string(),
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                },
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ChainError::Json {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// POST a one-element batch and return its single result.
    async fn singleton_batch<B, R>(
        &self,
        path: &str,
        body: &B,
        errors: BatchErrors,
    ) -> Result<R, ChainError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let items: Vec<serde_json::Value> = self.request(path, body).await?;
        decode_batch_item(path, items, errors)
    }
}

fn validate_url(url: &str) -> Result<String, ChainError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ChainError::BadUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ChainError::BadUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ChainError::BadUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn decode_batch_item<R: DeserializeOwned>(
    path: &str,
    items: Vec<serde_json::Value>,
    errors: BatchErrors,
) -> Result<R, ChainError> {
    let json_error = |reason: String| ChainError::Json {
        path: path.to_string(),
        reason,
    };
    let item = items
        .into_iter()
        .next()
        .ok_or_else(|| json_error("empty batch response".to_string()))?;

    if item.get("code").is_some() {
        return Err(match errors {
            BatchErrors::Build => ChainError::Build(
                serde_json::from_value::<BuildError>(item)
                    .map_err(|e| json_error(e.to_string()))?,
            ),
            BatchErrors::Api => ChainError::Api(
                serde_json::from_value::<ApiError>(item).map_err(|e| json_error(e.to_string()))?,
            ),
        });
    }

    serde_json::from_value(item).map_err(|e| json_error(e.to_string()))
}

#[async_trait]
impl LedgerApi for ChainClient {
    async fn list_keys(&self, query: &KeyQuery) -> Result<Page<Key, KeyQuery>, ChainError> {
        self.request(&format!("{MOCK_HSM_PATH}/list-keys"), query).await
    }

    async fn list_balances(
        &self,
        query: &BalanceQuery,
    ) -> Result<Page<Balance, BalanceQuery>, ChainError> {
        self.request("list-balances", query).await
    }

    async fn build_transaction(
        &self,
        builder: &TransactionBuilder,
    ) -> Result<Template, ChainError> {
        self.singleton_batch("build-transaction", &[builder], BatchErrors::Build)
            .await
    }

    async fn sign_transaction(
        &self,
        template: &Template,
        xpubs: &[String],
    ) -> Result<Template, ChainError> {
        let body = json!({ "transactions": [template], "xpubs": xpubs });
        self.signer_client()
            .singleton_batch("sign-transaction", &body, BatchErrors::Api)
            .await
    }

    async fn submit_transaction(&self, template: &Template) -> Result<SubmitResponse, ChainError> {
        let body = json!({ "transactions": [template] });
        self.singleton_batch("submit-transaction", &body, BatchErrors::Api)
            .await
    }
}

impl fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainClient")
            .field("url", &self.base_url)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|c| format!("{}:***", c.user)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_client_targets_local_core() {
        let client = ChainClient::new().unwrap();
        assert_eq!(client.url(), DEFAULT_URL);
        assert!(!client.has_credentials());
    }

    #[test]
    fn malformed_url_is_bad_url() {
        let err = ChainClient::with_url("not a url").unwrap_err();
        assert!(matches!(err, ChainError::BadUrl { .. }));
        let err = ChainClient::with_url("ftp://ledger.example.com").unwrap_err();
        assert!(matches!(err, ChainError::BadUrl { ref reason, .. } if reason.contains("ftp")));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ChainClient::with_url("http://127.0.0.1:1999/").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:1999");
        assert_eq!(
            client.endpoint("list-balances"),
            "http://127.0.0.1:1999/list-balances"
        );
    }

    #[test]
    fn signer_client_uses_mock_hsm_path() {
        let client = ChainClient::with_url_and_token("http://127.0.0.1:1999", "ops:s3cret").unwrap();
        let signer = client.signer_client();
        assert_eq!(signer.url(), "http://127.0.0.1:1999/mockhsm");
        assert!(signer.has_credentials());
        assert_eq!(
            signer.endpoint("sign-transaction"),
            "http://127.0.0.1:1999/mockhsm/sign-transaction"
        );
    }

    #[test]
    fn token_splits_into_basic_auth() {
        let c = Credentials::from_token("ops:s3:cret");
        assert_eq!(c.user, "ops");
        assert_eq!(c.password, "s3:cret");
        let c = Credentials::from_token("opaque");
        assert_eq!(c.user, "opaque");
        assert_eq!(c.password, "");
    }

    #[test]
    fn debug_masks_password() {
        let client = ChainClient::with_url_and_token("http://127.0.0.1:1999", "ops:s3cret").unwrap();
        let printed = format!("{client:?}");
        assert!(printed.contains("ops:***"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn batch_build_error_is_structured() {
        let items = vec![json!({
            "code": "CH706",
            "message": "One or more actions had an error",
            "data": {"actions": [{"code": "CH735", "message": "Insufficient funds"}]}
        })];
        let err = decode_batch_item::<Template>("build-transaction", items, BatchErrors::Build)
            .unwrap_err();
        match err {
            ChainError::Build(build) => {
                assert_eq!(build.code, "CH706");
                assert_eq!(build.action_errors().len(), 1);
            }
            other => panic!("expected build error, got {other:?}"),
        }
    }

    #[test]
    fn batch_error_outside_build_is_api_error() {
        let items = vec![json!({"code": "CH735", "message": "Transaction rejected"})];
        let err = decode_batch_item::<SubmitResponse>("submit-transaction", items, BatchErrors::Api)
            .unwrap_err();
        assert!(matches!(err, ChainError::Api(ref api) if api.code == "CH735"));
    }

    #[test]
    fn batch_success_decodes_item() {
        let items = vec![json!({"id": "tx123"})];
        let resp: SubmitResponse =
            decode_batch_item("submit-transaction", items, BatchErrors::Api).unwrap();
        assert_eq!(resp.id, "tx123");
    }

    #[test]
    fn empty_batch_is_json_error() {
        let err = decode_batch_item::<SubmitResponse>("submit-transaction", vec![], BatchErrors::Api)
            .unwrap_err();
        assert!(matches!(err, ChainError::Json { .. }));
    }
}
